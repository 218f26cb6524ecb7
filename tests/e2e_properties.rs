//! Property tests over randomly grown family graphs.

use kinship::{Gender, Inference, InferenceEngine, MemberId, MemoryStore, Token};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Parent(usize, usize),
    Marry(usize, usize),
}

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Unspecified)]
}

fn family() -> impl Strategy<Value = (Vec<Gender>, Vec<Op>)> {
    (2usize..9).prop_flat_map(|n| {
        let op = (any::<bool>(), 0..n, 0..n).prop_map(|(parent, a, b)| {
            if parent { Op::Parent(a, b) } else { Op::Marry(a, b) }
        });
        (prop::collection::vec(gender(), n), prop::collection::vec(op, 0..2 * n))
    })
}

fn member(i: usize) -> MemberId {
    MemberId(format!("m{i}"))
}

/// Build a store, letting the store reject ops that break its invariants.
fn build(genders: &[Gender], ops: &[Op]) -> MemoryStore {
    let db = MemoryStore::new();
    for (i, g) in genders.iter().enumerate() {
        db.add_member(member(i), format!("Member {i}"), *g).unwrap();
    }
    for op in ops {
        let _ = match *op {
            // lower index is always the parent, so no cycles are attempted
            Op::Parent(a, b) => db.add_parent(&member(a.min(b)), &member(a.max(b))),
            Op::Marry(a, b) => db.marry(&member(a), &member(b)),
        };
    }
    db
}

fn child_word(g: Gender) -> &'static str {
    g.pick("son", "daughter", "child")
}

proptest! {
    #[test]
    fn self_is_always_self((genders, ops) in family()) {
        let db = build(&genders, &ops);
        let engine = InferenceEngine::default();
        for i in 0..genders.len() {
            let result = engine.infer(&db, &member(i), &member(i)).unwrap();
            prop_assert_eq!(result.label(), Some("self"));
        }
    }

    #[test]
    fn queries_are_deterministic((genders, ops) in family()) {
        let db = build(&genders, &ops);
        let engine = InferenceEngine::default();
        for a in 0..genders.len() {
            for b in 0..genders.len() {
                let first = engine.infer(&db, &member(a), &member(b)).unwrap();
                let second = engine.infer(&db, &member(a), &member(b)).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn parent_and_child_are_inverse((genders, ops) in family()) {
        let db = build(&genders, &ops);
        let engine = InferenceEngine::default();
        for a in 0..genders.len() {
            for b in 0..genders.len() {
                let Inference::Related(rel) = engine.infer(&db, &member(a), &member(b)).unwrap() else {
                    continue;
                };
                if rel.token != (Token::Ancestor { degree: 1 }) {
                    continue;
                }
                let back = engine.infer(&db, &member(b), &member(a)).unwrap();
                prop_assert_eq!(back.label(), Some(child_word(genders[a])));
            }
        }
    }

    #[test]
    fn related_is_symmetric((genders, ops) in family()) {
        let db = build(&genders, &ops);
        let engine = InferenceEngine::default();
        for a in 0..genders.len() {
            for b in 0..genders.len() {
                let there = engine.infer(&db, &member(a), &member(b)).unwrap();
                let back = engine.infer(&db, &member(b), &member(a)).unwrap();
                prop_assert_eq!(there.is_related(), back.is_related());
            }
        }
    }
}
