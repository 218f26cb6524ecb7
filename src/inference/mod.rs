//! # Relationship Inference
//!
//! ```text
//! (source, target)
//!   → find_paths()   BFS over PARENT / CHILD / SPOUSE, bounded
//!   → compose()      fold each path's steps into a Token, drop implausible ones
//!   → rank           fewest steps, fewest marriages, smallest canonical token
//!   → resolve_in()   Token + genders → "sister-in-law"
//! ```
//!
//! The engine holds configuration only. Every call takes the store
//! explicitly and never writes to it, so one engine serves any number
//! of family graphs.

pub mod compose;
pub mod enumerate;
pub mod label;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::*;
use crate::storage::FamilyStore;
use crate::Result;

pub use compose::{compose, InLawSide, Lineage, Token};
pub use enumerate::{find_paths, PathEnumerator, SearchBounds};
pub use label::{resolve, resolve_in, Perspective, SELF_LABEL};

// ============================================================================
// Outcomes
// ============================================================================

/// A resolved relationship: what the target is to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub label: String,
    pub token: Token,
    /// The path the label was derived from.
    pub path: FamilyPath,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inference {
    Related(Relation),
    /// Not connected within the search bounds, or only through implausible paths.
    NoRelation,
}

impl Inference {
    pub fn label(&self) -> Option<&str> {
        match self {
            Inference::Related(r) => Some(&r.label),
            Inference::NoRelation => None,
        }
    }

    pub fn is_related(&self) -> bool {
        matches!(self, Inference::Related(_))
    }
}

struct Candidate {
    token: Token,
    key: String,
    path: FamilyPath,
}

impl Candidate {
    /// Ordering key: shorter, then fewer marriages, then canonical token,
    /// then member ids so equal tokens still pick one path deterministically.
    fn beats(&self, other: &Candidate) -> bool {
        let rank = |c: &Candidate| (c.path.len(), c.path.spouse_steps());
        (rank(self), &self.key, self.path.members.as_slice())
            < (rank(other), &other.key, other.path.members.as_slice())
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Infers relationship labels over any `FamilyStore`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceEngine {
    bounds: SearchBounds,
}

impl InferenceEngine {
    pub fn new(bounds: SearchBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    /// What `target` is to `source`.
    ///
    /// Fails with `UnknownMember` if either id is missing. Disconnected
    /// members are `Inference::NoRelation`, not an error.
    pub fn infer<S: FamilyStore + ?Sized>(
        &self,
        store: &S,
        source: &MemberId,
        target: &MemberId,
    ) -> Result<Inference> {
        store.get_member(source)?;
        let target_member = store.get_member(target)?;
        debug!(%source, %target, "infer relationship");

        if source == target {
            return Ok(Inference::Related(Relation {
                label: SELF_LABEL.to_string(),
                token: Token::Identity,
                path: FamilyPath::single(source.clone()),
            }));
        }

        let mut best: Option<Candidate> = None;
        for path in find_paths(store, source, target, self.bounds) {
            let path = path?;
            if best.as_ref().is_some_and(|b| path.len() > b.path.len()) {
                break;
            }
            let Some(token) = compose(&path.steps) else {
                trace!(%path, "discarded implausible path");
                continue;
            };
            let candidate = Candidate { key: token.to_string(), token, path };
            trace!(path = %candidate.path, token = %candidate.key, "candidate");
            if best.as_ref().is_none_or(|b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }

        let Some(best) = best else {
            debug!(%source, %target, "no relation within bounds");
            return Ok(Inference::NoRelation);
        };

        let perspective = perspective(store, &best.path, target_member.gender)?;
        let label = resolve_in(&best.token, &perspective);
        debug!(%source, %target, token = %best.key, %label, "resolved");
        Ok(Inference::Related(Relation { label, token: best.token, path: best.path }))
    }
}

/// Genders around the marriage edge of `path`, if it crosses one.
fn perspective<S: FamilyStore + ?Sized>(
    store: &S,
    path: &FamilyPath,
    target: Gender,
) -> Result<Perspective> {
    let mut p = Perspective::of(target);
    if let Some(i) = path.steps.iter().position(|s| *s == Step::Spouse) {
        p.near = store.get_member(&path.members[i])?.gender;
        p.far = store.get_member(&path.members[i + 1])?.gender;
    }
    Ok(p)
}
