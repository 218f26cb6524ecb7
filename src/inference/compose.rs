//! Relation composer — folds a path's steps into a composition token.
//!
//! The fold is a small automaton over three axes:
//!
//! ```text
//!   up    generations climbed since the last marriage
//!   down  generations descended after the climb
//!   near  the blood chain that preceded a marriage, once one is crossed
//! ```
//!
//! A blood chain is always "climb, then descend". Climbing again after a
//! descent (a child's other parent, or a second turn) has no kinship term,
//! so the path is rejected as implausible and `compose` returns `None`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::Step;

/// Generation of the target relative to the source, for collateral kin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lineage {
    /// Target sits in an older generation (aunts, a parent's cousins).
    Senior,
    Level,
    /// Target sits in a younger generation (nieces, a cousin's children).
    Junior,
}

/// Where the marriage sits in an in-law path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InLawSide {
    /// "my spouse's X": the marriage comes first, `base` is X.
    SpouseFirst,
    /// "my X's spouse": the marriage comes last, `base` is X.
    SpouseLast,
    /// "my X's spouse's Y": blood on both sides. Holds X; `base` is Y.
    Between(Box<Token>),
}

/// Gender-neutral structural class of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// The empty path.
    Identity,
    Ancestor { degree: u32 },
    Descendant { degree: u32 },
    Sibling,
    /// `degree` 0 covers aunts/uncles and nieces/nephews, told apart by `lineage`.
    Cousin { degree: u32, removed: u32, lineage: Lineage },
    Spouse,
    InLaw { base: Box<Token>, side: InLawSide },
}

impl Token {
    pub fn is_in_law(&self) -> bool {
        matches!(self, Token::InLaw { .. })
    }
}

/// Canonical representation. Also the final tie-break key between paths.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identity => f.write_str("SELF"),
            Token::Ancestor { degree } => write!(f, "ANCESTOR({degree})"),
            Token::Descendant { degree } => write!(f, "DESCENDANT({degree})"),
            Token::Sibling => f.write_str("SIBLING"),
            Token::Cousin { degree, removed, lineage } => {
                write!(f, "COUSIN({degree},{removed}")?;
                match lineage {
                    Lineage::Senior => f.write_str(",UP)"),
                    Lineage::Level => f.write_str(")"),
                    Lineage::Junior => f.write_str(",DOWN)"),
                }
            }
            Token::Spouse => f.write_str("SPOUSE"),
            Token::InLaw { base, side } => match side {
                InLawSide::SpouseFirst => write!(f, "IN_LAW(SPOUSE,{base})"),
                InLawSide::SpouseLast => write!(f, "IN_LAW({base},SPOUSE)"),
                InLawSide::Between(near) => write!(f, "IN_LAW({near},SPOUSE,{base})"),
            },
        }
    }
}

// ============================================================================
// Blood chains
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
struct Chain {
    up: u32,
    down: u32,
}

impl Chain {
    /// Apply a vertical step. `false` when the chain would climb after descending.
    fn push(&mut self, step: Step) -> bool {
        match step {
            Step::Parent if self.down > 0 => false,
            Step::Parent => {
                self.up += 1;
                true
            }
            Step::Child => {
                self.down += 1;
                true
            }
            Step::Spouse => false,
        }
    }

    fn turns(&self) -> usize {
        usize::from(self.up > 0 && self.down > 0)
    }

    fn token(self) -> Option<Token> {
        let Chain { up, down } = self;
        Some(match (up, down) {
            (0, 0) => return None,
            (k, 0) => Token::Ancestor { degree: k },
            (0, k) => Token::Descendant { degree: k },
            (1, 1) => Token::Sibling,
            (a, b) => Token::Cousin {
                degree: a.min(b) - 1,
                removed: a.abs_diff(b),
                lineage: match a.cmp(&b) {
                    std::cmp::Ordering::Greater => Lineage::Senior,
                    std::cmp::Ordering::Equal => Lineage::Level,
                    std::cmp::Ordering::Less => Lineage::Junior,
                },
            },
        })
    }
}

// ============================================================================
// Fold
// ============================================================================

/// Fold `steps` left to right into a token.
///
/// Returns `None` for implausible paths: two separate marriages, two
/// direction turns, or a climb after a descent. Back-to-back marriage
/// steps cancel out (a spouse's spouse is oneself).
pub fn compose(steps: &[Step]) -> Option<Token> {
    let mut near: Option<Chain> = None;
    let mut chain = Chain::default();
    let mut prev: Option<Step> = None;

    for &step in steps {
        match step {
            Step::Spouse if prev == Some(Step::Spouse) => {
                chain = near.take()?;
                prev = None;
                continue;
            }
            Step::Spouse => {
                if near.is_some() {
                    trace!(?steps, "rejected: second marriage step");
                    return None;
                }
                near = Some(std::mem::take(&mut chain));
            }
            vertical => {
                if !chain.push(vertical) {
                    trace!(?steps, "rejected: climb after descent");
                    return None;
                }
            }
        }
        prev = Some(step);
    }

    let turns = chain.turns() + near.map_or(0, |c| c.turns());
    if turns > 1 {
        trace!(?steps, turns, "rejected: more than one turn");
        return None;
    }

    let far = chain.token();
    let Some(near) = near else {
        return Some(far.unwrap_or(Token::Identity));
    };
    Some(match (near.token(), far) {
        (None, None) => Token::Spouse,
        (None, Some(base)) => Token::InLaw { base: Box::new(base), side: InLawSide::SpouseFirst },
        (Some(base), None) => Token::InLaw { base: Box::new(base), side: InLawSide::SpouseLast },
        (Some(x), Some(base)) => Token::InLaw {
            base: Box::new(base),
            side: InLawSide::Between(Box::new(x)),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Step::*;

    fn cousin(degree: u32, removed: u32, lineage: Lineage) -> Token {
        Token::Cousin { degree, removed, lineage }
    }

    #[test]
    fn test_straight_lines() {
        assert_eq!(compose(&[]), Some(Token::Identity));
        assert_eq!(compose(&[Parent]), Some(Token::Ancestor { degree: 1 }));
        assert_eq!(compose(&[Parent, Parent]), Some(Token::Ancestor { degree: 2 }));
        assert_eq!(compose(&[Child, Child, Child]), Some(Token::Descendant { degree: 3 }));
    }

    #[test]
    fn test_collateral() {
        assert_eq!(compose(&[Parent, Child]), Some(Token::Sibling));
        assert_eq!(compose(&[Parent, Parent, Child]), Some(cousin(0, 1, Lineage::Senior)));
        assert_eq!(compose(&[Parent, Child, Child]), Some(cousin(0, 1, Lineage::Junior)));
        assert_eq!(compose(&[Parent, Parent, Child, Child]), Some(cousin(1, 0, Lineage::Level)));
        assert_eq!(
            compose(&[Parent, Parent, Parent, Child, Child]),
            Some(cousin(1, 1, Lineage::Senior)),
        );
        assert_eq!(
            compose(&[Parent, Parent, Parent, Child, Child, Child]),
            Some(cousin(2, 0, Lineage::Level)),
        );
    }

    #[test]
    fn test_marriage_direction() {
        assert_eq!(compose(&[Spouse]), Some(Token::Spouse));
        assert_eq!(
            compose(&[Spouse, Parent]),
            Some(Token::InLaw {
                base: Box::new(Token::Ancestor { degree: 1 }),
                side: InLawSide::SpouseFirst,
            }),
        );
        assert_eq!(
            compose(&[Child, Spouse]),
            Some(Token::InLaw {
                base: Box::new(Token::Descendant { degree: 1 }),
                side: InLawSide::SpouseLast,
            }),
        );
        assert_eq!(
            compose(&[Parent, Child, Spouse, Parent]),
            Some(Token::InLaw {
                base: Box::new(Token::Ancestor { degree: 1 }),
                side: InLawSide::Between(Box::new(Token::Sibling)),
            }),
        );
    }

    #[test]
    fn test_implausible_paths() {
        // child's other parent
        assert_eq!(compose(&[Child, Parent]), None);
        // two separate marriages
        assert_eq!(compose(&[Spouse, Parent, Spouse]), None);
        // turns on both sides of a marriage
        assert_eq!(compose(&[Parent, Child, Child, Spouse, Parent, Parent, Child]), None);
        assert_eq!(compose(&[Parent, Child, Spouse, Parent, Child]), None);
    }

    #[test]
    fn test_adjacent_marriages_cancel() {
        assert_eq!(compose(&[Spouse, Spouse]), Some(Token::Identity));
        assert_eq!(compose(&[Parent, Spouse, Spouse, Child]), Some(Token::Sibling));
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(Token::Ancestor { degree: 2 }.to_string(), "ANCESTOR(2)");
        assert_eq!(cousin(0, 1, Lineage::Senior).to_string(), "COUSIN(0,1,UP)");
        assert_eq!(cousin(1, 0, Lineage::Level).to_string(), "COUSIN(1,0)");
        let t = compose(&[Child, Spouse]).unwrap();
        assert!(t.is_in_law());
        assert_eq!(t.to_string(), "IN_LAW(DESCENDANT(1),SPOUSE)");
    }
}
