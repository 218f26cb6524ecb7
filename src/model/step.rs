//! Primitive steps — one traversed edge of the family graph.

use serde::{Deserialize, Serialize};

/// One traversed edge, seen from the member the step starts at.
///
/// `Parent` moves to a parent of the current member (a `PARENT_OF` edge
/// walked against its direction), `Child` moves to a child, `Spouse`
/// crosses a marriage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    Parent,
    Child,
    Spouse,
}

impl Step {
    /// The same edge walked the other way.
    pub fn inverse(self) -> Step {
        match self {
            Step::Parent => Step::Child,
            Step::Child => Step::Parent,
            Step::Spouse => Step::Spouse,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Step::Parent => "PARENT",
            Step::Child => "CHILD",
            Step::Spouse => "SPOUSE",
        })
    }
}
