//! FamilyPath — a walk through the family graph: member -[step]-> member ...

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::{MemberId, Step};

/// Inline capacity covers every path inside the default search bounds.
pub type Steps = SmallVec<[Step; 10]>;

/// A path in the family graph.
///
/// Every constructor starts from `single`, so `members` is never empty.
/// A hand-written JSON path with no members violates that, and `start`,
/// `end` and `Display` panic on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPath {
    /// Members along the path. Always has one more element than `steps`.
    pub members: SmallVec<[MemberId; 11]>,
    /// Steps connecting consecutive members.
    pub steps: Steps,
}

impl FamilyPath {
    pub fn single(member: MemberId) -> Self {
        Self { members: smallvec![member], steps: SmallVec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn start(&self) -> &MemberId {
        self.members.first().expect("FamilyPath always has at least one member")
    }

    pub fn end(&self) -> &MemberId {
        self.members.last().expect("FamilyPath always has at least one member")
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.members.iter().any(|m| m == id)
    }

    /// Number of marriage edges crossed.
    pub fn spouse_steps(&self) -> usize {
        self.steps.iter().filter(|s| **s == Step::Spouse).count()
    }

    /// Extend the path with a step and the member it lands on.
    pub fn append(&mut self, step: Step, member: MemberId) {
        self.steps.push(step);
        self.members.push(member);
    }

    /// Copy of this path extended by one step.
    pub fn extended(&self, step: Step, member: MemberId) -> Self {
        let mut next = self.clone();
        next.append(step, member);
        next
    }

    /// The same walk from the other end.
    pub fn reversed(&self) -> Self {
        Self {
            members: self.members.iter().rev().cloned().collect(),
            steps: self.steps.iter().rev().map(|s| s.inverse()).collect(),
        }
    }
}

impl std::fmt::Display for FamilyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.start())?;
        for (step, member) in self.steps.iter().zip(self.members.iter().skip(1)) {
            write!(f, "-[{step}]->({member})")?;
        }
        Ok(())
    }
}
