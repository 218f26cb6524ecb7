//! # Family Store Trait
//!
//! The contract between the inference engine and whatever holds the
//! family graph. The engine only ever reads through it.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory, with validating mutations and JSON snapshots |

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::{Error, Result};

pub use memory::MemoryStore;

// ============================================================================
// Snapshot format
// ============================================================================

/// Serializable image of a whole family graph.
///
/// Each marriage is listed once; loading restores both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySnapshot {
    pub members: Vec<Member>,
    /// `(parent, child)` pairs.
    #[serde(default)]
    pub parent_of: Vec<(MemberId, MemberId)>,
    #[serde(default)]
    pub spouse_of: Vec<(MemberId, MemberId)>,
}

// ============================================================================
// FamilyStore Trait
// ============================================================================

/// Read-only traversal primitives over a family graph.
///
/// Implementations must not change between calls made for one query;
/// the engine assumes a frozen snapshot for the duration of `infer`.
pub trait FamilyStore {
    /// Look up a member. Fails with `UnknownMember`.
    fn get_member(&self, id: &MemberId) -> Result<Member>;

    /// Children of `id` (outgoing `PARENT_OF`).
    fn children_of(&self, id: &MemberId) -> Result<Vec<MemberId>>;

    /// Parents of `id` (incoming `PARENT_OF`).
    fn parents_of(&self, id: &MemberId) -> Result<Vec<MemberId>>;

    /// Spouses of `id`.
    fn spouses_of(&self, id: &MemberId) -> Result<Vec<MemberId>>;

    /// All members.
    fn members(&self) -> Vec<Member>;

    fn member_count(&self) -> usize {
        self.members().len()
    }

    fn contains(&self, id: &MemberId) -> bool {
        self.get_member(id).is_ok()
    }

    /// Members whose display name is exactly `name`.
    fn find_by_name(&self, name: &str) -> Vec<Member> {
        self.members().into_iter().filter(|m| m.name == name).collect()
    }

    /// Resolve an identifier or a display name to a member.
    ///
    /// Identifiers win over names. A name shared by several members is
    /// rejected rather than guessed.
    fn resolve(&self, name_or_id: &str) -> Result<Member> {
        if let Ok(member) = self.get_member(&MemberId::from(name_or_id)) {
            return Ok(member);
        }
        let mut matches = self.find_by_name(name_or_id);
        match matches.len() {
            0 => Err(Error::UnknownMember(name_or_id.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(Error::AmbiguousMember { name: name_or_id.to_string(), matches: n }),
        }
    }

    /// Every neighbor of `id` tagged with the step that reaches it:
    /// parents first, then children, then spouses.
    fn neighbors(&self, id: &MemberId) -> Result<Vec<(Step, MemberId)>> {
        let mut out = Vec::new();
        out.extend(self.parents_of(id)?.into_iter().map(|p| (Step::Parent, p)));
        out.extend(self.children_of(id)?.into_iter().map(|c| (Step::Child, c)));
        out.extend(self.spouses_of(id)?.into_iter().map(|s| (Step::Spouse, s)));
        Ok(out)
    }
}
