//! # kinship — Family Graph Relationship Inference
//!
//! Keeps a family tree as a property graph (members with a gender,
//! `PARENT_OF` and `SPOUSE_OF` edges) and names how any two members are
//! related: "grandmother", "brother-in-law", "first cousin once removed".
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `FamilyStore` is the contract between engine and storage
//! 2. **Clean DTOs**: `Member`, `Step`, `FamilyPath` cross all boundaries
//! 3. **Composition is a pure fold**: path steps → `Token` has no graph access
//! 4. **Stateless engine**: the store is passed into every call, never held
//!
//! ## Quick Start
//!
//! ```rust
//! use kinship::{Gender, MemoryStore, infer_relationship, Answer};
//!
//! # fn example() -> kinship::Result<()> {
//! let family = MemoryStore::new();
//! let alice = family.add_member("alice", "Alice", Gender::Female)?;
//! let bob = family.add_member("bob", "Bob", Gender::Male)?;
//! let carol = family.add_member("carol", "Carol", Gender::Female)?;
//! family.add_parent(&alice, &bob)?;
//! family.marry(&bob, &carol)?;
//!
//! let answer = infer_relationship(&family, "Alice", "Carol")?;
//! assert_eq!(answer, Answer::Label { label: "daughter-in-law".into() });
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod inference;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{FamilyPath, Gender, Member, MemberId, Step};
pub use storage::{FamilySnapshot, FamilyStore, MemoryStore};
pub use inference::{
    compose, find_paths, resolve, Inference, InferenceEngine, Relation, SearchBounds, Token,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// Caller-facing entry point
// ============================================================================

/// Answer shape handed to front ends.
///
/// Serializes as `{"label": "..."}` or `{"no_relation": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Label { label: String },
    NoRelation { no_relation: bool },
}

impl From<Inference> for Answer {
    fn from(inference: Inference) -> Self {
        match inference {
            Inference::Related(rel) => Answer::Label { label: rel.label },
            Inference::NoRelation => Answer::NoRelation { no_relation: true },
        }
    }
}

/// What `b` is to `a`, with both given as an id or a unique display name.
///
/// Uses the default search bounds.
pub fn infer_relationship<S: FamilyStore + ?Sized>(store: &S, a: &str, b: &str) -> Result<Answer> {
    let a = store.resolve(a)?;
    let b = store.resolve(b)?;
    InferenceEngine::default().infer(store, &a.id, &b.id).map(Answer::from)
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown member: {0}")]
    UnknownMember(String),

    #[error("Ambiguous member name '{name}': {matches} members share it")]
    AmbiguousMember { name: String, matches: usize },

    #[error("Duplicate member: {0}")]
    DuplicateMember(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
