//! # Family Graph Model
//!
//! DTOs shared by the store and the inference engine.
//! This module is pure data — no I/O, no state.

pub mod member;
pub mod step;
pub mod path;

pub use member::{Gender, Member, MemberId};
pub use step::Step;
pub use path::{FamilyPath, Steps};
