//! Path enumerator — lazy breadth-first search for connecting paths.
//!
//! Paths come out in non-decreasing length. Every path of a given length
//! is produced before any longer one, so callers can stop as soon as the
//! length grows past the best candidate they hold.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::*;
use crate::storage::FamilyStore;
use crate::Result;

// ============================================================================
// Search bounds
// ============================================================================

/// Limits on the paths the enumerator will walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    /// Generations climbed (PARENT steps) per path.
    pub max_up: u32,
    /// Generations descended (CHILD steps) per path.
    pub max_down: u32,
    /// Marriages crossed (SPOUSE steps) per path.
    pub max_spouse_steps: u32,
    /// Partial paths expanded before the search gives up.
    pub step_budget: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_up: 4,
            max_down: 4,
            max_spouse_steps: 1,
            step_budget: 100_000,
        }
    }
}

// ============================================================================
// Enumerator
// ============================================================================

#[derive(Debug, Clone)]
struct Frontier {
    path: FamilyPath,
    up: u32,
    down: u32,
    spouse: u32,
}

impl Frontier {
    fn admits(&self, step: Step, bounds: &SearchBounds) -> bool {
        match step {
            Step::Parent => self.up < bounds.max_up,
            Step::Child => self.down < bounds.max_down,
            Step::Spouse => self.spouse < bounds.max_spouse_steps,
        }
    }

    fn extend(&self, step: Step, member: MemberId) -> Self {
        let mut next = Self {
            path: self.path.extended(step, member),
            up: self.up,
            down: self.down,
            spouse: self.spouse,
        };
        match step {
            Step::Parent => next.up += 1,
            Step::Child => next.down += 1,
            Step::Spouse => next.spouse += 1,
        }
        next
    }
}

/// Iterator over every path from `source` to `target` within bounds.
///
/// No path visits a member twice. An empty iterator means the two members
/// are not connected within bounds, which is not an error.
pub struct PathEnumerator<'s, S: FamilyStore + ?Sized> {
    store: &'s S,
    target: MemberId,
    bounds: SearchBounds,
    queue: VecDeque<Frontier>,
    expanded: usize,
}

/// Start a lazy search from `source` towards `target`.
pub fn find_paths<'s, S: FamilyStore + ?Sized>(
    store: &'s S,
    source: &MemberId,
    target: &MemberId,
    bounds: SearchBounds,
) -> PathEnumerator<'s, S> {
    let mut queue = VecDeque::new();
    queue.push_back(Frontier {
        path: FamilyPath::single(source.clone()),
        up: 0,
        down: 0,
        spouse: 0,
    });
    PathEnumerator {
        store,
        target: target.clone(),
        bounds,
        queue,
        expanded: 0,
    }
}

impl<S: FamilyStore + ?Sized> PathEnumerator<'_, S> {
    /// Partial paths expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn expand(&mut self, frontier: &Frontier) -> Result<()> {
        let tip = frontier.path.end();
        for (step, next) in self.store.neighbors(tip)? {
            if !frontier.admits(step, &self.bounds) || frontier.path.contains(&next) {
                continue;
            }
            self.queue.push_back(frontier.extend(step, next));
        }
        Ok(())
    }
}

impl<S: FamilyStore + ?Sized> Iterator for PathEnumerator<'_, S> {
    type Item = Result<FamilyPath>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frontier) = self.queue.pop_front() {
            if frontier.path.end() == &self.target {
                return Some(Ok(frontier.path));
            }

            if self.expanded >= self.bounds.step_budget {
                warn!(
                    target_member = %self.target,
                    budget = self.bounds.step_budget,
                    "path search exhausted its step budget",
                );
                self.queue.clear();
                return None;
            }
            self.expanded += 1;

            if let Err(e) = self.expand(&frontier) {
                self.queue.clear();
                return Some(Err(e));
            }
        }
        None
    }
}
