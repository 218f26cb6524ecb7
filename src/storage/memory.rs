//! In-memory family store.
//!
//! This is the reference implementation of `FamilyStore`.
//! It uses hash maps protected by RwLock.
//!
//! ## Guarantees
//!
//! Every mutation checks the graph invariants before touching state:
//!
//! - no self loops, no duplicate edges
//! - at most two parents per member, no member is their own ancestor
//! - marriages are stored in both directions, one spouse per member
//!
//! Readers see either the state before or after a mutation, but a query
//! running concurrently with writes may observe two different states
//! across its calls. Build the graph first, then query it.

use std::io::{Read, Write};
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use tracing::trace;

use crate::model::*;
use crate::{Error, Result};
use super::{FamilySnapshot, FamilyStore};

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory family graph.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug)]
struct MemoryInner {
    members: RwLock<HashMap<MemberId, Member>>,
    edges: RwLock<Adjacency>,
}

/// Sorted adjacency lists, keyed by member.
#[derive(Debug, Default)]
struct Adjacency {
    children: HashMap<MemberId, Vec<MemberId>>,
    parents: HashMap<MemberId, Vec<MemberId>>,
    spouses: HashMap<MemberId, Vec<MemberId>>,
}

impl Adjacency {
    fn list(map: &HashMap<MemberId, Vec<MemberId>>, id: &MemberId) -> Vec<MemberId> {
        map.get(id).cloned().unwrap_or_default()
    }

    fn link(map: &mut HashMap<MemberId, Vec<MemberId>>, from: &MemberId, to: &MemberId) {
        let list = map.entry(from.clone()).or_default();
        if let Err(pos) = list.binary_search(to) {
            list.insert(pos, to.clone());
        }
    }

    /// True if `candidate` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, candidate: &MemberId, id: &MemberId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            if &current == candidate {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(parents) = self.parents.get(&current) {
                stack.extend(parents.iter().cloned());
            }
        }
        false
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                members: RwLock::new(HashMap::new()),
                edges: RwLock::new(Adjacency::default()),
            }),
        }
    }

    fn require(&self, id: &MemberId) -> Result<()> {
        if self.inner.members.read().contains_key(id) {
            Ok(())
        } else {
            Err(Error::UnknownMember(id.to_string()))
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a member with no edges.
    pub fn add_member(
        &self,
        id: impl Into<MemberId>,
        name: impl Into<String>,
        gender: Gender,
    ) -> Result<MemberId> {
        let member = Member::new(id, name, gender);
        let id = member.id.clone();
        let mut members = self.inner.members.write();
        if members.contains_key(&id) {
            return Err(Error::DuplicateMember(id.to_string()));
        }
        trace!(member = %id, "add member");
        members.insert(id.clone(), member);
        Ok(id)
    }

    /// Record `parent` —PARENT_OF→ `child`.
    pub fn add_parent(&self, parent: &MemberId, child: &MemberId) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if parent == child {
            return Err(Error::ConstraintViolation(format!("{parent} cannot be their own parent")));
        }

        let mut edges = self.inner.edges.write();
        let parents = Adjacency::list(&edges.parents, child);
        if parents.contains(parent) {
            return Err(Error::ConstraintViolation(format!("{parent} is already a parent of {child}")));
        }
        if parents.len() >= 2 {
            return Err(Error::ConstraintViolation(format!("{child} already has two parents")));
        }
        if edges.is_ancestor_or_self(child, parent) {
            return Err(Error::ConstraintViolation(format!(
                "{child} is an ancestor of {parent}; the edge would form a cycle"
            )));
        }

        trace!(%parent, %child, "add PARENT_OF");
        Adjacency::link(&mut edges.children, parent, child);
        Adjacency::link(&mut edges.parents, child, parent);
        Ok(())
    }

    /// Record a marriage between `a` and `b`, in both directions.
    pub fn marry(&self, a: &MemberId, b: &MemberId) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Err(Error::ConstraintViolation(format!("{a} cannot marry themselves")));
        }

        let mut edges = self.inner.edges.write();
        for (who, other) in [(a, b), (b, a)] {
            if let Some(current) = edges.spouses.get(who).and_then(|s| s.first()) {
                return Err(Error::ConstraintViolation(format!(
                    "{who} is already married to {current}; cannot marry {other}"
                )));
            }
        }

        trace!(%a, %b, "add SPOUSE_OF");
        Adjacency::link(&mut edges.spouses, a, b);
        Adjacency::link(&mut edges.spouses, b, a);
        Ok(())
    }

    /// Add a new member as the child of `parent` and of `parent`'s spouse.
    ///
    /// The parent must be married.
    pub fn have_child(
        &self,
        id: impl Into<MemberId>,
        name: impl Into<String>,
        gender: Gender,
        parent: &MemberId,
    ) -> Result<MemberId> {
        self.require(parent)?;
        let spouse = self
            .spouses_of(parent)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ConstraintViolation(format!("{parent} is not married")))?;

        let child = self.add_member(id, name, gender)?;
        self.add_parent(parent, &child)?;
        self.add_parent(&spouse, &child)?;
        Ok(child)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Capture the whole graph, sorted for stable output.
    pub fn snapshot(&self) -> FamilySnapshot {
        let mut members: Vec<Member> = self.inner.members.read().values().cloned().collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));

        let edges = self.inner.edges.read();
        let mut parent_of: Vec<(MemberId, MemberId)> = edges
            .children
            .iter()
            .flat_map(|(p, cs)| cs.iter().map(move |c| (p.clone(), c.clone())))
            .collect();
        parent_of.sort();

        let mut spouse_of: Vec<(MemberId, MemberId)> = edges
            .spouses
            .iter()
            .flat_map(|(a, ss)| ss.iter().filter(move |b| a < *b).map(move |b| (a.clone(), b.clone())))
            .collect();
        spouse_of.sort();

        FamilySnapshot { members, parent_of, spouse_of }
    }

    /// Rebuild a store from a snapshot, re-checking every invariant.
    pub fn from_snapshot(snapshot: FamilySnapshot) -> Result<Self> {
        let store = Self::new();
        for member in snapshot.members {
            store.add_member(member.id, member.name, member.gender)?;
        }
        for (parent, child) in &snapshot.parent_of {
            store.add_parent(parent, child)?;
        }
        for (a, b) in &snapshot.spouse_of {
            // Tolerate snapshots that list a marriage from both sides.
            if store.spouses_of(a)?.contains(b) {
                continue;
            }
            store.marry(a, b)?;
        }
        Ok(store)
    }

    /// Write the graph as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.snapshot()).map_err(json_error)
    }

    /// Load a graph from JSON produced by `write_json`.
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let snapshot: FamilySnapshot = serde_json::from_reader(reader).map_err(json_error)?;
        Self::from_snapshot(snapshot)
    }
}

/// Failures of the underlying reader or writer surface as `Error::Io`.
fn json_error(e: serde_json::Error) -> Error {
    if e.is_io() { Error::Io(e.into()) } else { Error::Json(e) }
}

// ============================================================================
// FamilyStore impl
// ============================================================================

impl FamilyStore for MemoryStore {
    fn get_member(&self, id: &MemberId) -> Result<Member> {
        self.inner
            .members
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownMember(id.to_string()))
    }

    fn children_of(&self, id: &MemberId) -> Result<Vec<MemberId>> {
        self.require(id)?;
        Ok(Adjacency::list(&self.inner.edges.read().children, id))
    }

    fn parents_of(&self, id: &MemberId) -> Result<Vec<MemberId>> {
        self.require(id)?;
        Ok(Adjacency::list(&self.inner.edges.read().parents, id))
    }

    fn spouses_of(&self, id: &MemberId) -> Result<Vec<MemberId>> {
        self.require(id)?;
        Ok(Adjacency::list(&self.inner.edges.read().spouses, id))
    }

    fn members(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self.inner.members.read().values().cloned().collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }

    fn member_count(&self) -> usize {
        self.inner.members.read().len()
    }

    fn contains(&self, id: &MemberId) -> bool {
        self.inner.members.read().contains_key(id)
    }
}

// ============================================================================
// Tests
// ============================================================================
