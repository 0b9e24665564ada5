//! The transiency graph: who is transient for whom.
//!
//! Ownership is modeled as a directed edge-replacement structure: every
//! window has at most one outgoing "transient for" edge, and the latest
//! written edge wins. Concurrent clients can race to swap transiencies
//! between two dialogs, momentarily requesting a two-cycle; the graph
//! resolves it deterministically by dropping the older, now-contradicted
//! edge. Longer would-be cycles have no such resolution and are rejected.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::errors::TransiencyError;
use crate::registry::{WindowHandle, WindowRegistry};

/// Relation of two windows in the transiency forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransiencyRelation {
    /// The first window is an ancestor of the second.
    Ancestor,
    /// The first window is a descendant of the second.
    Descendant,
    /// No transiency relation between the two.
    Unrelated,
}

/// Parent/child transient-for relations among windows.
#[derive(Debug, Default)]
pub struct TransiencyGraph {
    parents: HashMap<WindowHandle, WindowHandle>,
    children: HashMap<WindowHandle, Vec<WindowHandle>>,
}

impl TransiencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the transient owner of `child`.
    ///
    /// If `child` and the requested parent currently form a direct
    /// two-cycle (the parent is already transient for `child`), the new
    /// edge wins and the old one is dropped. Any longer cycle is
    /// rejected with `TransiencyError::Cycle` and leaves the graph
    /// unchanged.
    pub fn set_parent(
        &mut self,
        child: WindowHandle,
        parent: Option<WindowHandle>,
    ) -> Result<(), TransiencyError> {
        let Some(parent) = parent else {
            self.remove_edge(child);
            return Ok(());
        };
        if parent == child {
            return Err(TransiencyError::SelfReference(child));
        }

        if self.ancestors(parent).contains(&child) {
            if self.parents.get(&parent) == Some(&child) {
                // Direct two-cycle: the newest request is authoritative,
                // the contradicted edge is silently dropped.
                debug!(%child, %parent, "breaking direct transiency cycle, newest edge wins");
                self.remove_edge(parent);
            } else {
                return Err(TransiencyError::Cycle { child, parent });
            }
        }

        self.remove_edge(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
        Ok(())
    }

    /// The transient owner of `child`, if any.
    pub fn parent_of(&self, child: WindowHandle) -> Option<WindowHandle> {
        self.parents.get(&child).copied()
    }

    /// The transient children of `parent`, in insertion order.
    pub fn children_of(&self, parent: WindowHandle) -> &[WindowHandle] {
        self.children
            .get(&parent)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The ancestor chain of `handle`, from immediate parent to root.
    ///
    /// The walk is bounded by a visited set, so it terminates even if an
    /// invariant breaks and a cycle survives.
    pub fn ancestors(&self, handle: WindowHandle) -> Vec<WindowHandle> {
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut current = handle;
        seen.insert(current);
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// The deepest mapped ancestor of `handle`, if any.
    ///
    /// A transient window rides its owner; when owners chain, the
    /// relevant anchor for stacking is the closest one that is actually
    /// part of the visible world.
    pub fn last_visible_parent(
        &self,
        handle: WindowHandle,
        registry: &WindowRegistry,
    ) -> Option<WindowHandle> {
        let mut last = None;
        for ancestor in self.ancestors(handle) {
            match registry.get(ancestor) {
                Ok(attrs) if attrs.mapped => last = Some(ancestor),
                _ => break,
            }
        }
        last
    }

    /// How `a` relates to `b` in the forest.
    pub fn relation(&self, a: WindowHandle, b: WindowHandle) -> TransiencyRelation {
        if self.ancestors(b).contains(&a) {
            TransiencyRelation::Ancestor
        } else if self.ancestors(a).contains(&b) {
            TransiencyRelation::Descendant
        } else {
            TransiencyRelation::Unrelated
        }
    }

    /// Removes a window from the graph entirely: its own edge and the
    /// edges of all its transient children, which are thereby promoted
    /// to their own band. Returns the promoted children.
    pub fn remove_window(&mut self, handle: WindowHandle) -> Vec<WindowHandle> {
        self.remove_edge(handle);
        let orphans = self.children.remove(&handle).unwrap_or_default();
        for orphan in &orphans {
            self.parents.remove(orphan);
        }
        orphans
    }

    fn remove_edge(&mut self, child: WindowHandle) {
        if let Some(parent) = self.parents.remove(&child) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|h| *h != child);
                if siblings.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
    }
}
