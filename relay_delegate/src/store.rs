// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Out-of-band handler storage keyed by node.
//!
//! Bindings stash handlers here instead of writing attributes. The store never
//! owns nodes: entries are keyed by node identity and dropped when the host
//! disposes the node ([`HandlerStore::clear_node`]) or sweeps stale keys
//! ([`HandlerStore::retain_nodes`]).

use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{Handler, Scope};

type Slots<K, D, E> = SmallVec<[(Scope, String, Handler<K, D, E>); 2]>;

/// Per-node handler side table.
pub struct HandlerStore<K, D, E> {
    nodes: HashMap<K, Slots<K, D, E>>,
}

impl<K: Copy + Eq + Hash, D, E> HandlerStore<K, D, E> {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Stash `handler` on `node` for `event`, replacing any previous value.
    pub fn set(&mut self, node: K, scope: Scope, event: &str, handler: Handler<K, D, E>) {
        let slots = self.nodes.entry(node).or_default();
        match slots
            .iter_mut()
            .find(|(s, e, _)| *s == scope && e == event)
        {
            Some(slot) => slot.2 = handler,
            None => slots.push((scope, event.into(), handler)),
        }
    }

    /// The handler stashed on `node` for `event`.
    pub fn get(&self, node: &K, scope: Scope, event: &str) -> Option<&Handler<K, D, E>> {
        self.nodes
            .get(node)?
            .iter()
            .find(|(s, e, _)| *s == scope && e == event)
            .map(|(_, _, h)| h)
    }

    /// Remove one handler.
    pub fn remove(&mut self, node: &K, scope: Scope, event: &str) -> Option<Handler<K, D, E>> {
        let slots = self.nodes.get_mut(node)?;
        let pos = slots
            .iter()
            .position(|(s, e, _)| *s == scope && e == event)?;
        let (_, _, handler) = slots.remove(pos);
        if slots.is_empty() {
            self.nodes.remove(node);
        }
        Some(handler)
    }

    /// Drop everything stashed on `node`.
    pub fn clear_node(&mut self, node: &K) {
        self.nodes.remove(node);
    }

    /// Keep only nodes for which `keep` returns true, e.g. `|id| tree.is_alive(*id)`.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.nodes.retain(|k, _| keep(k));
    }

    /// Number of stashed handlers across all nodes.
    pub fn len(&self) -> usize {
        self.nodes.values().map(SmallVec::len).sum()
    }

    /// Whether nothing is stashed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: Copy + Eq + Hash, D, E> Default for HandlerStore<K, D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, D, E> fmt::Debug for HandlerStore<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerStore")
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
