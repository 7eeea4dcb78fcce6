// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, attributes, flags, queries.

use alloc::{string::String, vec::Vec};

use crate::types::{LocalNode, NodeFlags, NodeId, NodeKind};

/// Top-level node tree.
///
/// Nodes live in slots; removing a node frees its slot (and its subtree's
/// slots) for reuse with a bumped generation. Every accessor takes a
/// [`NodeId`] and treats stale identifiers as absent: queries return `None`
/// (or `false`/empty) and mutations are ignored.
///
/// ## Example
///
/// ```rust
/// use relay_tree::{LocalNode, Tree};
///
/// let mut tree = Tree::new();
/// let form = tree.insert(None, LocalNode::element("form"));
/// let button = tree.insert(Some(form), LocalNode::element("button"));
///
/// tree.set_attribute(button, "data-submit", "save");
/// assert_eq!(tree.attribute(button, "data-submit"), Some("save"));
/// assert_eq!(tree.ancestors(button).collect::<Vec<_>>(), vec![button, form]);
/// ```
#[derive(Clone, Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId indices are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its subtree. Their identifiers become stale immediately.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut stack = alloc::vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(cur.idx());
            }
        }
    }

    /// Reparent `id` under `new_parent` (or detach it as a root if `None`).
    ///
    /// Moving a node under its own descendant is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.ancestors(p).any(|a| a == id))
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.live(id).and_then(|node| node.parent)
    }

    /// Get the children of a node, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.live(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate from `id` (inclusive) up to its tree root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.is_alive(id).then_some(id);
        core::iter::successors(start, move |&cur| self.parent_of(cur))
    }

    /// Returns the kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.live(id).map(|n| &n.local.kind)
    }

    /// Whether `id` is a live element node.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(NodeKind::is_element)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.live(id).map(|n| n.local.flags)
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Whether a live node carries [`NodeFlags::DISABLED`].
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::DISABLED))
    }

    /// Toggle [`NodeFlags::DISABLED`] on a node.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags.set(NodeFlags::DISABLED, disabled);
        }
    }

    /// Read an attribute. Text nodes never have attributes.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.live(id).and_then(|n| n.local.attribute(name))
    }

    /// Whether the node carries an attribute, even an empty one.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set or replace an attribute on a live element. Ignored for text nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        if !n.local.kind.is_element() {
            return;
        }
        let value = value.into();
        match n.local.attributes.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => n.local.attributes.push((name.into(), value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let n = self.node_opt_mut(id)?;
        let pos = n.local.attributes.iter().position(|(k, _)| k == name)?;
        Some(n.local.attributes.remove(pos).1)
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn live(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::element("div"));
        let a = tree.insert(Some(root), LocalNode::element("span"));

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        tree.remove(a);
        assert!(!tree.is_alive(a));

        // Insert new child; might reuse slot but generation bumps.
        let b = tree.insert(Some(root), LocalNode::element("span"));
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn parent_of_respects_liveness_and_roots() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::element("div"));
        let child = tree.insert(Some(root), LocalNode::element("div"));
        assert_eq!(tree.parent_of(child), Some(root));
        assert_eq!(tree.parent_of(root), None);
        tree.remove(child);
        assert_eq!(tree.parent_of(child), None);
        assert!(tree.children_of(root).is_empty());
    }

    #[test]
    fn remove_takes_whole_subtree() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::element("ul"));
        let li = tree.insert(Some(root), LocalNode::element("li"));
        let text = tree.insert(Some(li), LocalNode::text("hello"));
        tree.remove(li);
        assert!(tree.is_alive(root));
        assert!(!tree.is_alive(li));
        assert!(!tree.is_alive(text));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn ancestors_walk_to_root_inclusive() {
        let mut tree = Tree::new();
        let a = tree.insert(None, LocalNode::element("div"));
        let b = tree.insert(Some(a), LocalNode::element("div"));
        let c = tree.insert(Some(b), LocalNode::text("x"));
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![c, b, a]);
        tree.remove(b);
        assert_eq!(tree.ancestors(c).count(), 0);
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = Tree::new();
        let a = tree.insert(None, LocalNode::element("div"));
        let b = tree.insert(Some(a), LocalNode::element("div"));
        tree.reparent(a, Some(b));
        assert_eq!(tree.parent_of(a), None);
        assert_eq!(tree.parent_of(b), Some(a));

        let c = tree.insert(None, LocalNode::element("div"));
        tree.reparent(b, Some(c));
        assert_eq!(tree.parent_of(b), Some(c));
        assert!(tree.children_of(a).is_empty());
        assert_eq!(tree.children_of(c), &[b]);
    }

    #[test]
    fn attributes_only_on_elements() {
        let mut tree = Tree::new();
        let el = tree.insert(None, LocalNode::element("a").with_attribute("href", "#"));
        let text = tree.insert(Some(el), LocalNode::text("go"));

        tree.set_attribute(el, "data-click", "go");
        tree.set_attribute(text, "data-click", "go");
        assert_eq!(tree.attribute(el, "href"), Some("#"));
        assert_eq!(tree.attribute(el, "data-click"), Some("go"));
        assert_eq!(tree.attribute(text, "data-click"), None);

        tree.set_attribute(el, "data-click", "");
        assert!(tree.has_attribute(el, "data-click"));
        assert_eq!(tree.remove_attribute(el, "data-click").as_deref(), Some(""));
        assert!(!tree.has_attribute(el, "data-click"));
    }

    #[test]
    fn disabled_flag_round_trips() {
        let mut tree = Tree::new();
        let button = tree.insert(None, LocalNode::element("button"));
        assert!(!tree.is_disabled(button));
        tree.set_disabled(button, true);
        assert!(tree.is_disabled(button));
        assert_eq!(tree.flags(button), Some(NodeFlags::DISABLED));
        tree.set_disabled(button, false);
        assert!(!tree.is_disabled(button));
    }

    #[test]
    fn disabled_is_the_only_flag() {
        let mut tree = Tree::new();
        let button = tree.insert(None, LocalNode::element("button"));
        tree.set_flags(button, NodeFlags::all());
        assert!(tree.is_disabled(button));
        assert_eq!(NodeFlags::all(), NodeFlags::DISABLED);
    }
}
