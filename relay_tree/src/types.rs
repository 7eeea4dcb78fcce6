// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers, kinds, flags, and local node data.

use alloc::string::String;
use smallvec::SmallVec;

/// Identifier for a node in the tree (generational).
///
/// A removed node's slot may be reused, but the generation is bumped so the old
/// identifier stays stale forever.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling interactivity.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is explicitly non-interactive (the `disabled` property).
        const DISABLED = 0b0000_0001;
    }
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a tag name.
    Element(String),
    /// A text node with its content.
    Text(String),
}

impl NodeKind {
    /// Whether this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}

/// Local data for a node: kind, flags and attributes.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Element or text.
    pub kind: NodeKind,
    /// Interaction flags.
    pub flags: NodeFlags,
    /// Attributes in insertion order. Text nodes keep this empty.
    pub attributes: SmallVec<[(String, String); 4]>,
}

impl LocalNode {
    /// An element node with no attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element(tag.into()),
            flags: NodeFlags::empty(),
            attributes: SmallVec::new(),
        }
    }

    /// A text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(content.into()),
            flags: NodeFlags::empty(),
            attributes: SmallVec::new(),
        }
    }

    /// Builder: add or replace an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Builder: set flags.
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::element("div")
    }
}
