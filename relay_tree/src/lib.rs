// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relay Tree: a small generational node arena standing in for a document tree.
//!
//! The tree models just enough of a host document for delegated event dispatch:
//!
//! - Element and text nodes ([`NodeKind`]) linked by parent/children edges.
//! - String attributes on elements (`data-click="save"` and friends).
//! - Interaction flags ([`NodeFlags`]), currently just [`NodeFlags::DISABLED`].
//! - Generational identifiers ([`NodeId`]) so stale handles never alias a reused slot.
//!
//! It does not parse markup, lay anything out, or deliver events. Event delivery
//! lives in `relay_delegate`, which reads this tree through its `DomLookup` seam.
//!
//! ## Example
//!
//! ```rust
//! use relay_tree::{LocalNode, NodeFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let list = tree.insert(None, LocalNode::element("ul"));
//! let item = tree.insert(
//!     Some(list),
//!     LocalNode::element("li").with_attribute("data-click", "open"),
//! );
//!
//! assert_eq!(tree.parent_of(item), Some(list));
//! assert_eq!(tree.attribute(item, "data-click"), Some("open"));
//!
//! tree.set_flags(item, NodeFlags::DISABLED);
//! assert!(tree.is_disabled(item));
//!
//! tree.remove(list);
//! assert!(!tree.is_alive(item));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{LocalNode, NodeFlags, NodeId, NodeKind};
