// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`DomLookup`] for [`relay_tree::Tree`].
//!
//! ## Feature
//!
//! Enable with `tree_adapter` (on by default).
//!
//! Stale [`NodeId`]s read as detached, non-element nodes with no attributes, so a
//! listener handling an event for a removed node resolves nothing.

use relay_tree::{NodeId, Tree};

use crate::types::DomLookup;

impl DomLookup<NodeId> for Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent_of(self, *node)
    }

    fn is_element(&self, node: &NodeId) -> bool {
        Self::is_element(self, *node)
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        Self::is_disabled(self, *node)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<&str> {
        Self::attribute(self, *node, name)
    }
}
