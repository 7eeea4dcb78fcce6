// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to concrete document trees.
//!
//! Each adapter is gated behind a feature flag so the core stays free of any
//! particular tree representation.
//!
//! ## Available Adapters
//!
//! - [`tree`] (`tree_adapter` feature): [`DomLookup`](crate::types::DomLookup)
//!   for [`relay_tree::Tree`], keyed by [`relay_tree::NodeId`].

#[cfg(feature = "tree_adapter")]
pub mod tree;
