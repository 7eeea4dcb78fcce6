// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relay Delegate: delegated event dispatch for declarative UI bindings.
//!
//! ## Overview
//!
//! Instead of attaching a listener to every interactive element, a host
//! registers a few delegation roots. When an event bubbles up to a root, this
//! crate finds the element that should handle it, looks up the method to call,
//! and invokes it with the right receiver and data.
//!
//! Handlers are declared on elements in two ways:
//!
//! - An attribute naming a method, `data-click="save"`.
//! - A binding that stashes a handler in the [`HandlerStore`](store::HandlerStore)
//!   (`delegatedClick`, `delegatedParentClick`), applied with
//!   [`Delegator::apply_binding`](delegator::Delegator::apply_binding).
//!
//! A descendant marked `data-click-parent="key"` defers to a handler registered
//! higher up, in a parent scope.
//!
//! ## Layering
//!
//! - [`resolver`] walks from the event's origin to its delegation root and picks
//!   the handling element and method.
//! - [`dispatcher`] turns that into an action call, honoring disabled
//!   ancestors, and applies default-prevention and propagation control.
//! - [`registry`] holds actions available by name everywhere.
//! - [`router`] builds the target → bubble path a native event travels.
//! - [`delegator`] ties it together behind one owning struct.
//!
//! The host document and binding framework are reached through traits in
//! [`types`]: [`DomLookup`](types::DomLookup), [`ContextLookup`](types::ContextLookup)
//! and [`DataItem`](types::DataItem). [`adapters`] implements them for
//! `relay_tree`.
//!
//! ## Example
//!
//! ```
//! use relay_delegate::delegator::Delegator;
//! use relay_delegate::event::DomEvent;
//! use relay_delegate::types::{Action, BindingContext, DataItem};
//! use relay_tree::{LocalNode, Tree};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Todo(&'static str);
//!
//! impl DataItem<relay_tree::NodeId, DomEvent<relay_tree::NodeId>> for Todo {
//!     fn method(
//!         &self,
//!         _: &str,
//!     ) -> Option<Action<relay_tree::NodeId, Self, DomEvent<relay_tree::NodeId>>> {
//!         None
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let list = tree.insert(None, LocalNode::element("ul"));
//! let item = tree.insert(
//!     Some(list),
//!     LocalNode::element("li").with_attribute("data-click", "toggle"),
//! );
//! let label = tree.insert(Some(item), LocalNode::text("Milk"));
//!
//! let mut contexts = hashbrown::HashMap::new();
//! contexts.insert(list, BindingContext::new(Todo("list")));
//! contexts.insert(item, BindingContext::new(Todo("milk")));
//!
//! let mut delegator = Delegator::new();
//! delegator.register_delegation_root(list, ["click"], &());
//! delegator.actions().register_fn("toggle", |todo: &Todo, _| {
//!     assert_eq!(todo.0, "milk");
//!     false
//! });
//!
//! let mut ev = DomEvent::new("click", label);
//! assert_eq!(delegator.dispatch(&tree, &contexts, &mut ev), Some(list));
//! assert!(ev.default_prevented());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod conventions;
pub mod delegator;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod registry;
pub mod resolver;
pub mod router;
pub mod store;
pub mod types;

mod walk;

#[cfg(test)]
mod test_support;
