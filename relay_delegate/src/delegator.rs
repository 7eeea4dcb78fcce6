// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding surface: delegation roots, synthesized bindings, and listener dispatch.
//!
//! A [`Delegator`] owns everything a host needs to wire delegated events:
//!
//! - Registering a delegation root installs one listener per `(root, event)`
//!   pair. Registering the same pair again is a no-op.
//! - Each plain event name also synthesizes two binding names
//!   (`delegatedClick` and `delegatedParentClick` for `click`). The host applies
//!   them to nodes with [`Delegator::apply_binding`], which stashes the handler
//!   in the [`HandlerStore`] instead of on the node.
//! - [`Delegator::dispatch`] delivers a native event the way a browser would:
//!   target first, then each ancestor, running that node's delegated listener
//!   and stopping once the event's propagation is stopped.
//!
//! ```
//! use relay_delegate::delegator::Delegator;
//! use relay_delegate::event::DomEvent;
//! use relay_delegate::types::{Action, BindingContext, DataItem, Handler};
//! # use relay_delegate::types::DomLookup;
//! # struct Dom;
//! # impl DomLookup<u32> for Dom {
//! #     fn parent_of(&self, n: &u32) -> Option<u32> { (*n > 0).then(|| n - 1) }
//! #     fn is_element(&self, _: &u32) -> bool { true }
//! #     fn is_disabled(&self, _: &u32) -> bool { false }
//! #     fn attribute(&self, _: &u32, _: &str) -> Option<&str> { None }
//! # }
//! #[derive(Clone)]
//! struct Row;
//! impl DataItem<u32, DomEvent<u32>> for Row {
//!     fn method(&self, _: &str) -> Option<Action<u32, Self, DomEvent<u32>>> { None }
//! }
//!
//! let mut delegator = Delegator::<u32, Row, DomEvent<u32>>::new();
//! assert_eq!(delegator.register_delegation_root(0, ["click"], &()), 1);
//! assert_eq!(delegator.register_delegation_root(0, ["click"], &()), 0);
//!
//! delegator
//!     .apply_binding(2, "delegatedClick", Handler::action(|_, _| false))
//!     .unwrap();
//!
//! let contexts: hashbrown::HashMap<u32, BindingContext<Row>> =
//!     (0..=3).map(|n| (n, BindingContext::new(Row))).collect();
//! let mut ev = DomEvent::new("click", 3);
//! assert_eq!(delegator.dispatch(&Dom, &contexts, &mut ev), Some(0));
//! assert!(ev.default_prevented());
//! ```

use alloc::string::String;
use core::fmt;
use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::conventions::Conventions;
use crate::dispatcher::{Disposition, invoke};
use crate::error::BindError;
use crate::event::NativeEvent;
use crate::registry::ActionRegistry;
use crate::resolver::Strategy;
use crate::router::{Outcome, propagation_path, run};
use crate::store::HandlerStore;
use crate::types::{ContextLookup, DataItem, DomLookup, Handler, Scope};

/// Companion boolean bindings present on a delegation root element.
///
/// Only `delegated<Event>Bubble` is read. A flag that is absent or not `true`
/// keeps the default of stopping propagation after a handled event.
pub trait CompanionBindings {
    /// Value of the boolean binding `name`, if present.
    fn flag(&self, name: &str) -> Option<bool>;
}

impl CompanionBindings for () {
    fn flag(&self, _: &str) -> Option<bool> {
        None
    }
}

impl CompanionBindings for [(&str, bool)] {
    fn flag(&self, name: &str) -> Option<bool> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> CompanionBindings for [(&str, bool); N] {
    fn flag(&self, name: &str) -> Option<bool> {
        self.as_slice().flag(name)
    }
}

impl<S: BuildHasher> CompanionBindings for HashMap<String, bool, S> {
    fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

/// A synthesized binding: which store scope and event it writes.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ExtensionPoint {
    scope: Scope,
    event: String,
}

/// The one listener installed for a `(root, event)` pair.
struct Listener<K, D, E> {
    event: String,
    bubble: bool,
    strategy: Strategy<K, D, E>,
}

/// Delegated event wiring for one document.
pub struct Delegator<K, D, E> {
    conventions: Conventions,
    actions: ActionRegistry<K, D, E>,
    store: HandlerStore<K, D, E>,
    bindings: HashMap<String, ExtensionPoint>,
    listeners: HashMap<K, SmallVec<[Listener<K, D, E>; 2]>>,
}

impl<K, D, E> Debug for Delegator<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegator")
            .field("conventions", &self.conventions)
            .field("bindings", &self.bindings.len())
            .field(
                "listeners",
                &self.listeners.values().map(SmallVec::len).sum::<usize>(),
            )
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash + Debug, D, E> Default for Delegator<K, D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug, D, E> Delegator<K, D, E> {
    /// A delegator with default conventions and a fresh action registry.
    pub fn new() -> Self {
        Self::with_conventions(Conventions::default())
    }

    /// A delegator with explicit naming conventions.
    pub fn with_conventions(conventions: Conventions) -> Self {
        Self {
            conventions,
            actions: ActionRegistry::new(),
            store: HandlerStore::new(),
            bindings: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Builder: share an existing action registry.
    pub fn with_registry(mut self, actions: ActionRegistry<K, D, E>) -> Self {
        self.actions = actions;
        self
    }

    /// The naming conventions in use.
    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// The action registry. Clone it to register actions from elsewhere.
    pub fn actions(&self) -> &ActionRegistry<K, D, E> {
        &self.actions
    }

    /// The handler store.
    pub fn store(&self) -> &HandlerStore<K, D, E> {
        &self.store
    }

    /// Mutable access to the handler store.
    pub fn store_mut(&mut self) -> &mut HandlerStore<K, D, E> {
        &mut self.store
    }

    /// Register `root` as a delegation root for each of `events`.
    ///
    /// Blank names are skipped. For each remaining name the two binding names
    /// are synthesized if missing, and a listener using attribute/store
    /// resolution is installed unless one already exists for the pair. The
    /// `delegated<Event>Bubble` companion set to `true` lets handled events keep
    /// bubbling past `root`.
    ///
    /// Returns the number of newly installed listeners.
    pub fn register_delegation_root<S, C>(
        &mut self,
        root: K,
        events: impl IntoIterator<Item = S>,
        companions: &C,
    ) -> usize
    where
        S: AsRef<str>,
        C: CompanionBindings + ?Sized,
    {
        let mut installed = 0;
        for name in events {
            let event = name.as_ref();
            if event.trim().is_empty() {
                continue;
            }
            self.synthesize(event);
            let bubble = self.bubble_flag(event, companions);
            if self.install(root, event, bubble, Strategy::Direct) {
                installed += 1;
            }
        }
        installed
    }

    /// Register `root` with an explicit handler per event.
    ///
    /// Descendants select a handler with `data-<event>-parent` markers, and the
    /// data bound to `root` is the receiver. No bindings are synthesized.
    ///
    /// Returns the number of newly installed listeners.
    pub fn register_parent_delegation_root<S, C>(
        &mut self,
        root: K,
        handlers: impl IntoIterator<Item = (S, Handler<K, D, E>)>,
        companions: &C,
    ) -> usize
    where
        S: AsRef<str>,
        C: CompanionBindings + ?Sized,
    {
        let mut installed = 0;
        for (name, handler) in handlers {
            let event = name.as_ref();
            if event.trim().is_empty() {
                continue;
            }
            let bubble = self.bubble_flag(event, companions);
            if self.install(root, event, bubble, Strategy::ParentScoped(handler)) {
                installed += 1;
            }
        }
        installed
    }

    /// Apply a synthesized binding to `node`, stashing `handler` in the store.
    ///
    /// Re-applying replaces the previous handler.
    pub fn apply_binding(
        &mut self,
        node: K,
        binding: &str,
        handler: Handler<K, D, E>,
    ) -> Result<(), BindError> {
        let point = self
            .bindings
            .get(binding)
            .ok_or_else(|| BindError::UnknownBinding {
                name: binding.into(),
            })?;
        tracing::trace!(?node, binding, "delegated binding applied");
        self.store.set(node, point.scope, &point.event, handler);
        Ok(())
    }

    /// Whether a binding with this name has been synthesized.
    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Scope and event name a synthesized binding writes to.
    pub fn binding(&self, name: &str) -> Option<(Scope, &str)> {
        self.bindings
            .get(name)
            .map(|p| (p.scope, p.event.as_str()))
    }

    /// All synthesized binding names, in no particular order.
    pub fn binding_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.keys().map(String::as_str)
    }

    /// Whether `root` has a listener for `event`.
    pub fn has_listener(&self, root: &K, event: &str) -> bool {
        self.listener(root, event).is_some()
    }

    /// Whether the listener `root` has for `event` is parent-scoped.
    ///
    /// `None` when there is no such listener.
    pub fn listener_is_parent_scoped(&self, root: &K, event: &str) -> Option<bool> {
        self.listener(root, event)
            .map(|l| l.strategy.is_parent_scoped())
    }

    /// Total number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(SmallVec::len).sum()
    }

    /// Drop everything owned by a disposed node: its stashed handlers and, if it
    /// was a delegation root, its listeners.
    pub fn forget(&mut self, node: &K) {
        self.store.clear_node(node);
        if let Some(removed) = self.listeners.remove(node) {
            tracing::debug!(?node, listeners = removed.len(), "delegation root forgotten");
        }
    }

    fn listener(&self, root: &K, event: &str) -> Option<&Listener<K, D, E>> {
        self.listeners
            .get(root)?
            .iter()
            .find(|l| l.event == event)
    }

    fn synthesize(&mut self, event: &str) {
        for (name, scope) in [
            (self.conventions.binding_name(event), Scope::Direct),
            (self.conventions.parent_binding_name(event), Scope::Parent),
        ] {
            self.bindings.entry(name).or_insert_with(|| ExtensionPoint {
                scope,
                event: event.into(),
            });
        }
    }

    fn bubble_flag<C: CompanionBindings + ?Sized>(&self, event: &str, companions: &C) -> bool {
        companions.flag(&self.conventions.bubble_binding_name(event)) == Some(true)
    }

    fn install(&mut self, root: K, event: &str, bubble: bool, strategy: Strategy<K, D, E>) -> bool {
        let slots = self.listeners.entry(root).or_default();
        if let Some(existing) = slots.iter().find(|l| l.event == event) {
            if existing.strategy.is_parent_scoped() == strategy.is_parent_scoped() {
                tracing::trace!(?root, event, "listener already installed");
            } else {
                tracing::debug!(
                    ?root,
                    event,
                    installed = ?existing.strategy,
                    "listener of the other kind already installed, registration ignored"
                );
            }
            return false;
        }
        slots.push(Listener {
            event: event.into(),
            bubble,
            strategy,
        });
        tracing::debug!(?root, event, bubble, "delegated listener installed");
        true
    }
}

impl<K, D, E> Delegator<K, D, E>
where
    K: Copy + Eq + Hash + Debug,
    D: Clone + DataItem<K, E>,
    E: NativeEvent<K>,
{
    /// Run the listener installed at `root` for the event's type.
    pub fn handle(
        &self,
        root: K,
        dom: &impl DomLookup<K>,
        contexts: &impl ContextLookup<K, D>,
        event: &mut E,
    ) -> Disposition {
        let Some(listener) = self.listener(&root, event.event_type()) else {
            return Disposition::NoListener;
        };
        let origin = event.target();
        let resolution = listener.strategy.resolve(
            dom,
            &self.store,
            contexts,
            &self.conventions,
            origin,
            root,
            &listener.event,
        );
        invoke(
            resolution,
            root,
            &listener.event,
            listener.bubble,
            dom,
            contexts,
            &self.actions,
            &self.conventions,
            event,
        )
    }

    /// Deliver `event` from its target up through every ancestor.
    ///
    /// Each node's delegated listener for the event type runs in turn until the
    /// event's propagation is stopped. Returns the node where that happened, or
    /// `None` if the event reached the top of the tree.
    pub fn dispatch(
        &self,
        dom: &impl DomLookup<K>,
        contexts: &impl ContextLookup<K, D>,
        event: &mut E,
    ) -> Option<K> {
        let path = propagation_path(dom, event.target());
        run(&path, event, |d, event| {
            let disposition = self.handle(d.node, dom, contexts, event);
            if disposition != Disposition::NoListener {
                tracing::trace!(node = ?d.node, phase = ?d.phase, ?disposition, "listener ran");
            }
            if event.propagation_stopped() {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        })
        .map(|d| d.node)
    }
}
