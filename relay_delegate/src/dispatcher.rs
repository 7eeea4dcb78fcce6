// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch controller: turn a resolution into an action call and event control.
//!
//! Given the resolver's answer for one delegated listener, [`invoke`]:
//!
//! 1. Reads the binding context of the resolution's element. No context, no dispatch.
//! 2. Re-walks from the element up to the delegation root. Any disabled node on the
//!    way vetoes the whole dispatch (the root itself is not checked).
//! 3. Resolves the action. A name is looked up in the [`ActionRegistry`], then on the
//!    bound data item, then on its ancestor data items (nearest first). A stored
//!    callable is used as-is, with the resolution's owner (or the data) as receiver.
//! 4. Calls it. Submit events get `(receiver = data, form = event target)`; everything
//!    else gets `(receiver = owner, data, event)`.
//! 5. Applies control to the native event: unless the action returned `true`, the
//!    default action is suppressed; unless bubbling is allowed for this listener,
//!    propagation is stopped.
//!
//! When nothing is invoked the native event is left untouched, so an unhandled
//! event keeps bubbling to an ancestor's own delegated listener.

use core::fmt::Debug;

use crate::conventions::Conventions;
use crate::event::{EventCaps, NativeEvent};
use crate::registry::ActionRegistry;
use crate::types::{
    Action, ActionArgs, BindingContext, ContextLookup, DataItem, DomLookup, Handler, Method,
    Resolution,
};
use crate::walk::disabled_below_root;

/// What one delegated listener did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// No listener is registered for this root and event type.
    NoListener,
    /// The resolver found no handler.
    NoMatch,
    /// The handling element has no binding context.
    NoContext,
    /// A disabled node between the handling element and the root vetoed dispatch.
    Disabled,
    /// The handler named nothing callable.
    NoAction,
    /// An action ran.
    Invoked {
        /// The default action was suppressed.
        default_prevented: bool,
        /// Propagation was stopped.
        bubbling_stopped: bool,
    },
}

impl Disposition {
    /// Whether an action ran.
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked { .. })
    }
}

/// Resolve the final action for `resolution` and run it against `event`.
///
/// `event_name` is the name the listener was registered for; `bubble` is that
/// listener's companion bubble flag.
pub fn invoke<K, D, E>(
    resolution: Option<Resolution<'_, K, D, E>>,
    root: K,
    event_name: &str,
    bubble: bool,
    dom: &impl DomLookup<K>,
    contexts: &impl ContextLookup<K, D>,
    actions: &ActionRegistry<K, D, E>,
    conventions: &Conventions,
    event: &mut E,
) -> Disposition
where
    K: Copy + Eq + Debug,
    D: Clone + DataItem<K, E>,
    E: NativeEvent<K>,
{
    let Some(resolution) = resolution else {
        return Disposition::NoMatch;
    };
    let element = resolution.element;
    let Some(context) = contexts.context_for(&element) else {
        tracing::trace!(?element, event = event_name, "handling element is not bound");
        return Disposition::NoContext;
    };
    if disabled_below_root(dom, element, root) {
        tracing::debug!(?element, event = event_name, "dispatch vetoed by disabled node");
        return Disposition::Disabled;
    }

    let found = match resolution.method {
        Method::Stored(Handler::Action(action)) => Some((
            action.clone(),
            resolution.owner.unwrap_or_else(|| context.data.clone()),
        )),
        Method::Stored(Handler::Map(_)) => None,
        method => method
            .as_name()
            .and_then(|name| find_named(name, &context, actions)),
    };
    let Some((action, owner)) = found else {
        tracing::trace!(?element, event = event_name, "handler names nothing callable");
        return Disposition::NoAction;
    };

    let data = context.data;
    let keep_default = if conventions.is_submit(event_name) {
        let form = event.target();
        action.call(&data, ActionArgs::Submit { form })
    } else {
        action.call(
            &owner,
            ActionArgs::Event {
                data: &data,
                event: &mut *event,
            },
        )
    };

    let caps = event.capabilities();
    if !keep_default {
        if caps.contains(EventCaps::PREVENT_DEFAULT) {
            event.prevent_default();
        } else {
            event.set_return_value(false);
        }
    }
    if !bubble {
        event.set_cancel_bubble(true);
        if caps.contains(EventCaps::STOP_PROPAGATION) {
            event.stop_propagation();
        }
    }

    tracing::debug!(
        ?element,
        event = event_name,
        keep_default,
        bubble,
        "delegated action invoked"
    );
    Disposition::Invoked {
        default_prevented: !keep_default,
        bubbling_stopped: !bubble,
    }
}

/// Look `name` up in the registry, then on the data item, then on its ancestors.
///
/// A name registered as [`ActionEntry::Empty`](crate::registry::ActionEntry::Empty)
/// shadows the data item's own method; only the ancestors are still searched.
///
/// Returns the action with its receiver.
pub fn find_named<K, D, E>(
    name: &str,
    context: &BindingContext<D>,
    actions: &ActionRegistry<K, D, E>,
) -> Option<(Action<K, D, E>, D)>
where
    D: Clone + DataItem<K, E>,
{
    match actions.lookup(name) {
        Some(entry) => {
            if let Some((action, owner)) = entry.action() {
                let owner = owner.unwrap_or(&context.data).clone();
                return Some((action.clone(), owner));
            }
        }
        None => {
            if let Some(action) = context.data.method(name) {
                return Some((action, context.data.clone()));
            }
        }
    }
    context
        .parents
        .iter()
        .find_map(|parent| parent.method(name).map(|action| (action, parent.clone())))
}
