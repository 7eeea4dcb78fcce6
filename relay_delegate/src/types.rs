// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and the seams to the host document and binding framework.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Read-only view of the host document tree.
///
/// The resolver only ever reads through this trait; it never mutates the tree.
pub trait DomLookup<K> {
    /// Parent of `node`, or `None` at the top of the tree.
    fn parent_of(&self, node: &K) -> Option<K>;
    /// Whether `node` is an element (as opposed to text or other node kinds).
    fn is_element(&self, node: &K) -> bool;
    /// Whether `node` is explicitly marked non-interactive.
    fn is_disabled(&self, node: &K) -> bool;
    /// Attribute value on `node`, if present. Present-but-empty is `Some("")`.
    fn attribute(&self, node: &K, name: &str) -> Option<&str>;
}

/// Data bound to a node by the host framework, plus its ancestor data chain.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingContext<D> {
    /// The data item bound to the node.
    pub data: D,
    /// Ancestor data items, nearest first.
    pub parents: SmallVec<[D; 4]>,
}

impl<D> BindingContext<D> {
    /// A context with no ancestor data.
    pub fn new(data: D) -> Self {
        Self {
            data,
            parents: SmallVec::new(),
        }
    }

    /// Builder: set the ancestor chain, nearest first.
    pub fn with_parents(mut self, parents: impl IntoIterator<Item = D>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }
}

/// Host framework lookup from a node to its bound data.
pub trait ContextLookup<K, D> {
    /// Full binding context for `node`, or `None` if nothing is bound there.
    fn context_for(&self, node: &K) -> Option<BindingContext<D>>;

    /// Just the data item bound to `node`.
    fn data_for(&self, node: &K) -> Option<D> {
        self.context_for(node).map(|c| c.data)
    }
}

impl<K: Eq + Hash, D: Clone> ContextLookup<K, D> for HashMap<K, BindingContext<D>> {
    fn context_for(&self, node: &K) -> Option<BindingContext<D>> {
        self.get(node).cloned()
    }
}

/// Named methods exposed by a data item.
///
/// This is how a method name found in a `data-click="save"` attribute is
/// resolved against the bound data and its ancestors. Return `None` for
/// names that are absent or not callable.
pub trait DataItem<K, E>: Sized {
    /// Look up a callable member by name.
    fn method(&self, name: &str) -> Option<Action<K, Self, E>>;
}

/// Arguments an [`Action`] is called with.
#[derive(Debug)]
pub enum ActionArgs<'a, K, D, E> {
    /// Ordinary events: the data item bound at the handling element and the native event.
    Event {
        /// Data bound to the element that held the handler.
        data: &'a D,
        /// The native event being dispatched.
        event: &'a mut E,
    },
    /// Submit events: only the element the event originated from.
    Submit {
        /// The event target, normally the form element.
        form: K,
    },
}

impl<K: Copy, D, E> ActionArgs<'_, K, D, E> {
    /// The data argument, for ordinary events.
    pub fn data(&self) -> Option<&D> {
        match self {
            Self::Event { data, .. } => Some(*data),
            Self::Submit { .. } => None,
        }
    }

    /// The native event, for ordinary events.
    pub fn event(&mut self) -> Option<&mut E> {
        match self {
            Self::Event { event, .. } => Some(&mut **event),
            Self::Submit { .. } => None,
        }
    }

    /// The originating form element, for submit events.
    pub fn form(&self) -> Option<K> {
        match self {
            Self::Submit { form } => Some(*form),
            Self::Event { .. } => None,
        }
    }
}

/// A shared, callable event action.
///
/// The first argument is the receiver ("owner"). Return `true` to let the
/// default action proceed; anything else suppresses it.
pub struct Action<K, D, E>(Rc<dyn Fn(&D, ActionArgs<'_, K, D, E>) -> bool>);

impl<K, D, E> Action<K, D, E> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&D, ActionArgs<'_, K, D, E>) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke with an explicit receiver.
    pub fn call(&self, receiver: &D, args: ActionArgs<'_, K, D, E>) -> bool {
        (self.0)(receiver, args)
    }

    /// Whether two handles share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, D, E> Clone for Action<K, D, E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<K, D, E> fmt::Debug for Action<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A handler value stashed on a node by a binding, or registered for a parent scope.
pub enum Handler<K, D, E> {
    /// A callable, used as-is.
    Action(Action<K, D, E>),
    /// A method name, resolved at dispatch time.
    Name(String),
    /// Marker key → handler, consumed by parent-scoped markers.
    Map(HashMap<String, Handler<K, D, E>>),
}

impl<K, D, E> Handler<K, D, E> {
    /// Wrap a closure as [`Handler::Action`].
    pub fn action(f: impl Fn(&D, ActionArgs<'_, K, D, E>) -> bool + 'static) -> Self {
        Self::Action(Action::new(f))
    }

    /// A [`Handler::Name`].
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// A [`Handler::Map`] from key/handler pairs.
    pub fn map<S: Into<String>>(entries: impl IntoIterator<Item = (S, Self)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// An empty name carries no handler.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Name(n) if n.is_empty())
    }

    /// The callable, if this is one.
    pub fn as_action(&self) -> Option<&Action<K, D, E>> {
        match self {
            Self::Action(a) => Some(a),
            _ => None,
        }
    }

    /// Index a map by marker key. Non-maps have no entries.
    pub fn entry(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(m) => m.get(key),
            _ => None,
        }
    }
}

impl<K, D, E> Clone for Handler<K, D, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Action(a) => Self::Action(a.clone()),
            Self::Name(n) => Self::Name(n.clone()),
            Self::Map(m) => Self::Map(m.clone()),
        }
    }
}

impl<K, D, E> fmt::Debug for Handler<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(a) => f.debug_tuple("Action").field(a).finish(),
            Self::Name(n) => f.debug_tuple("Name").field(n).finish(),
            Self::Map(m) => f.debug_map().entries(m.iter()).finish(),
        }
    }
}

/// Which kind of binding stashed a handler on a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A direct `delegated<Event>` binding.
    Direct,
    /// A `delegatedParent<Event>` binding consumed by descendants' markers.
    Parent,
}

/// The method a resolver settled on, borrowed from the tree or the handler store.
#[derive(Debug)]
pub enum Method<'a, K, D, E> {
    /// Value of a `data-<event>` attribute: a method name.
    Attribute(&'a str),
    /// A handler value from the handler store.
    Stored(&'a Handler<K, D, E>),
}

impl<'a, K, D, E> Method<'a, K, D, E> {
    /// The method name, when the method is resolved by name.
    pub fn as_name(&self) -> Option<&'a str> {
        match *self {
            Self::Attribute(name) => Some(name),
            Self::Stored(Handler::Name(name)) => Some(name.as_str()),
            Self::Stored(_) => None,
        }
    }
}

impl<K, D, E> Clone for Method<'_, K, D, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, D, E> Copy for Method<'_, K, D, E> {}

/// Output of a resolution strategy.
#[derive(Debug)]
pub struct Resolution<'a, K, D, E> {
    /// The handler to run, not yet looked up by name.
    pub method: Method<'a, K, D, E>,
    /// The node whose bound data is passed to the action.
    pub element: K,
    /// Pre-bound receiver, when the strategy fixes one.
    pub owner: Option<D>,
}
