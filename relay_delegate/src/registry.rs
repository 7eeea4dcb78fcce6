// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide action registry: method names available independent of any node.
//!
//! A method name found in a `data-click` attribute (or a named binding) is looked
//! up here first, before the bound data item and its ancestors.
//!
//! [`ActionRegistry`] is a shared handle. Clones see the same entries, so host
//! code can keep one around and register names at any time, even from inside a
//! running action; every dispatch reads the current state.
//!
//! ```
//! use relay_delegate::event::DomEvent;
//! use relay_delegate::registry::{ActionEntry, ActionRegistry};
//!
//! let actions: ActionRegistry<u32, &'static str, DomEvent<u32>> = ActionRegistry::new();
//! let handle = actions.clone();
//! handle.register_fn("save", |_owner, _args| false);
//! handle.register_owned("log", |_owner, _args| true, "logger");
//! handle.register_empty("noop");
//!
//! assert!(matches!(actions.lookup("save"), Some(ActionEntry::Function(_))));
//! assert!(matches!(actions.lookup("log"), Some(ActionEntry::Owned(_, "logger"))));
//! assert!(matches!(actions.lookup("noop"), Some(ActionEntry::Empty)));
//! assert!(actions.lookup("missing").is_none());
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::types::{Action, ActionArgs};

/// A registry entry.
pub enum ActionEntry<K, D, E> {
    /// Called with the data item as receiver.
    Function(Action<K, D, E>),
    /// Called with a fixed receiver; the data item is still the data argument.
    Owned(Action<K, D, E>, D),
    /// Registered but empty. Hides a data item's method of the same name;
    /// ancestor data items are still searched.
    Empty,
}

impl<K, D, E> ActionEntry<K, D, E> {
    /// The action and its fixed owner, if any. `None` for [`ActionEntry::Empty`].
    pub fn action(&self) -> Option<(&Action<K, D, E>, Option<&D>)> {
        match self {
            Self::Function(a) => Some((a, None)),
            Self::Owned(a, owner) => Some((a, Some(owner))),
            Self::Empty => None,
        }
    }
}

impl<K, D: Clone, E> Clone for ActionEntry<K, D, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(a) => Self::Function(a.clone()),
            Self::Owned(a, owner) => Self::Owned(a.clone(), owner.clone()),
            Self::Empty => Self::Empty,
        }
    }
}

impl<K, D: fmt::Debug, E> fmt::Debug for ActionEntry<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(a) => f.debug_tuple("Function").field(a).finish(),
            Self::Owned(a, owner) => f.debug_tuple("Owned").field(a).field(owner).finish(),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// Shared name → [`ActionEntry`] map.
pub struct ActionRegistry<K, D, E> {
    entries: Rc<RefCell<HashMap<String, ActionEntry<K, D, E>>>>,
}

impl<K, D, E> ActionRegistry<K, D, E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Insert or replace an entry.
    pub fn register(&self, name: impl Into<String>, entry: ActionEntry<K, D, E>) {
        self.entries.borrow_mut().insert(name.into(), entry);
    }

    /// Register a closure whose receiver is the data item.
    pub fn register_fn(
        &self,
        name: impl Into<String>,
        f: impl Fn(&D, ActionArgs<'_, K, D, E>) -> bool + 'static,
    ) {
        self.register(name, ActionEntry::Function(Action::new(f)));
    }

    /// Register a closure with a fixed receiver.
    pub fn register_owned(
        &self,
        name: impl Into<String>,
        f: impl Fn(&D, ActionArgs<'_, K, D, E>) -> bool + 'static,
        owner: D,
    ) {
        self.register(name, ActionEntry::Owned(Action::new(f), owner));
    }

    /// Register a name that deliberately resolves to nothing.
    pub fn register_empty(&self, name: impl Into<String>) {
        self.register(name, ActionEntry::Empty);
    }

    /// Remove an entry, returning it.
    pub fn remove(&self, name: &str) -> Option<ActionEntry<K, D, E>> {
        self.entries.borrow_mut().remove(name)
    }

    /// Whether `name` has an entry (empty entries included).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Whether two handles share the same entries.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<K, D: Clone, E> ActionRegistry<K, D, E> {
    /// Copy out the entry for `name`.
    ///
    /// The registry is not borrowed once this returns, so the caller can run
    /// the action while the action itself registers more names.
    pub fn lookup(&self, name: &str) -> Option<ActionEntry<K, D, E>> {
        self.entries.borrow().get(name).cloned()
    }
}

impl<K, D, E> Clone for ActionRegistry<K, D, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K, D, E> Default for ActionRegistry<K, D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, D, E> fmt::Debug for ActionRegistry<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        f.debug_struct("ActionRegistry")
            .field("len", &entries.len())
            .finish_non_exhaustive()
    }
}
