// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Method resolution: from the event's origin node to the handler that should run.
//!
//! Two strategies share one bounded ancestor walk (origin up to the delegation
//! root, inclusive):
//!
//! - [`resolve_direct`] for roots registered for plain event names. At each
//!   interactive element it checks the `data-<event>` attribute, then a direct
//!   handler from the store. A `data-<event>-parent` marker switches the rest of
//!   the walk to looking for a parent-scope handler on an ancestor; the marker's
//!   node stays the data context for the dispatch.
//! - [`resolve_parent_scoped`] for roots registered with an explicit handler map.
//!   The first marker (or non-interactive node) ends the walk; the marker picks
//!   the handler, and the root's data becomes the receiver.
//!
//! Both are pure reads of the tree, the handler store and the binding contexts.

use core::fmt::Debug;
use core::hash::Hash;

use crate::conventions::Conventions;
use crate::store::HandlerStore;
use crate::types::{ContextLookup, DomLookup, Handler, Method, Resolution, Scope};
use crate::walk::{Step, walk_to_root};

/// How a delegation root resolves methods.
pub enum Strategy<K, D, E> {
    /// Attribute / handler-store lookup with parent-scope markers.
    Direct,
    /// Marker lookup into an explicit handler (usually a [`Handler::Map`]).
    ParentScoped(Handler<K, D, E>),
}

impl<K, D, E> Strategy<K, D, E>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Run this strategy for one event.
    pub fn resolve<'a>(
        &'a self,
        dom: &'a impl DomLookup<K>,
        store: &'a HandlerStore<K, D, E>,
        contexts: &impl ContextLookup<K, D>,
        conventions: &Conventions,
        origin: K,
        root: K,
        event: &str,
    ) -> Option<Resolution<'a, K, D, E>> {
        match self {
            Self::Direct => resolve_direct(dom, store, contexts, conventions, origin, root, event),
            Self::ParentScoped(handlers) => {
                resolve_parent_scoped(dom, contexts, conventions, handlers, origin, root, event)
            }
        }
    }
}

impl<K, D, E> Strategy<K, D, E> {
    /// Whether this is [`Strategy::ParentScoped`].
    pub fn is_parent_scoped(&self) -> bool {
        matches!(self, Self::ParentScoped(_))
    }
}

impl<K, D, E> core::fmt::Debug for Strategy<K, D, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Direct => f.write_str("Direct"),
            Self::ParentScoped(h) => f.debug_tuple("ParentScoped").field(h).finish(),
        }
    }
}

/// Resolve a handler for `event` starting at `origin`, walking up to `root`.
///
/// At each interactive element, in order:
///
/// 1. While a parent-scope marker is pending from lower in the walk, only a
///    parent-scope handler stored on this node is considered. The marker
///    `true` takes the whole handler; any other marker indexes a map. A
///    missing entry keeps walking, so a higher scope may still answer.
/// 2. Otherwise a non-empty `data-<event>` attribute, then a non-empty direct
///    handler from the store, ends the walk at this node.
/// 3. Otherwise a non-empty `data-<event>-parent` attribute becomes the
///    pending marker.
///
/// Text nodes and disabled elements are passed through without matching.
pub fn resolve_direct<'a, K, D, E>(
    dom: &'a impl DomLookup<K>,
    store: &'a HandlerStore<K, D, E>,
    contexts: &impl ContextLookup<K, D>,
    conventions: &Conventions,
    origin: K,
    root: K,
    event: &str,
) -> Option<Resolution<'a, K, D, E>>
where
    K: Copy + Eq + Hash + Debug,
{
    let attr = conventions.event_attribute(event);
    let parent_attr = conventions.parent_attribute(event);
    let mut pending: Option<(K, &'a str)> = None;

    let found = walk_to_root(dom, origin, root, move |node| {
        if !dom.is_element(&node) || dom.is_disabled(&node) {
            return Step::Next;
        }

        if let Some((marker_node, marker)) = pending {
            let Some(scope) = store.get(&node, Scope::Parent, event) else {
                return Step::Next;
            };
            let method = if conventions.is_whole_scope(marker) {
                Some(scope)
            } else {
                scope.entry(marker)
            };
            return match method.filter(|m| !m.is_empty()) {
                Some(m) => Step::Found(Resolution {
                    method: Method::Stored(m),
                    element: marker_node,
                    owner: contexts.data_for(&node),
                }),
                None => {
                    tracing::trace!(?node, marker, "parent scope has no entry for marker");
                    Step::Next
                }
            };
        }

        if let Some(name) = dom.attribute(&node, &attr).filter(|v| !v.is_empty()) {
            return Step::Found(Resolution {
                method: Method::Attribute(name),
                element: node,
                owner: None,
            });
        }
        if let Some(h) = store
            .get(&node, Scope::Direct, event)
            .filter(|h| !h.is_empty())
        {
            return Step::Found(Resolution {
                method: Method::Stored(h),
                element: node,
                owner: None,
            });
        }
        if let Some(marker) = dom.attribute(&node, &parent_attr).filter(|v| !v.is_empty()) {
            pending = Some((node, marker));
        }
        Step::Next
    });

    if found.is_none() {
        tracing::trace!(?origin, ?root, event, "no delegated handler found");
    }
    found
}

/// Resolve through a parent scope's explicit `handlers`.
///
/// Walks from `origin` toward `root` and stops at the first node that is not
/// an interactive element or that carries `data-<event>-parent`. That node's
/// marker selects the handler: `true` takes `handlers` itself, anything else
/// indexes it. Only callables resolve; the receiver is the data bound to `root`.
pub fn resolve_parent_scoped<'a, K, D, E>(
    dom: &'a impl DomLookup<K>,
    contexts: &impl ContextLookup<K, D>,
    conventions: &Conventions,
    handlers: &'a Handler<K, D, E>,
    origin: K,
    root: K,
    event: &str,
) -> Option<Resolution<'a, K, D, E>>
where
    K: Copy + Eq + Debug,
{
    let attr = conventions.parent_attribute(event);
    let node = walk_to_root(dom, origin, root, |node| {
        if !dom.is_element(&node) || dom.is_disabled(&node) || dom.attribute(&node, &attr).is_some()
        {
            Step::Found(node)
        } else {
            Step::Next
        }
    })?;

    let Some(marker) = dom.attribute(&node, &attr) else {
        tracing::trace!(?node, event, "walk stopped at a node without a marker");
        return None;
    };
    let method = if conventions.is_whole_scope(marker) {
        Some(handlers)
    } else {
        handlers.entry(marker)
    };
    let Some(method) = method.filter(|m| m.as_action().is_some()) else {
        tracing::trace!(?node, marker, "marker does not name a callable handler");
        return None;
    };

    Some(Resolution {
        method: Method::Stored(method),
        element: node,
        owner: contexts.data_for(&root),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeDom;
    use crate::types::BindingContext;
    use hashbrown::HashMap;

    type Store = HandlerStore<u32, &'static str, ()>;
    type Contexts = HashMap<u32, BindingContext<&'static str>>;

    fn noop() -> Handler<u32, &'static str, ()> {
        Handler::action(|_, _| true)
    }

    // 0 root ← 1 parent ← 2 child ← 3 text
    fn fixture() -> (FakeDom, Store, Contexts) {
        let mut dom = FakeDom::default();
        let root = dom.add(None);
        let parent = dom.add(Some(root));
        let child = dom.add(Some(parent));
        dom.add_text(child);
        let mut contexts = Contexts::new();
        contexts.insert(0, BindingContext::new("root-data"));
        contexts.insert(1, BindingContext::new("parent-data"));
        contexts.insert(2, BindingContext::new("child-data"));
        (dom, Store::new(), contexts)
    }

    fn name_of<'a, K, D, E>(r: &Resolution<'a, K, D, E>) -> Option<&'a str> {
        r.method.as_name()
    }

    #[test]
    fn attribute_on_ancestor_matches_from_text_node() {
        let (mut dom, store, contexts) = fixture();
        dom.attr(1, "data-click", "save");
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 3, 0, "click").unwrap();
        assert_eq!(name_of(&r), Some("save"));
        assert_eq!(r.element, 1);
        assert!(r.owner.is_none());
    }

    #[test]
    fn attribute_wins_over_stored_handler_on_same_node() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click", "fromAttr");
        store.set(2, Scope::Direct, "click", Handler::name("fromStore"));
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").unwrap();
        assert_eq!(name_of(&r), Some("fromAttr"));
    }

    #[test]
    fn empty_attribute_falls_through_to_store() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click", "");
        store.set(2, Scope::Direct, "click", noop());
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").unwrap();
        assert!(matches!(r.method, Method::Stored(Handler::Action(_))));
        assert_eq!(r.element, 2);
    }

    #[test]
    fn nearest_match_wins() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(0, "data-click", "outer");
        store.set(2, Scope::Direct, "click", Handler::name("inner"));
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 3, 0, "click").unwrap();
        assert_eq!(name_of(&r), Some("inner"));
    }

    #[test]
    fn disabled_node_is_skipped_but_walk_continues() {
        let (mut dom, store, contexts) = fixture();
        dom.attr(2, "data-click", "inner");
        dom.attr(1, "data-click", "outer");
        dom.disable(2);
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 3, 0, "click").unwrap();
        assert_eq!(name_of(&r), Some("outer"));
        assert_eq!(r.element, 1);
    }

    #[test]
    fn nothing_above_root_is_inspected() {
        let (mut dom, store, contexts) = fixture();
        dom.attr(0, "data-click", "aboveRoot");
        let c = Conventions::default();
        assert!(resolve_direct(&dom, &store, &contexts, &c, 3, 1, "click").is_none());
    }

    #[test]
    fn other_event_names_do_not_match() {
        let (mut dom, store, contexts) = fixture();
        dom.attr(1, "data-keyup", "typed");
        let c = Conventions::default();
        assert!(resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").is_none());
    }

    #[test]
    fn marker_consumed_by_parent_scope_keeps_marker_node_as_element() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click-parent", "select");
        store.set(
            0,
            Scope::Parent,
            "click",
            Handler::map([("select", noop())]),
        );
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 3, 0, "click").unwrap();
        assert!(matches!(r.method, Method::Stored(Handler::Action(_))));
        assert_eq!(r.element, 2);
        assert_eq!(r.owner, Some("root-data"));
    }

    #[test]
    fn whole_scope_marker_takes_entire_handler() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click-parent", "true");
        store.set(1, Scope::Parent, "click", Handler::name("scoped"));
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").unwrap();
        assert_eq!(name_of(&r), Some("scoped"));
        assert_eq!(r.element, 2);
        assert_eq!(r.owner, Some("parent-data"));
    }

    #[test]
    fn missing_marker_entry_continues_to_higher_scope() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click-parent", "select");
        store.set(1, Scope::Parent, "click", Handler::map([("other", noop())]));
        store.set(0, Scope::Parent, "click", Handler::map([("select", noop())]));
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").unwrap();
        assert_eq!(r.owner, Some("root-data"));
        assert_eq!(r.element, 2);
    }

    #[test]
    fn pending_marker_ignores_plain_attributes_higher_up() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click-parent", "select");
        dom.attr(1, "data-click", "plain");
        store.set(0, Scope::Parent, "click", Handler::map([("select", noop())]));
        let c = Conventions::default();
        let r = resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").unwrap();
        assert_eq!(r.owner, Some("root-data"));
        assert!(name_of(&r).is_none());
    }

    #[test]
    fn unmatched_marker_resolves_nothing() {
        let (mut dom, mut store, contexts) = fixture();
        dom.attr(2, "data-click-parent", "wrongkey");
        store.set(0, Scope::Parent, "click", Handler::map([("select", noop())]));
        let c = Conventions::default();
        assert!(resolve_direct(&dom, &store, &contexts, &c, 2, 0, "click").is_none());
    }

    #[test]
    fn parent_scoped_uses_root_data_as_owner() {
        let (mut dom, _, contexts) = fixture();
        dom.attr(2, "data-click-parent", "select");
        let handlers = Handler::map([("select", noop())]);
        let c = Conventions::default();
        let r = resolve_parent_scoped(&dom, &contexts, &c, &handlers, 3, 0, "click");
        // The text node stops the walk before any marker is seen.
        assert!(r.is_none());

        let r = resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").unwrap();
        assert_eq!(r.element, 2);
        assert_eq!(r.owner, Some("root-data"));
    }

    #[test]
    fn parent_scoped_marker_on_ancestor() {
        let (mut dom, _, contexts) = fixture();
        dom.attr(1, "data-click-parent", "true");
        let handlers = noop();
        let c = Conventions::default();
        let r = resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").unwrap();
        assert_eq!(r.element, 1);
        assert!(matches!(r.method, Method::Stored(Handler::Action(_))));
    }

    #[test]
    fn parent_scoped_rejects_missing_or_non_callable_entries() {
        let (mut dom, _, contexts) = fixture();
        let c = Conventions::default();
        dom.attr(2, "data-click-parent", "wrongkey");
        let handlers = Handler::map([("select", noop()), ("named", Handler::name("x"))]);
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").is_none());

        let (mut dom, _, contexts) = fixture();
        dom.attr(2, "data-click-parent", "named");
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").is_none());

        // A map is not callable as a whole.
        let (mut dom, _, contexts) = fixture();
        dom.attr(2, "data-click-parent", "true");
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").is_none());
    }

    #[test]
    fn parent_scoped_stops_at_disabled_node() {
        let (mut dom, _, contexts) = fixture();
        dom.attr(1, "data-click-parent", "select");
        dom.disable(2);
        let handlers = Handler::map([("select", noop())]);
        let c = Conventions::default();
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").is_none());
    }

    #[test]
    fn parent_scoped_is_single_shot_and_bounded_by_root() {
        let (mut dom, _, contexts) = fixture();
        dom.attr(0, "data-click-parent", "select");
        let handlers = Handler::map([("select", noop())]);
        let c = Conventions::default();
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 1, "click").is_none());
        assert!(resolve_parent_scoped(&dom, &contexts, &c, &handlers, 2, 0, "click").is_some());
    }
}
