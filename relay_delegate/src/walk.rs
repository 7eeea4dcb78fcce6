// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded ancestor walk shared by both resolution strategies and the disabled check.

use crate::types::DomLookup;

/// What a visitor decided about one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step<T> {
    /// Keep walking upward.
    Next,
    /// Stop with a result.
    Found(T),
}

/// Visit `origin` and its ancestors up to `root` inclusive.
///
/// Nothing above `root` is visited. If `root` is not an ancestor of `origin`
/// the walk runs to the top of the tree.
pub(crate) fn walk_to_root<K, T>(
    dom: &impl DomLookup<K>,
    origin: K,
    root: K,
    mut visit: impl FnMut(K) -> Step<T>,
) -> Option<T>
where
    K: Copy + Eq,
{
    let mut cur = Some(origin);
    while let Some(node) = cur {
        match visit(node) {
            Step::Next => {}
            Step::Found(t) => return Some(t),
        }
        cur = if node == root {
            None
        } else {
            dom.parent_of(&node)
        };
    }
    None
}

/// Whether any node from `element` up to, but excluding, `root` is disabled.
pub(crate) fn disabled_below_root<K: Copy + Eq>(
    dom: &impl DomLookup<K>,
    element: K,
    root: K,
) -> bool {
    walk_to_root(dom, element, root, |node| {
        if node != root && dom.is_disabled(&node) {
            Step::Found(())
        } else {
            Step::Next
        }
    })
    .is_some()
}
