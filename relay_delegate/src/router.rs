// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation path and a small runner that honors stop outcomes.
//!
//! Delegated listeners live on delegation roots, so a native event reaches them
//! by bubbling: first the target itself, then each ancestor up to the top of the
//! tree. [`propagation_path`] builds that sequence; [`run`] walks it and stops as
//! soon as a handler returns [`Outcome::Stop`].
//!
//! There is no capture phase. Delegated listeners only ever run on the way up.
//!
//! ```
//! use relay_delegate::router::{Outcome, Phase, Dispatch, run};
//!
//! let seq = vec![
//!     Dispatch::target(3_u32),
//!     Dispatch::bubble(2),
//!     Dispatch::bubble(1),
//! ];
//! let mut seen = Vec::new();
//! let stopped = run(&seq, &mut (), |d, _| {
//!     seen.push((d.phase, d.node));
//!     if d.node == 2 { Outcome::Stop } else { Outcome::Continue }
//! });
//! assert_eq!(stopped.map(|d| d.node), Some(2));
//! assert_eq!(seen, vec![(Phase::Target, 3), (Phase::Bubble, 2)]);
//! ```

use alloc::vec::Vec;

use crate::types::DomLookup;

/// Where a node sits in the propagation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The event target itself.
    Target,
    /// An ancestor of the target.
    Bubble,
}

/// Whether propagation continues after a handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Abort propagation immediately.
    Stop,
}

/// One step of a propagation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node the event is delivered to.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A target-phase step.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble-phase step.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Target first, then every ancestor up to the top of the tree.
pub fn propagation_path<K: Copy>(dom: &impl DomLookup<K>, target: K) -> Vec<Dispatch<K>> {
    let mut out = Vec::new();
    out.push(Dispatch::target(target));
    let mut cur = dom.parent_of(&target);
    while let Some(node) = cur {
        out.push(Dispatch::bubble(node));
        cur = dom.parent_of(&node);
    }
    out
}

/// Run `handler` over `seq` in order.
///
/// Returns the step at which a handler returned [`Outcome::Stop`], or `None`
/// if the whole sequence was visited.
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
