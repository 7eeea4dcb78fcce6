// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native event surface: what the dispatcher needs to read and control on an event.
//!
//! Hosts differ in which control methods an event object exposes. Some offer the
//! standard `preventDefault`/`stopPropagation` calls, older ones only the legacy
//! `returnValue`/`cancelBubble` flags. [`NativeEvent::capabilities`] reports which
//! standard calls exist so the dispatcher can fall back to the legacy flags.

use alloc::string::String;

bitflags::bitflags! {
    /// Standard control methods an event object exposes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventCaps: u8 {
        /// `preventDefault` is available.
        const PREVENT_DEFAULT  = 0b0000_0001;
        /// `stopPropagation` is available.
        const STOP_PROPAGATION = 0b0000_0010;
    }
}

impl Default for EventCaps {
    fn default() -> Self {
        Self::all()
    }
}

bitflags::bitflags! {
    /// Control state accumulated on a [`DomEvent`] during dispatch.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventState: u8 {
        /// `preventDefault` was called.
        const DEFAULT_PREVENTED   = 0b0000_0001;
        /// Legacy `returnValue` was set to `false`.
        const RETURN_VALUE_FALSE  = 0b0000_0010;
        /// Legacy `cancelBubble` was set.
        const CANCEL_BUBBLE       = 0b0000_0100;
        /// `stopPropagation` was called.
        const PROPAGATION_STOPPED = 0b0000_1000;
    }
}

/// A native event as delivered by the host.
pub trait NativeEvent<K> {
    /// Event type name, e.g. `"click"`.
    fn event_type(&self) -> &str;
    /// The node the event originated from.
    fn target(&self) -> K;
    /// Which standard control methods exist on this event.
    fn capabilities(&self) -> EventCaps;
    /// Standard default-action prevention.
    fn prevent_default(&mut self);
    /// Legacy default-action flag; `false` suppresses the default action.
    fn set_return_value(&mut self, value: bool);
    /// Standard propagation stop.
    fn stop_propagation(&mut self);
    /// Legacy propagation flag.
    fn set_cancel_bubble(&mut self, value: bool);
    /// Whether propagation has been stopped by either mechanism.
    fn propagation_stopped(&self) -> bool;
}

/// A plain event record implementing [`NativeEvent`].
///
/// ```
/// use relay_delegate::event::{DomEvent, EventCaps, EventState, NativeEvent};
///
/// let mut ev = DomEvent::new("click", 7_u32);
/// ev.prevent_default();
/// assert!(ev.default_prevented());
///
/// let mut legacy = DomEvent::legacy("click", 7_u32);
/// assert_eq!(legacy.capabilities(), EventCaps::empty());
/// legacy.set_cancel_bubble(true);
/// assert!(legacy.propagation_stopped());
/// assert!(legacy.state.contains(EventState::CANCEL_BUBBLE));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomEvent<K> {
    /// Event type name.
    pub kind: String,
    /// Originating node.
    pub target: K,
    /// Available standard control methods.
    pub caps: EventCaps,
    /// Accumulated control state.
    pub state: EventState,
}

impl<K> DomEvent<K> {
    /// An event with the standard control methods.
    pub fn new(kind: impl Into<String>, target: K) -> Self {
        Self {
            kind: kind.into(),
            target,
            caps: EventCaps::all(),
            state: EventState::empty(),
        }
    }

    /// An event with only the legacy control flags.
    pub fn legacy(kind: impl Into<String>, target: K) -> Self {
        Self {
            caps: EventCaps::empty(),
            ..Self::new(kind, target)
        }
    }

    /// Whether the default action was suppressed by either mechanism.
    pub fn default_prevented(&self) -> bool {
        self.state
            .intersects(EventState::DEFAULT_PREVENTED | EventState::RETURN_VALUE_FALSE)
    }
}

impl<K: Copy> NativeEvent<K> for DomEvent<K> {
    fn event_type(&self) -> &str {
        &self.kind
    }

    fn target(&self) -> K {
        self.target
    }

    fn capabilities(&self) -> EventCaps {
        self.caps
    }

    fn prevent_default(&mut self) {
        self.state.insert(EventState::DEFAULT_PREVENTED);
    }

    fn set_return_value(&mut self, value: bool) {
        self.state.set(EventState::RETURN_VALUE_FALSE, !value);
    }

    fn stop_propagation(&mut self) {
        self.state.insert(EventState::PROPAGATION_STOPPED);
    }

    fn set_cancel_bubble(&mut self, value: bool) {
        self.state.set(EventState::CANCEL_BUBBLE, value);
    }

    fn propagation_stopped(&self) -> bool {
        self.state
            .intersects(EventState::CANCEL_BUBBLE | EventState::PROPAGATION_STOPPED)
    }
}
