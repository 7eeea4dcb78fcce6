// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Naming conventions shared by the resolver and the binding surface.
//!
//! The defaults follow the knockout delegated-events convention:
//!
//! | Purpose                         | Default for `click`       |
//! |---------------------------------|---------------------------|
//! | handler name attribute          | `data-click`              |
//! | parent-scope marker attribute   | `data-click-parent`       |
//! | direct binding name             | `delegatedClick`          |
//! | parent-scope binding name       | `delegatedParentClick`    |
//! | bubble companion binding name   | `delegatedClickBubble`    |

use alloc::string::String;

/// Attribute and binding naming conventions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conventions {
    /// Prefix of handler attributes (`data-`).
    pub attribute_prefix: String,
    /// Suffix appended to the handler attribute for parent-scope markers (`-parent`).
    pub parent_suffix: String,
    /// Marker value selecting a parent scope's whole handler instead of a keyed entry (`true`).
    pub whole_scope_marker: String,
    /// Prefix of synthesized direct bindings (`delegated`).
    pub binding_prefix: String,
    /// Prefix of synthesized parent-scope bindings (`delegatedParent`).
    pub parent_binding_prefix: String,
    /// Suffix of the companion bubble flag binding (`Bubble`).
    pub bubble_suffix: String,
    /// Event name that uses the submit calling convention (`submit`).
    pub submit_event: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            attribute_prefix: "data-".into(),
            parent_suffix: "-parent".into(),
            whole_scope_marker: "true".into(),
            binding_prefix: "delegated".into(),
            parent_binding_prefix: "delegatedParent".into(),
            bubble_suffix: "Bubble".into(),
            submit_event: "submit".into(),
        }
    }
}

impl Conventions {
    /// `data-<event>`.
    pub fn event_attribute(&self, event: &str) -> String {
        let mut out = String::with_capacity(self.attribute_prefix.len() + event.len());
        out.push_str(&self.attribute_prefix);
        out.push_str(event);
        out
    }

    /// `data-<event>-parent`.
    pub fn parent_attribute(&self, event: &str) -> String {
        let mut out = self.event_attribute(event);
        out.push_str(&self.parent_suffix);
        out
    }

    /// `delegated<Event>`.
    pub fn binding_name(&self, event: &str) -> String {
        camel(&self.binding_prefix, event)
    }

    /// `delegatedParent<Event>`.
    pub fn parent_binding_name(&self, event: &str) -> String {
        camel(&self.parent_binding_prefix, event)
    }

    /// `delegated<Event>Bubble`.
    pub fn bubble_binding_name(&self, event: &str) -> String {
        let mut out = self.binding_name(event);
        out.push_str(&self.bubble_suffix);
        out
    }

    /// Whether `event` uses the submit calling convention.
    pub fn is_submit(&self, event: &str) -> bool {
        event == self.submit_event
    }

    /// Whether a parent-scope marker selects the whole scope handler.
    pub fn is_whole_scope(&self, marker: &str) -> bool {
        marker == self.whole_scope_marker
    }
}

/// `prefix` followed by `name` with its first character upper-cased.
fn camel(prefix: &str, name: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + name.len());
    out.push_str(prefix);
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
    out
}
