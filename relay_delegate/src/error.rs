// Copyright 2025 the Relay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors from the binding surface.

use alloc::string::String;

use thiserror::Error;

/// Failure to apply a host binding to a node.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindError {
    /// No delegation root registration synthesized a binding with this name.
    #[error("unknown delegated binding `{name}`")]
    UnknownBinding {
        /// The binding name the host tried to apply.
        name: String,
    },
}
