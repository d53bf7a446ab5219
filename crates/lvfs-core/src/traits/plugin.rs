// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol and content plugin contracts.
//!
//! Both kinds report failure as `None` and keep the reason in their own
//! last-error slot, which the caller reads right after the failed call.

use crate::error::ErrorCode;
use crate::traits::entry::Handle;

/// Turns a schema-relative path into an opened entry.
pub trait ProtocolPlugin: Send + Sync {
    /// Opens `path`, or returns `None` and records the reason in `last_error`.
    fn open(&self, path: &str) -> Option<Handle>;

    /// Error recorded by the most recent failed `open`.
    fn last_error(&self) -> ErrorCode;

    /// Called once after the plugin has been added to a registry.
    fn registered(&self) {}
}

/// Replaces an opened entry with a richer representation of its content.
pub trait ContentPlugin: Send + Sync {
    /// Wraps `entry`, or returns `None` if this plugin does not claim it.
    fn open(&self, entry: &Handle) -> Option<Handle>;

    /// Error recorded by the most recent failed `open`.
    fn last_error(&self) -> ErrorCode;

    /// Called once after the plugin has been added to a registry.
    fn registered(&self) {}
}
