// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for LVFS integration tests.
//!
//! Provides mock plugins, modules and desktop collaborators for fast,
//! deterministic tests that never touch a real plugin set or desktop.
//!
//! # Components
//!
//! - [`MockEntry`] - Entry with a fixed type name and a tag-bearing location
//! - [`MockProtocolPlugin`] / [`MockContentPlugin`] - Plugins that succeed or fail on demand
//! - [`MockLoader`] / [`TeardownProbe`] - Module loader that checks unload ordering
//! - [`CountingLookup`] - Desktop lookup that counts collaborator calls

pub mod counting_lookup;
pub mod mock_entry;
pub mod mock_module;
pub mod mock_plugin;

pub use counting_lookup::{CountingLookup, LookupCalls};
pub use mock_entry::{MockEntry, MOCK_SCHEMA};
pub use mock_module::{MockLoader, TeardownProbe};
pub use mock_plugin::{CallCounter, MockContentPlugin, MockProtocolPlugin};
