// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for entries and the plugin architecture.
//!
//! Entries are shared as [`Handle`]s. Plugins are shared as `Arc` trait objects
//! owned by the registry for as long as it lives.

pub mod directory;
pub mod entry;
pub mod file;
pub mod package;
pub mod plugin;

pub use directory::{CopyProgress, DirIter, Directory};
pub use entry::{Entry, Handle};
pub use file::{File, Stream};
pub use package::{ContentSlot, Package, PluginSlot, ProtocolSlot, StaticPackage};
pub use plugin::{ContentPlugin, ProtocolPlugin};
