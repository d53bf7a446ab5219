// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The entry trait every opened resource implements.

use std::sync::Arc;

use crate::traits::directory::Directory;
use crate::traits::file::File;
use crate::types::{MimeType, Properties};

/// An opened resource: a file, a directory, or something a plugin built on top
/// of one (an archive listing, a decoded image, ...).
///
/// Capabilities beyond identity are discovered through the `as_*` accessors.
pub trait Entry: Send + Sync {
    /// Display name, usually the last path component.
    fn title(&self) -> &str;

    /// Schema this entry was opened through, e.g. `file`.
    fn schema(&self) -> &str;

    /// Location of the entry inside its schema.
    fn location(&self) -> &str;

    /// Resolved type; its name drives content-plugin dispatch.
    fn entry_type(&self) -> &MimeType;

    /// Filesystem properties, when the backend has them.
    fn properties(&self) -> Option<Properties> {
        None
    }

    /// File interface, if this entry has readable content.
    fn as_file(&self) -> Option<&dyn File> {
        None
    }

    /// Directory interface, if this entry can be enumerated.
    fn as_directory(&self) -> Option<&dyn Directory> {
        None
    }
}

impl std::fmt::Debug for dyn Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("location", &self.location())
            .finish()
    }
}

/// Shared handle to an opened entry.
pub type Handle = Arc<dyn Entry>;
