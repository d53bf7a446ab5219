// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The desktop lookup collaborator behind the icon and application caches.

use std::path::PathBuf;

use lvfs_core::Context;

/// An application found through a desktop entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Desktop file id, e.g. `org.gnome.gedit.desktop`.
    pub id: String,
    pub name: String,
    pub generic_name: Option<String>,
    pub comment: Option<String>,
    /// `Exec` template with field codes.
    pub exec: String,
    /// Icon name or absolute icon path.
    pub icon: Option<String>,
}

impl DesktopEntry {
    /// The comment, or the generic name when there is no comment.
    pub fn description(&self) -> &str {
        self.comment
            .as_deref()
            .or(self.generic_name.as_deref())
            .unwrap_or_default()
    }
}

/// Answers icon and application queries for the caches.
///
/// Results are memoized by the caller, so implementations may be slow.
pub trait DesktopLookup: Send + Sync {
    /// Path of the icon `name` at `size` in `context` of `theme`.
    fn find_icon(&self, name: &str, size: u32, context: Context, theme: &str) -> Option<PathBuf>;

    /// Path of the icon for MIME type `mime` at `size` in `theme`.
    fn find_mime_icon(&self, mime: &str, size: u32, theme: &str) -> Option<PathBuf>;

    /// Applications whose desktop entry lists `type_name`.
    fn find_applications(&self, type_name: &str) -> Vec<DesktopEntry>;

    /// Applications associated with `type_name` by user or system
    /// configuration, without the entry itself listing the type.
    fn find_known_applications(&self, type_name: &str) -> Vec<DesktopEntry>;
}

/// A lookup that finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLookup;

impl DesktopLookup for NullLookup {
    fn find_icon(&self, _name: &str, _size: u32, _context: Context, _theme: &str) -> Option<PathBuf> {
        None
    }

    fn find_mime_icon(&self, _mime: &str, _size: u32, _theme: &str) -> Option<PathBuf> {
        None
    }

    fn find_applications(&self, _type_name: &str) -> Vec<DesktopEntry> {
        Vec::new()
    }

    fn find_known_applications(&self, _type_name: &str) -> Vec<DesktopEntry> {
        Vec::new()
    }
}
