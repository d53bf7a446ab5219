// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory interface for enumerable entries.

use std::sync::atomic::AtomicBool;

use crate::error::LvfsError;
use crate::traits::entry::Handle;

/// Iterator over the immediate children of a directory.
pub type DirIter<'a> = Box<dyn Iterator<Item = Result<Handle, LvfsError>> + 'a>;

/// Progress reporting for [`Directory::copy`].
pub struct CopyProgress<'a> {
    /// Called with the total number of bytes processed so far.
    pub on_progress: &'a dyn Fn(u64),
    /// Checked between chunks; setting it aborts the copy.
    pub aborted: &'a AtomicBool,
}

/// Entries that contain other entries.
pub trait Directory: Send + Sync {
    /// Children in backend order, without `.` and `..`.
    fn iter(&self) -> Result<DirIter<'_>, LvfsError>;

    /// Whether a child with this name exists.
    fn exists(&self, name: &str) -> bool;

    /// Opens the child with this name.
    fn entry(&self, name: &str) -> Result<Handle, LvfsError>;

    /// Renames a child, returning the entry under its new name.
    fn rename(&self, entry: &Handle, name: &str) -> Result<Handle, LvfsError>;

    /// Removes a child.
    fn remove(&self, entry: &Handle) -> Result<(), LvfsError>;

    /// Copies (or moves) `source` into this directory.
    fn copy(
        &self,
        progress: &CopyProgress<'_>,
        source: &Handle,
        move_source: bool,
    ) -> Result<Handle, LvfsError>;
}
