// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File interface for entries with byte content.

use std::io::{Read, Seek, Write};

use crate::error::LvfsError;
use crate::types::{OpenMode, Permissions};

/// A byte stream opened from a [`File`].
pub trait Stream: Read + Write + Seek + Send {}

impl<T: Read + Write + Seek + Send> Stream for T {}

/// Entries with byte content.
pub trait File: Send + Sync {
    /// Opens a stream over the content.
    fn open(&self, mode: OpenMode) -> Result<Box<dyn Stream>, LvfsError>;

    /// Size in bytes at the time the entry was opened.
    fn size(&self) -> u64;

    /// Changes the access of the owning user.
    fn set_permissions(&self, permissions: Permissions) -> Result<(), LvfsError>;
}
