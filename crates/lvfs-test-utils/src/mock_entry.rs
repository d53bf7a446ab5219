// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A bare entry for dispatch tests.

use std::sync::Arc;

use lvfs_core::{Entry, Handle, MimeType};

/// Schema reported by every [`MockEntry`].
pub const MOCK_SCHEMA: &str = "mock";

/// An entry that is neither file nor directory.
///
/// The location records who produced the entry, so tests can tell which
/// plugin won a dispatch.
#[derive(Debug, Clone)]
pub struct MockEntry {
    title: String,
    location: String,
    mime: MimeType,
}

impl MockEntry {
    pub fn new(title: impl Into<String>, location: impl Into<String>, type_name: &str) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            mime: MimeType::new(type_name, type_name),
        }
    }

    /// Wraps the entry in a shared handle.
    pub fn handle(title: impl Into<String>, location: impl Into<String>, type_name: &str) -> Handle {
        Arc::new(Self::new(title, location, type_name))
    }
}

impl Entry for MockEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn schema(&self) -> &str {
        MOCK_SCHEMA
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn entry_type(&self) -> &MimeType {
        &self.mime
    }
}
