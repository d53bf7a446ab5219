// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Desktop lookup that counts how often the caches reach the collaborator.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lvfs_core::Context;
use lvfs_desktop::{DesktopEntry, DesktopLookup, NullLookup};

/// Snapshot of collaborator calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupCalls {
    pub icon: usize,
    pub mime_icon: usize,
    pub applications: usize,
    pub known_applications: usize,
}

impl LookupCalls {
    pub fn total(&self) -> usize {
        self.icon + self.mime_icon + self.applications + self.known_applications
    }
}

/// Forwards to an inner lookup and counts every call.
pub struct CountingLookup {
    inner: Arc<dyn DesktopLookup>,
    delay: Option<Duration>,
    icon: AtomicUsize,
    mime_icon: AtomicUsize,
    applications: AtomicUsize,
    known_applications: AtomicUsize,
}

impl CountingLookup {
    pub fn new(inner: Arc<dyn DesktopLookup>) -> Self {
        Self {
            inner,
            delay: None,
            icon: AtomicUsize::new(0),
            mime_icon: AtomicUsize::new(0),
            applications: AtomicUsize::new(0),
            known_applications: AtomicUsize::new(0),
        }
    }

    /// Counts calls over [`NullLookup`].
    pub fn null() -> Self {
        Self::new(Arc::new(NullLookup))
    }

    /// Sleep inside every call, widening the window for racing lookups.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> LookupCalls {
        LookupCalls {
            icon: self.icon.load(Ordering::SeqCst),
            mime_icon: self.mime_icon.load(Ordering::SeqCst),
            applications: self.applications.load(Ordering::SeqCst),
            known_applications: self.known_applications.load(Ordering::SeqCst),
        }
    }

    fn hit(&self, counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl DesktopLookup for CountingLookup {
    fn find_icon(&self, name: &str, size: u32, context: Context, theme: &str) -> Option<PathBuf> {
        self.hit(&self.icon);
        self.inner.find_icon(name, size, context, theme)
    }

    fn find_mime_icon(&self, mime: &str, size: u32, theme: &str) -> Option<PathBuf> {
        self.hit(&self.mime_icon);
        self.inner.find_mime_icon(mime, size, theme)
    }

    fn find_applications(&self, type_name: &str) -> Vec<DesktopEntry> {
        self.hit(&self.applications);
        self.inner.find_applications(type_name)
    }

    fn find_known_applications(&self, type_name: &str) -> Vec<DesktopEntry> {
        self.hit(&self.known_applications);
        self.inner.find_known_applications(type_name)
    }
}
