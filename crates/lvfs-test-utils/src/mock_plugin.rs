// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock protocol and content plugins with call counting.
//!
//! A succeeding plugin produces a [`MockEntry`] whose location starts with
//! the plugin's tag, so `entry.location()` names the winner of a dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lvfs_core::{ContentPlugin, ErrorCode, Handle, ProtocolPlugin};
use parking_lot::Mutex;

use crate::mock_entry::MockEntry;

/// Shared call counter. Clone it before handing a plugin to a factory to
/// keep observing calls after the plugin moves into a registry.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Succeed { tag: String, type_name: String },
    Fail(ErrorCode),
}

/// Protocol plugin that opens every path or none.
#[derive(Debug)]
pub struct MockProtocolPlugin {
    outcome: Outcome,
    calls: CallCounter,
    paths: Mutex<Vec<String>>,
    last_error: Mutex<ErrorCode>,
}

impl MockProtocolPlugin {
    /// Opens every path as a `type_name` entry located at `<tag>:<path>`.
    pub fn succeeding(tag: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Succeed {
            tag: tag.into(),
            type_name: type_name.into(),
        })
    }

    /// Fails every open and reports `code` through `last_error`.
    pub fn failing(code: ErrorCode) -> Self {
        Self::with_outcome(Outcome::Fail(code))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: CallCounter::new(),
            paths: Mutex::new(Vec::new()),
            last_error: Mutex::new(ErrorCode::OK),
        }
    }

    /// Counts calls into `counter` instead of a private one.
    pub fn counting(mut self, counter: CallCounter) -> Self {
        self.calls = counter;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Every path passed to `open`, in call order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().clone()
    }

    pub fn into_arc(self) -> Arc<dyn ProtocolPlugin> {
        Arc::new(self)
    }
}

impl ProtocolPlugin for MockProtocolPlugin {
    fn open(&self, path: &str) -> Option<Handle> {
        self.calls.bump();
        self.paths.lock().push(path.to_string());
        match &self.outcome {
            Outcome::Succeed { tag, type_name } => {
                *self.last_error.lock() = ErrorCode::OK;
                Some(MockEntry::handle(tag.clone(), format!("{tag}:{path}"), type_name))
            }
            Outcome::Fail(code) => {
                *self.last_error.lock() = *code;
                None
            }
        }
    }

    fn last_error(&self) -> ErrorCode {
        *self.last_error.lock()
    }
}

/// Content plugin that claims every entry or none.
#[derive(Debug)]
pub struct MockContentPlugin {
    outcome: Outcome,
    calls: CallCounter,
    last_error: Mutex<ErrorCode>,
}

impl MockContentPlugin {
    /// Replaces every entry with a `type_name` entry located at
    /// `<tag>:<original location>`.
    pub fn claiming(tag: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Succeed {
            tag: tag.into(),
            type_name: type_name.into(),
        })
    }

    /// Declines every entry and reports `code` through `last_error`.
    pub fn declining(code: ErrorCode) -> Self {
        Self::with_outcome(Outcome::Fail(code))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: CallCounter::new(),
            last_error: Mutex::new(ErrorCode::OK),
        }
    }

    pub fn counting(mut self, counter: CallCounter) -> Self {
        self.calls = counter;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn into_arc(self) -> Arc<dyn ContentPlugin> {
        Arc::new(self)
    }
}

impl ContentPlugin for MockContentPlugin {
    fn open(&self, entry: &Handle) -> Option<Handle> {
        self.calls.bump();
        match &self.outcome {
            Outcome::Succeed { tag, type_name } => {
                *self.last_error.lock() = ErrorCode::OK;
                Some(MockEntry::handle(
                    entry.title(),
                    format!("{tag}:{}", entry.location()),
                    type_name,
                ))
            }
            Outcome::Fail(code) => {
                *self.last_error.lock() = *code;
                None
            }
        }
    }

    fn last_error(&self) -> ErrorCode {
        *self.last_error.lock()
    }
}
