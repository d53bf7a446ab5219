// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol plugin for local paths.

use std::path::PathBuf;

use lvfs_core::{ErrorCode, Handle, ProtocolPlugin};
use parking_lot::Mutex;
use tracing::trace;

use crate::entry::open_path;

/// Opens local paths as [`FsFile`](crate::FsFile) or [`FsDirectory`](crate::FsDirectory) entries.
#[derive(Debug, Default)]
pub struct DefaultProtocolPlugin {
    last_error: Mutex<ErrorCode>,
}

impl DefaultProtocolPlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProtocolPlugin for DefaultProtocolPlugin {
    fn open(&self, path: &str) -> Option<Handle> {
        let mut full = PathBuf::from(path);
        if full.is_relative() {
            match std::env::current_dir() {
                Ok(cwd) => full = cwd.join(full),
                Err(e) => {
                    *self.last_error.lock() = ErrorCode::from_io(&e);
                    return None;
                }
            }
        }

        match open_path(&full) {
            Ok(handle) => {
                *self.last_error.lock() = ErrorCode::OK;
                Some(handle)
            }
            Err(code) => {
                trace!(path = %full.display(), error = %code, "local open failed");
                *self.last_error.lock() = code;
                None
            }
        }
    }

    fn last_error(&self) -> ErrorCode {
        *self.last_error.lock()
    }
}
