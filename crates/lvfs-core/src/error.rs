// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the LVFS virtual filesystem.

use std::fmt;

use thiserror::Error;

/// The primary error type used across LVFS resolution and entry operations.
#[derive(Debug, Error)]
pub enum LvfsError {
    /// The schema prefix of a URI is not shorter than the configured limit.
    #[error("schema of {len} bytes exceeds the maximum schema length of {max}")]
    SchemaTooLong { len: usize, max: usize },

    /// No protocol plugin is registered for the schema.
    #[error("no protocol handler registered for schema `{schema}`")]
    NoProtocolHandler { schema: String },

    /// Protocol plugins were consulted but none of them opened the path.
    ///
    /// `error` is the last error reported by the last plugin that was tried.
    #[error("cannot open `{schema}://{path}`: {error}")]
    NotOpened {
        schema: String,
        path: String,
        error: ErrorCode,
    },

    /// No content plugin claimed an entry of this type.
    ///
    /// `Resolver::open` never returns this; it hands back the plain entry instead.
    #[error("no content handler claimed type `{type_name}`")]
    NoContentHandler { type_name: String },

    /// A second resolver was constructed while another one is alive.
    #[error("a resolver instance already exists in this process")]
    ResolverExists,

    /// Entry operation is not supported by this kind of entry.
    #[error("operation `{operation}` is not supported by `{title}`")]
    Unsupported { operation: &'static str, title: String },

    /// Copy or move aborted through the caller's abort flag.
    #[error("operation aborted")]
    Aborted,

    /// Filesystem error from an entry operation.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors surfaced at resolver construction.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errno-style error code reported through a plugin's `last_error()` channel.
///
/// A zero code means "no error". Codes are OS error numbers, so the
/// description is the platform's message for that number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// No error.
    pub const OK: ErrorCode = ErrorCode(0);
    /// No such file or directory.
    pub const NOT_FOUND: ErrorCode = ErrorCode(2);
    /// Input/output error.
    pub const IO: ErrorCode = ErrorCode(5);
    /// Permission denied.
    pub const PERMISSION_DENIED: ErrorCode = ErrorCode(13);
    /// Invalid argument.
    pub const INVALID_INPUT: ErrorCode = ErrorCode(22);

    /// Wraps a raw OS error number.
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Derives a code from an I/O error, preferring the raw OS error number.
    pub fn from_io(err: &std::io::Error) -> Self {
        if let Some(code) = err.raw_os_error() {
            return Self(code);
        }
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NOT_FOUND,
            std::io::ErrorKind::PermissionDenied => Self::PERMISSION_DENIED,
            std::io::ErrorKind::InvalidInput => Self::INVALID_INPUT,
            _ => Self::IO,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    pub fn code(&self) -> i32 {
        self.0
    }

    /// Human-readable description of the code.
    pub fn description(&self) -> String {
        if self.is_ok() {
            "success".to_string()
        } else {
            std::io::Error::from_raw_os_error(self.0).to_string()
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl From<&std::io::Error> for ErrorCode {
    fn from(err: &std::io::Error) -> Self {
        Self::from_io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_code_is_ok() {
        let code = ErrorCode::default();
        assert!(code.is_ok());
        assert_eq!(code.description(), "success");
    }

    #[test]
    fn from_io_prefers_raw_os_error() {
        let err = std::io::Error::from_raw_os_error(13);
        assert_eq!(ErrorCode::from_io(&err), ErrorCode::PERMISSION_DENIED);
    }

    #[test]
    fn from_io_maps_kind_without_os_code() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(ErrorCode::from_io(&err), ErrorCode::NOT_FOUND);

        let err = std::io::Error::other("weird");
        assert_eq!(ErrorCode::from_io(&err), ErrorCode::IO);
    }

    #[test]
    fn not_opened_message_carries_plugin_error() {
        let err = LvfsError::NotOpened {
            schema: "file".into(),
            path: "/nope".into(),
            error: ErrorCode::NOT_FOUND,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("cannot open `file:///nope`"), "got: {msg}");
    }
}
