// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting a URI into schema and schema-relative path.

use lvfs_core::LvfsError;

/// Schema assumed when a URI has no `://`.
pub const DEFAULT_SCHEMA: &str = "file";

/// Separator between schema and path.
pub const SCHEMA_DELIMITER: &str = "://";

/// A URI borrowed as schema and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uri<'a> {
    pub schema: &'a str,
    pub path: &'a str,
}

/// Split `uri` at the first `://`.
///
/// Without a delimiter the whole string is a path under [`DEFAULT_SCHEMA`].
/// A schema of `max_schema_length` bytes or more is rejected, never
/// truncated.
pub fn split_uri(uri: &str, max_schema_length: usize) -> Result<Uri<'_>, LvfsError> {
    match uri.find(SCHEMA_DELIMITER) {
        None => Ok(Uri {
            schema: DEFAULT_SCHEMA,
            path: uri,
        }),
        Some(len) if len >= max_schema_length => Err(LvfsError::SchemaTooLong {
            len,
            max: max_schema_length,
        }),
        Some(len) => Ok(Uri {
            schema: &uri[..len],
            path: &uri[len + SCHEMA_DELIMITER.len()..],
        }),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn plain_path_defaults_to_file() {
        let uri = split_uri("/tmp/x.txt", 128).unwrap();
        assert_eq!(uri.schema, "file");
        assert_eq!(uri.path, "/tmp/x.txt");
    }

    #[test]
    fn file_uri_keeps_leading_slash() {
        let uri = split_uri("file:///tmp/x.txt", 128).unwrap();
        assert_eq!(uri.schema, "file");
        assert_eq!(uri.path, "/tmp/x.txt");
    }

    #[test]
    fn splits_at_first_delimiter() {
        let uri = split_uri("archive://a.zip://inner", 128).unwrap();
        assert_eq!(uri.schema, "archive");
        assert_eq!(uri.path, "a.zip://inner");
    }

    #[test]
    fn empty_schema_is_allowed() {
        let uri = split_uri(":///x", 128).unwrap();
        assert_eq!(uri.schema, "");
        assert_eq!(uri.path, "/x");
    }

    #[test]
    fn schema_at_limit_is_too_long() {
        let uri = format!("{}://x", "s".repeat(8));
        assert!(matches!(
            split_uri(&uri, 8),
            Err(LvfsError::SchemaTooLong { len: 8, max: 8 })
        ));
        assert!(split_uri(&uri, 9).is_ok());
    }

    proptest! {
        #[test]
        fn no_delimiter_means_file(path in "[^:]*") {
            let uri = split_uri(&path, 128).unwrap();
            prop_assert_eq!(uri.schema, DEFAULT_SCHEMA);
            prop_assert_eq!(uri.path, path.as_str());
        }

        #[test]
        fn schema_and_path_rejoin(schema in "[a-z][a-z0-9+.-]{0,20}", path in "\\PC*") {
            let joined = format!("{schema}://{path}");
            let uri = split_uri(&joined, 128).unwrap();
            prop_assert_eq!(uri.schema, schema.as_str());
            prop_assert_eq!(uri.path, path.as_str());
        }

        #[test]
        fn long_schema_always_fails(len in 4usize..64, max in 1usize..4) {
            let joined = format!("{}://p", "x".repeat(len));
            let failed = matches!(split_uri(&joined, max), Err(LvfsError::SchemaTooLong { .. }));
            prop_assert!(failed);
        }
    }
}
