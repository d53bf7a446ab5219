// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the LVFS virtual filesystem.
//!
//! This crate provides the entry and plugin traits, the error types, and the
//! common types used throughout the LVFS workspace. Every plugin package
//! implements traits defined here.

pub mod error;
pub mod mime;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ErrorCode, LvfsError};
pub use types::{
    Context, Icon, IconHandle, MimeType, OpenMode, Permissions, Properties, DIRECTORY_TYPE_NAME,
    SMALL_ICON_SIZE, UNKNOWN_TYPE_NAME,
};

pub use traits::{
    ContentPlugin, ContentSlot, CopyProgress, DirIter, Directory, Entry, File, Handle, Package,
    PluginSlot, ProtocolPlugin, ProtocolSlot, StaticPackage, Stream,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Nothing;

    impl ProtocolPlugin for Nothing {
        fn open(&self, _path: &str) -> Option<Handle> {
            None
        }

        fn last_error(&self) -> ErrorCode {
            ErrorCode::NOT_FOUND
        }
    }

    #[test]
    fn lvfs_error_has_resolution_variants() {
        let _schema = LvfsError::SchemaTooLong { len: 200, max: 128 };
        let _protocol = LvfsError::NoProtocolHandler {
            schema: "zip".into(),
        };
        let _content = LvfsError::NoContentHandler {
            type_name: "text/plain".into(),
        };
        let _exists = LvfsError::ResolverExists;
        let _io = LvfsError::from(std::io::Error::other("test"));
    }

    #[test]
    fn static_package_keeps_table_order() {
        let first: Arc<dyn ProtocolPlugin> = Arc::new(Nothing);
        let second: Arc<dyn ProtocolPlugin> = Arc::new(Nothing);
        let package = StaticPackage::new("test")
            .with_protocol("file", Arc::clone(&first))
            .with_protocol("file", Arc::clone(&second))
            .with_protocol("zip", Arc::new(Nothing));

        let keys: Vec<&str> = package
            .protocol_plugins()
            .iter()
            .map(|slot| slot.key.as_str())
            .collect();
        assert_eq!(keys, ["file", "file", "zip"]);
        assert!(Arc::ptr_eq(&package.protocol_plugins()[0].plugin, &first));
        assert!(Arc::ptr_eq(&package.protocol_plugins()[1].plugin, &second));
        assert!(package.content_plugins().is_empty());
        assert_eq!(package.name(), "test");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Compiles only if every trait is reachable from the crate root.
        fn _assert_entry<T: Entry>() {}
        fn _assert_file<T: File>() {}
        fn _assert_directory<T: Directory>() {}
        fn _assert_protocol<T: ProtocolPlugin>() {}
        fn _assert_content<T: ContentPlugin>() {}
        fn _assert_package<T: Package>() {}
    }
}
