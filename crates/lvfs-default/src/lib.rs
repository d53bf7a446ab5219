// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The default LVFS plugin module: local files and directories through the
//! `file` schema.

pub mod entry;
pub mod permissions;
pub mod plugin;

use std::sync::Arc;

use lvfs_core::{Package, StaticPackage};
use lvfs_plugin::{parse_module_manifest, LoadError, ModuleCatalog, ModuleManifest, PackageFactory};

pub use entry::{open_path, FsDirectory, FsFile, SCHEMA};
pub use plugin::DefaultProtocolPlugin;

/// Identifier of this module in `plugins.modules`.
pub const MODULE_NAME: &str = "lvfs-default";

const MANIFEST: &str = include_str!("../module.toml");

/// The module manifest shipped with this crate.
pub fn manifest() -> Result<ModuleManifest, LoadError> {
    parse_module_manifest(MANIFEST)
}

/// Builds the package: one protocol plugin for the `file` schema.
pub fn package() -> StaticPackage {
    StaticPackage::new(MODULE_NAME).with_protocol(SCHEMA, Arc::new(DefaultProtocolPlugin::new()))
}

/// Package entry point of this module.
pub fn entry_point() -> PackageFactory {
    Arc::new(|| Some(Box::new(package()) as Box<dyn Package>))
}

/// Adds this module to `catalog`.
pub fn register(catalog: &mut ModuleCatalog) -> Result<(), LoadError> {
    catalog.register(manifest()?, entry_point());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_matches_package() {
        let manifest = manifest().unwrap();
        assert_eq!(manifest.name, MODULE_NAME);
        let package = package();
        for slot in package.protocol_plugins() {
            assert!(manifest.declares_protocol(&slot.key));
        }
    }

    #[test]
    fn register_adds_loadable_module() {
        let mut catalog = ModuleCatalog::new();
        register(&mut catalog).unwrap();
        let entry = catalog.get(MODULE_NAME).unwrap();
        assert!(entry.factory.is_some());
    }
}
