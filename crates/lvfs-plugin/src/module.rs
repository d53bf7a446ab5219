// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The module boundary: how the registry obtains packages.

use std::sync::Arc;

use lvfs_core::Package;

use crate::error::LoadError;
use crate::manifest::ModuleManifest;

/// A module's package entry point.
///
/// Returns `None` when the module cannot build its package.
pub type PackageFactory = Arc<dyn Fn() -> Option<Box<dyn Package>> + Send + Sync>;

/// An opened plugin module.
///
/// The registry keeps the module until teardown and calls [`unload`] only
/// after every plugin the module produced has been dropped.
///
/// [`unload`]: PluginModule::unload
pub trait PluginModule: Send + Sync {
    fn id(&self) -> &str;

    /// Manifest shipped with the module, if any.
    fn manifest(&self) -> Option<&ModuleManifest> {
        None
    }

    /// Resolves the package entry point.
    fn entry_point(&self) -> Option<PackageFactory>;

    /// Releases the module.
    fn unload(self: Box<Self>) {}
}

/// Opens plugin modules by identifier.
pub trait ModuleLoader {
    fn open(&self, id: &str) -> Result<Box<dyn PluginModule>, LoadError>;
}
