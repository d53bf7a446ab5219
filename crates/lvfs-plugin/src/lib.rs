// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry, module manifests, and the static module catalog.
//!
//! A plugin module exports one package entry point. The registry opens
//! modules through a [`ModuleLoader`], walks the package tables and indexes
//! every plugin by schema or type name, in load order.

pub mod catalog;
pub mod error;
pub mod manifest;
pub mod module;
pub mod registry;

pub use catalog::{CatalogEntry, ModuleCatalog};
pub use error::LoadError;
pub use manifest::{parse_module_manifest, ModuleManifest};
pub use module::{ModuleLoader, PackageFactory, PluginModule};
pub use registry::{LoadReport, PluginRegistry};

/// Version of LVFS that modules are checked against.
pub const LVFS_VERSION: &str = env!("CARGO_PKG_VERSION");
