// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static module catalog.
//!
//! Modules are compiled in and registered by name instead of being loaded
//! from shared objects. The catalog doubles as the [`ModuleLoader`] the
//! registry opens modules through.

use std::collections::BTreeMap;

use crate::error::LoadError;
use crate::manifest::ModuleManifest;
use crate::module::{ModuleLoader, PackageFactory, PluginModule};

/// A single entry in the module catalog.
#[derive(Clone)]
pub struct CatalogEntry {
    pub manifest: ModuleManifest,
    /// Package entry point. Manifest-only entries are listed but cannot load.
    pub factory: Option<PackageFactory>,
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("manifest", &self.manifest)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

/// Compiled-in modules keyed by name.
#[derive(Debug, Default, Clone)]
pub struct ModuleCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module with its package entry point.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, manifest: ModuleManifest, factory: PackageFactory) {
        self.insert(manifest, Some(factory));
    }

    /// Register a module for listing only. Loading it fails with
    /// [`LoadError::MissingEntryPoint`].
    pub fn register_manifest_only(&mut self, manifest: ModuleManifest) {
        self.insert(manifest, None);
    }

    fn insert(&mut self, manifest: ModuleManifest, factory: Option<PackageFactory>) {
        self.entries
            .insert(manifest.name.clone(), CatalogEntry { manifest, factory });
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// All entries, sorted by name.
    pub fn list_all(&self) -> Vec<&CatalogEntry> {
        self.entries.values().collect()
    }

    /// Entries whose name or description contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query = query.to_lowercase();
        self.entries
            .values()
            .filter(|e| {
                query.is_empty()
                    || e.manifest.name.to_lowercase().contains(&query)
                    || e.manifest.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ModuleLoader for ModuleCatalog {
    fn open(&self, id: &str) -> Result<Box<dyn PluginModule>, LoadError> {
        let entry = self.entries.get(id).ok_or_else(|| LoadError::ModuleNotFound {
            id: id.to_string(),
        })?;
        Ok(Box::new(StaticModule {
            manifest: entry.manifest.clone(),
            factory: entry.factory.clone(),
        }))
    }
}

/// A catalog entry opened as a module.
struct StaticModule {
    manifest: ModuleManifest,
    factory: Option<PackageFactory>,
}

impl PluginModule for StaticModule {
    fn id(&self) -> &str {
        &self.manifest.name
    }

    fn manifest(&self) -> Option<&ModuleManifest> {
        Some(&self.manifest)
    }

    fn entry_point(&self) -> Option<PackageFactory> {
        self.factory.clone()
    }

    fn unload(self: Box<Self>) {
        tracing::trace!(module = %self.manifest.name, "static module released");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lvfs_core::{Package, StaticPackage};

    use super::*;

    fn factory() -> PackageFactory {
        Arc::new(|| Some(Box::new(StaticPackage::new("test")) as Box<dyn Package>))
    }

    fn catalog() -> ModuleCatalog {
        let mut catalog = ModuleCatalog::new();
        catalog.register(
            ModuleManifest::new("lvfs-default", "0.1.0", "Local filesystem access"),
            factory(),
        );
        catalog.register_manifest_only(ModuleManifest::new(
            "lvfs-archive",
            "0.1.0",
            "Browse ZIP and TAR archives",
        ));
        catalog
    }

    #[test]
    fn list_all_is_sorted() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .list_all()
            .iter()
            .map(|e| e.manifest.name.as_str())
            .collect();
        assert_eq!(names, ["lvfs-archive", "lvfs-default"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn search_matches_description_ignoring_case() {
        let catalog = catalog();
        let results = catalog.search("ZIP");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].manifest.name, "lvfs-archive");
        assert_eq!(catalog.search("").len(), 2);
        assert!(catalog.search("nonexistent").is_empty());
    }

    #[test]
    fn open_unknown_module_fails() {
        assert!(matches!(
            catalog().open("missing"),
            Err(LoadError::ModuleNotFound { id }) if id == "missing"
        ));
    }

    #[test]
    fn manifest_only_entry_has_no_entry_point() {
        let module = catalog().open("lvfs-archive").unwrap();
        assert_eq!(module.id(), "lvfs-archive");
        assert!(module.entry_point().is_none());
    }

    #[test]
    fn registered_entry_builds_package() {
        let module = catalog().open("lvfs-default").unwrap();
        let factory = module.entry_point().unwrap();
        assert_eq!(factory().unwrap().name(), "test");
        assert_eq!(module.manifest().unwrap().description, "Local filesystem access");
    }
}
