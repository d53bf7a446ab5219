// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry: loaded modules and the dispatch tables built from them.
//!
//! Protocol plugins are indexed by schema and content plugins by type name.
//! Each key maps to the plugins of every loaded module, in load order, which
//! is also dispatch priority. Nothing is removed until teardown.

use std::collections::BTreeMap;
use std::sync::Arc;

use lvfs_core::{ContentPlugin, Package, ProtocolPlugin};
use semver::Version;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::module::{ModuleLoader, PluginModule};
use crate::LVFS_VERSION;

/// A module that produced a package, kept until teardown.
struct LoadedModule {
    module: Box<dyn PluginModule>,
    package: Box<dyn Package>,
}

/// Outcome of [`PluginRegistry::load_all`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Modules that loaded, in load order.
    pub loaded: Vec<String>,
    /// Modules that were skipped and why.
    pub failed: Vec<(String, LoadError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Registry of loaded plugin modules.
pub struct PluginRegistry {
    protocols: BTreeMap<String, Vec<Arc<dyn ProtocolPlugin>>>,
    contents: BTreeMap<String, Vec<Arc<dyn ContentPlugin>>>,
    modules: Vec<LoadedModule>,
    running: Version,
}

impl PluginRegistry {
    /// Create an empty registry checking modules against this LVFS version.
    pub fn new() -> Self {
        let running = Version::parse(LVFS_VERSION).unwrap_or_else(|_| Version::new(0, 0, 0));
        Self::with_version(running)
    }

    /// Create an empty registry checking modules against `running`.
    pub fn with_version(running: Version) -> Self {
        Self {
            protocols: BTreeMap::new(),
            contents: BTreeMap::new(),
            modules: Vec::new(),
            running,
        }
    }

    /// Open module `id` through `loader` and index the plugins of its package.
    ///
    /// On any failure the module is unloaded before returning, so it never
    /// stays mapped without entries.
    pub fn load_module(&mut self, loader: &dyn ModuleLoader, id: &str) -> Result<(), LoadError> {
        if self.modules.iter().any(|m| m.module.id() == id) {
            return Err(LoadError::AlreadyLoaded { id: id.to_string() });
        }

        let module = loader.open(id)?;

        if let Some(manifest) = module.manifest()
            && let Err(e) = manifest.check_compatible(&self.running)
        {
            module.unload();
            return Err(e);
        }

        let Some(entry_point) = module.entry_point() else {
            module.unload();
            return Err(LoadError::MissingEntryPoint { id: id.to_string() });
        };

        let package = entry_point();
        drop(entry_point);
        let Some(package) = package else {
            module.unload();
            return Err(LoadError::InvalidPackage { id: id.to_string() });
        };

        if let Some(manifest) = module.manifest() {
            for slot in package.protocol_plugins() {
                if !manifest.declares_protocol(&slot.key) {
                    warn!(module = %id, schema = %slot.key, "package registers a schema its manifest does not declare");
                }
            }
        }

        for slot in package.content_plugins() {
            self.contents
                .entry(slot.key.clone())
                .or_default()
                .push(Arc::clone(&slot.plugin));
            slot.plugin.registered();
        }
        for slot in package.protocol_plugins() {
            self.protocols
                .entry(slot.key.clone())
                .or_default()
                .push(Arc::clone(&slot.plugin));
            slot.plugin.registered();
        }

        info!(
            module = %id,
            package = %package.name(),
            protocols = package.protocol_plugins().len(),
            content = package.content_plugins().len(),
            "module loaded"
        );

        self.modules.push(LoadedModule { module, package });
        Ok(())
    }

    /// Load each module in order, logging and skipping the ones that fail.
    pub fn load_all<S: AsRef<str>>(&mut self, loader: &dyn ModuleLoader, ids: &[S]) -> LoadReport {
        let mut report = LoadReport::default();
        for id in ids {
            let id = id.as_ref();
            match self.load_module(loader, id) {
                Ok(()) => report.loaded.push(id.to_string()),
                Err(e) => {
                    warn!(module = %id, error = %e, "failed to load plugin module, skipping");
                    report.failed.push((id.to_string(), e));
                }
            }
        }
        report
    }

    /// Protocol plugins for `schema`, in dispatch order.
    pub fn protocol_plugins(&self, schema: &str) -> &[Arc<dyn ProtocolPlugin>] {
        self.protocols.get(schema).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Content plugins for `type_name`, in dispatch order.
    pub fn content_plugins(&self, type_name: &str) -> &[Arc<dyn ContentPlugin>] {
        self.contents.get(type_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registered schemas, sorted.
    pub fn schemas(&self) -> impl Iterator<Item = &str> {
        self.protocols.keys().map(String::as_str)
    }

    /// Registered content type names, sorted.
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.contents.keys().map(String::as_str)
    }

    /// Identifiers of loaded modules, in load order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.module.id())
    }

    /// Number of loaded modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Drop every plugin reference, then unload the modules.
    ///
    /// Both maps are cleared before the first module is unloaded.
    pub fn teardown(&mut self) {
        if self.modules.is_empty() && self.protocols.is_empty() && self.contents.is_empty() {
            return;
        }
        self.protocols.clear();
        self.contents.clear();

        let modules = std::mem::take(&mut self.modules);
        debug!(count = modules.len(), "unloading plugin modules");
        for LoadedModule { module, package } in modules {
            drop(package);
            module.unload();
        }
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PluginRegistry {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("modules", &self.modules().collect::<Vec<_>>())
            .field("schemas", &self.schemas().collect::<Vec<_>>())
            .field("content_types", &self.content_types().collect::<Vec<_>>())
            .finish()
    }
}
