// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolver: URI to entry through protocol plugins, then entry to richer
//! entry through content plugins.
//!
//! Only one resolver may be alive per process. Construction claims a global
//! flag and dropping the resolver releases it after the registry has been
//! torn down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lvfs_config::LvfsConfig;
use lvfs_core::{ErrorCode, Handle, LvfsError, ProtocolPlugin};
use lvfs_default::DefaultProtocolPlugin;
use lvfs_plugin::{LoadReport, ModuleLoader, PluginRegistry};
use tracing::{debug, info, trace};

use crate::uri::{split_uri, DEFAULT_SCHEMA};

static INSTANCE_ALIVE: AtomicBool = AtomicBool::new(false);

/// Dispatches URIs to the plugins of the loaded modules.
///
/// Dispatch never mutates the registry, so a shared `&Resolver` can serve
/// concurrent `open` calls.
pub struct Resolver {
    registry: PluginRegistry,
    report: LoadReport,
    /// Built-in plugin tried for `file` URIs after the registered ones.
    fallback: Option<Arc<dyn ProtocolPlugin>>,
    max_schema_length: usize,
}

impl Resolver {
    /// Load the configured modules in order through `loader`.
    ///
    /// Modules that fail to load are logged and skipped. Fails with
    /// [`LvfsError::ResolverExists`] while another resolver is alive.
    pub fn new(config: &LvfsConfig, loader: &dyn ModuleLoader) -> Result<Self, LvfsError> {
        let max_schema_length = config.resolver.max_schema_length;
        if max_schema_length == 0 {
            return Err(LvfsError::Config(
                "resolver.max_schema_length must be greater than 0".to_string(),
            ));
        }

        if INSTANCE_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LvfsError::ResolverExists);
        }

        let mut registry = PluginRegistry::new();
        let report = registry.load_all(loader, &config.plugins.modules);
        // The fallback would only repeat the registered plugin of the same module.
        let default_loaded = report
            .loaded
            .iter()
            .any(|name| name == lvfs_default::MODULE_NAME);
        let fallback = (config.resolver.default_fallback && !default_loaded)
            .then(|| Arc::new(DefaultProtocolPlugin::new()) as Arc<dyn ProtocolPlugin>);

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            fallback = fallback.is_some(),
            "resolver ready"
        );

        Ok(Self {
            registry,
            report,
            fallback,
            max_schema_length,
        })
    }

    /// Whether a resolver currently exists in this process.
    pub fn is_alive() -> bool {
        INSTANCE_ALIVE.load(Ordering::Acquire)
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Which configured modules loaded and which were skipped.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Whether the built-in `file` plugin is tried after the registered ones.
    /// Off when `lvfs-default` is loaded as a module.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn max_schema_length(&self) -> usize {
        self.max_schema_length
    }

    /// Open `uri` and let content plugins replace the entry.
    ///
    /// When no content plugin claims the entry's type, the entry from the
    /// protocol plugin is returned unchanged.
    pub fn open(&self, uri: &str) -> Result<Handle, LvfsError> {
        let entry = self.open_entry(uri)?;
        match self.enrich(&entry) {
            Ok(enriched) => Ok(enriched),
            Err(LvfsError::NoContentHandler { .. }) => Ok(entry),
            Err(e) => Err(e),
        }
    }

    /// Open `uri` through protocol plugins only.
    ///
    /// Plugins registered for the schema are tried in load order and the
    /// first entry wins. For `file` URIs the built-in plugin is tried last
    /// when enabled.
    pub fn open_entry(&self, uri: &str) -> Result<Handle, LvfsError> {
        let uri = split_uri(uri, self.max_schema_length)?;
        let registered = self.registry.protocol_plugins(uri.schema);
        let fallback = self
            .fallback
            .as_ref()
            .filter(|_| uri.schema == DEFAULT_SCHEMA);

        if registered.is_empty() && fallback.is_none() {
            return Err(LvfsError::NoProtocolHandler {
                schema: uri.schema.to_string(),
            });
        }

        let mut last_error = ErrorCode::OK;
        for (index, plugin) in registered.iter().chain(fallback).enumerate() {
            trace!(schema = %uri.schema, path = %uri.path, index, "trying protocol plugin");
            if let Some(entry) = plugin.open(uri.path) {
                debug!(schema = %uri.schema, path = %uri.path, index, "opened");
                return Ok(entry);
            }
            last_error = plugin.last_error();
        }

        Err(LvfsError::NotOpened {
            schema: uri.schema.to_string(),
            path: uri.path.to_string(),
            error: last_error,
        })
    }

    /// Offer `entry` to the content plugins registered for its type.
    ///
    /// Returns the first replacement, or [`LvfsError::NoContentHandler`] when
    /// every plugin declines or none is registered.
    pub fn enrich(&self, entry: &Handle) -> Result<Handle, LvfsError> {
        let type_name = entry.entry_type().name();
        for (index, plugin) in self.registry.content_plugins(type_name).iter().enumerate() {
            trace!(type_name, index, "trying content plugin");
            if let Some(enriched) = plugin.open(entry) {
                debug!(type_name, index, title = %entry.title(), "entry claimed by content plugin");
                return Ok(enriched);
            }
            trace!(type_name, index, error = %plugin.last_error(), "content plugin declined");
        }
        Err(LvfsError::NoContentHandler {
            type_name: type_name.to_string(),
        })
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        self.fallback = None;
        self.registry.teardown();
        INSTANCE_ALIVE.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .field("fallback", &self.fallback.is_some())
            .field("max_schema_length", &self.max_schema_length)
            .finish()
    }
}
