// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock module loader with a teardown-order probe.
//!
//! Every plugin a [`MockLoader`] module produces is tracked by a weak
//! reference. When the module is unloaded the probe checks that none of
//! them is still alive; any survivor is recorded as a violation.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use lvfs_core::{ContentPlugin, Package, ProtocolPlugin, StaticPackage};
use lvfs_plugin::{LoadError, ModuleLoader, ModuleManifest, PackageFactory, PluginModule};
use parking_lot::Mutex;

type ProtocolMaker = Arc<dyn Fn() -> Arc<dyn ProtocolPlugin> + Send + Sync>;
type ContentMaker = Arc<dyn Fn() -> Arc<dyn ContentPlugin> + Send + Sync>;

#[derive(Default)]
struct ProbeState {
    events: Vec<String>,
    violations: Vec<String>,
    protocols: Vec<(String, Weak<dyn ProtocolPlugin>)>,
    contents: Vec<(String, Weak<dyn ContentPlugin>)>,
}

/// Records module lifecycle events and plugins that outlive their module.
#[derive(Clone, Default)]
pub struct TeardownProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl TeardownProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle events in order: `open <id>`, `package <id>`, `unload <id>`.
    pub fn events(&self) -> Vec<String> {
        self.state.lock().events.clone()
    }

    /// Plugins that were still referenced when their module unloaded.
    pub fn violations(&self) -> Vec<String> {
        self.state.lock().violations.clone()
    }

    /// Number of tracked plugins still alive.
    pub fn live_plugins(&self) -> usize {
        let state = self.state.lock();
        state.protocols.iter().filter(|(_, w)| w.strong_count() > 0).count()
            + state.contents.iter().filter(|(_, w)| w.strong_count() > 0).count()
    }

    fn record(&self, event: String) {
        self.state.lock().events.push(event);
    }

    fn track_protocol(&self, module: &str, plugin: &Arc<dyn ProtocolPlugin>) {
        self.state
            .lock()
            .protocols
            .push((module.to_string(), Arc::downgrade(plugin)));
    }

    fn track_content(&self, module: &str, plugin: &Arc<dyn ContentPlugin>) {
        self.state
            .lock()
            .contents
            .push((module.to_string(), Arc::downgrade(plugin)));
    }

    fn check_unload(&self, module: &str) {
        let mut state = self.state.lock();
        let alive = state
            .protocols
            .iter()
            .filter(|(m, w)| m == module && w.strong_count() > 0)
            .count()
            + state
                .contents
                .iter()
                .filter(|(m, w)| m == module && w.strong_count() > 0)
                .count();
        if alive > 0 {
            state
                .violations
                .push(format!("{module}: {alive} plugin(s) alive at unload"));
        }
        state.events.push(format!("unload {module}"));
    }
}

impl std::fmt::Debug for TeardownProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeardownProbe")
            .field("events", &self.events())
            .field("violations", &self.violations())
            .finish()
    }
}

#[derive(Clone, Default)]
enum PackageBehavior {
    #[default]
    Build,
    Empty,
    NoEntryPoint,
}

#[derive(Clone, Default)]
struct ModuleDef {
    protocols: Vec<(String, ProtocolMaker)>,
    contents: Vec<(String, ContentMaker)>,
    behavior: PackageBehavior,
    manifest: Option<ModuleManifest>,
}

struct MockModule {
    id: String,
    def: ModuleDef,
    probe: TeardownProbe,
}

impl PluginModule for MockModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn manifest(&self) -> Option<&ModuleManifest> {
        self.def.manifest.as_ref()
    }

    fn entry_point(&self) -> Option<PackageFactory> {
        match self.def.behavior {
            PackageBehavior::NoEntryPoint => None,
            PackageBehavior::Empty => Some(Arc::new(|| None)),
            PackageBehavior::Build => {
                let id = self.id.clone();
                let def = self.def.clone();
                let probe = self.probe.clone();
                Some(Arc::new(move || {
                    probe.record(format!("package {id}"));
                    let mut package = StaticPackage::new(id.clone());
                    for (key, make) in &def.contents {
                        let plugin = make();
                        probe.track_content(&id, &plugin);
                        package = package.with_content(key.clone(), plugin);
                    }
                    for (key, make) in &def.protocols {
                        let plugin = make();
                        probe.track_protocol(&id, &plugin);
                        package = package.with_protocol(key.clone(), plugin);
                    }
                    Some(Box::new(package) as Box<dyn Package>)
                }))
            }
        }
    }

    fn unload(self: Box<Self>) {
        self.probe.check_unload(&self.id);
    }
}

/// Loader over a fixed set of mock modules.
///
/// Plugins are built fresh by each package factory call, so the loader
/// itself never keeps one alive.
#[derive(Clone, Default)]
pub struct MockLoader {
    modules: BTreeMap<String, ModuleDef>,
    probe: TeardownProbe,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> &TeardownProbe {
        &self.probe
    }

    fn def(&mut self, module: &str) -> &mut ModuleDef {
        self.modules.entry(module.to_string()).or_default()
    }

    /// Add a protocol plugin for `schema` to `module`, creating the module if needed.
    pub fn with_protocol<F>(mut self, module: &str, schema: &str, make: F) -> Self
    where
        F: Fn() -> Arc<dyn ProtocolPlugin> + Send + Sync + 'static,
    {
        self.def(module)
            .protocols
            .push((schema.to_string(), Arc::new(make)));
        self
    }

    /// Add a content plugin for `type_name` to `module`, creating the module if needed.
    pub fn with_content<F>(mut self, module: &str, type_name: &str, make: F) -> Self
    where
        F: Fn() -> Arc<dyn ContentPlugin> + Send + Sync + 'static,
    {
        self.def(module)
            .contents
            .push((type_name.to_string(), Arc::new(make)));
        self
    }

    /// A module whose factory returns no package.
    pub fn with_empty_package(mut self, module: &str) -> Self {
        self.def(module).behavior = PackageBehavior::Empty;
        self
    }

    /// A module without a package entry point.
    pub fn with_missing_entry_point(mut self, module: &str) -> Self {
        self.def(module).behavior = PackageBehavior::NoEntryPoint;
        self
    }

    /// Ship `manifest` with the module named by `manifest.name`.
    pub fn with_manifest(mut self, manifest: ModuleManifest) -> Self {
        let name = manifest.name.clone();
        self.def(&name).manifest = Some(manifest);
        self
    }
}

impl ModuleLoader for MockLoader {
    fn open(&self, id: &str) -> Result<Box<dyn PluginModule>, LoadError> {
        let def = self
            .modules
            .get(id)
            .cloned()
            .ok_or_else(|| LoadError::ModuleNotFound { id: id.to_string() })?;
        self.probe.record(format!("open {id}"));
        Ok(Box::new(MockModule {
            id: id.to_string(),
            def,
            probe: self.probe.clone(),
        }))
    }
}

impl std::fmt::Debug for MockLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLoader")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use lvfs_core::ErrorCode;
    use lvfs_plugin::PluginRegistry;

    use super::*;
    use crate::mock_plugin::MockProtocolPlugin;

    fn failing() -> Arc<dyn ProtocolPlugin> {
        MockProtocolPlugin::failing(ErrorCode::NOT_FOUND).into_arc()
    }

    #[test]
    fn registry_teardown_leaves_no_live_plugins() {
        let loader = MockLoader::new()
            .with_protocol("a", "x", failing)
            .with_protocol("b", "x", failing);
        let mut registry = PluginRegistry::new();
        let report = registry.load_all(&loader, &["a", "b"]);
        assert!(report.is_complete());
        assert_eq!(loader.probe().live_plugins(), 2);

        registry.teardown();
        assert!(loader.probe().violations().is_empty());
        assert_eq!(loader.probe().live_plugins(), 0);
        assert_eq!(
            loader.probe().events(),
            ["open a", "package a", "open b", "package b", "unload a", "unload b"]
        );
    }

    #[test]
    fn leaked_plugin_is_a_violation() {
        let leaked: Arc<Mutex<Option<Arc<dyn ProtocolPlugin>>>> = Arc::default();
        let keep = Arc::clone(&leaked);
        let loader = MockLoader::new().with_protocol("a", "x", move || {
            let plugin = failing();
            *keep.lock() = Some(Arc::clone(&plugin));
            plugin
        });
        let mut registry = PluginRegistry::new();
        registry.load_module(&loader, "a").unwrap();
        registry.teardown();
        assert_eq!(loader.probe().violations().len(), 1);
    }

    #[test]
    fn unknown_module_is_not_found() {
        let loader = MockLoader::new();
        assert!(matches!(
            loader.open("nope"),
            Err(LoadError::ModuleNotFound { .. })
        ));
    }
}
