// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package descriptors: the capability tables a plugin module exports.

use std::fmt;
use std::sync::Arc;

use crate::traits::plugin::{ContentPlugin, ProtocolPlugin};

/// One row of a package table: a dispatch key and the plugin serving it.
pub struct PluginSlot<P: ?Sized> {
    /// Schema for protocol plugins, type name for content plugins.
    pub key: String,
    pub plugin: Arc<P>,
}

impl<P: ?Sized> PluginSlot<P> {
    pub fn new(key: impl Into<String>, plugin: Arc<P>) -> Self {
        Self {
            key: key.into(),
            plugin,
        }
    }
}

impl<P: ?Sized> Clone for PluginSlot<P> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            plugin: Arc::clone(&self.plugin),
        }
    }
}

impl<P: ?Sized> fmt::Debug for PluginSlot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSlot").field("key", &self.key).finish()
    }
}

/// A content-plugin table row, keyed by type name.
pub type ContentSlot = PluginSlot<dyn ContentPlugin>;

/// A protocol-plugin table row, keyed by schema.
pub type ProtocolSlot = PluginSlot<dyn ProtocolPlugin>;

/// Descriptor returned by a module's package entry point.
///
/// Table order is registration order, and registration order is dispatch
/// priority.
pub trait Package: Send + Sync {
    /// Name of the package, for diagnostics.
    fn name(&self) -> &str;

    /// Content plugins exported by this package.
    fn content_plugins(&self) -> &[ContentSlot];

    /// Protocol plugins exported by this package.
    fn protocol_plugins(&self) -> &[ProtocolSlot];
}

/// A [`Package`] assembled in code.
#[derive(Debug, Default)]
pub struct StaticPackage {
    name: String,
    content: Vec<ContentSlot>,
    protocol: Vec<ProtocolSlot>,
}

impl StaticPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            protocol: Vec::new(),
        }
    }

    /// Appends a protocol plugin serving `schema`.
    pub fn with_protocol(mut self, schema: impl Into<String>, plugin: Arc<dyn ProtocolPlugin>) -> Self {
        self.protocol.push(PluginSlot::new(schema, plugin));
        self
    }

    /// Appends a content plugin serving `type_name`.
    pub fn with_content(mut self, type_name: impl Into<String>, plugin: Arc<dyn ContentPlugin>) -> Self {
        self.content.push(PluginSlot::new(type_name, plugin));
        self
    }
}

impl Package for StaticPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_plugins(&self) -> &[ContentSlot] {
        &self.content
    }

    fn protocol_plugins(&self) -> &[ProtocolSlot] {
        &self.protocol
    }
}
