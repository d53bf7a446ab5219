// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing from `module.toml` files.
//!
//! A manifest describes what a plugin module provides: the schemas its
//! protocol plugins serve, the type names its content plugins claim, and the
//! oldest LVFS release it works with.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Parsed module manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module identifier, as listed in `plugins.modules`.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    pub description: String,
    pub author: Option<String>,
    /// Schemas served by the module's protocol plugins.
    pub protocols: Vec<String>,
    /// Type names claimed by the module's content plugins.
    pub content_types: Vec<String>,
    /// Minimum LVFS version required (e.g., "0.1.0").
    pub min_lvfs_version: Option<String>,
}

impl ModuleManifest {
    /// A manifest with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            author: None,
            protocols: Vec::new(),
            content_types: Vec::new(),
            min_lvfs_version: None,
        }
    }

    pub fn with_protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = protocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_lvfs_version(mut self, version: impl Into<String>) -> Self {
        self.min_lvfs_version = Some(version.into());
        self
    }

    /// Fails with [`LoadError::Incompatible`] if `running` is older than
    /// `min_lvfs_version`.
    pub fn check_compatible(&self, running: &Version) -> Result<(), LoadError> {
        let Some(required) = &self.min_lvfs_version else {
            return Ok(());
        };
        let min = Version::parse(required)
            .map_err(|e| LoadError::Manifest(format!("{}: min_lvfs_version: {e}", self.name)))?;
        if *running < min {
            return Err(LoadError::Incompatible {
                id: self.name.clone(),
                required: required.clone(),
                running: running.to_string(),
            });
        }
        Ok(())
    }

    /// Whether the manifest lists `schema` among its protocols.
    pub fn declares_protocol(&self, schema: &str) -> bool {
        self.protocols.iter().any(|p| p == schema)
    }
}

#[derive(Debug, Deserialize)]
struct ModuleManifestFile {
    module: ModuleSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleSection {
    name: String,
    version: String,
    #[serde(default)]
    description: String,
    author: Option<String>,
    #[serde(default)]
    protocols: Vec<String>,
    #[serde(default)]
    content_types: Vec<String>,
    min_lvfs_version: Option<String>,
}

/// Parse a module manifest from TOML content.
pub fn parse_module_manifest(toml_content: &str) -> Result<ModuleManifest, LoadError> {
    let file: ModuleManifestFile = toml::from_str(toml_content)
        .map_err(|e| LoadError::Manifest(format!("invalid module manifest: {e}")))?;
    let section = file.module;

    if section.name.trim().is_empty() {
        return Err(LoadError::Manifest("name must not be empty".to_string()));
    }

    if section.version.is_empty() {
        return Err(LoadError::Manifest("version must not be empty".to_string()));
    }

    Version::parse(&section.version)
        .map_err(|e| LoadError::Manifest(format!("version `{}`: {e}", section.version)))?;

    if let Some(min) = &section.min_lvfs_version {
        Version::parse(min)
            .map_err(|e| LoadError::Manifest(format!("min_lvfs_version `{min}`: {e}")))?;
    }

    if let Some(bad) = section.protocols.iter().find(|s| !is_valid_schema(s)) {
        return Err(LoadError::Manifest(format!("invalid protocol schema `{bad}`")));
    }

    if let Some(bad) = section.content_types.iter().find(|t| !is_valid_type_name(t)) {
        return Err(LoadError::Manifest(format!("invalid content type `{bad}`")));
    }

    Ok(ModuleManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        author: section.author,
        protocols: section.protocols,
        content_types: section.content_types,
        min_lvfs_version: section.min_lvfs_version,
    })
}

/// URI scheme syntax: a letter followed by letters, digits, `+`, `-` or `.`.
pub fn is_valid_schema(schema: &str) -> bool {
    let mut chars = schema.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_valid_type_name(type_name: &str) -> bool {
    matches!(type_name.split_once('/'), Some((major, minor)) if !major.is_empty() && !minor.is_empty())
}
