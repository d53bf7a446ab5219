// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for LVFS.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level LVFS configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LvfsConfig {
    /// Plugin modules to load at startup.
    #[serde(default)]
    pub plugins: PluginsConfig,

    /// URI resolution settings.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Icon theme and application lookup settings.
    #[serde(default)]
    pub desktop: DesktopConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Plugin module configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Module identifiers, in load order. Load order is dispatch priority.
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            modules: default_modules(),
        }
    }
}

fn default_modules() -> Vec<String> {
    vec!["lvfs-default".to_string()]
}

/// URI resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Schemas of this many bytes or more are rejected.
    #[serde(default = "default_max_schema_length")]
    pub max_schema_length: usize,

    /// Open `file` URIs with the built-in filesystem plugin when no loaded
    /// module handles them.
    #[serde(default = "default_true")]
    pub default_fallback: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_schema_length: default_max_schema_length(),
            default_fallback: true,
        }
    }
}

fn default_max_schema_length() -> usize {
    128
}

fn default_true() -> bool {
    true
}

/// Desktop lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DesktopConfig {
    /// Icon theme searched before `hicolor`.
    #[serde(default = "default_icon_theme")]
    pub icon_theme: String,

    /// Default icon edge length in pixels.
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,

    /// Extra XDG data directories, searched before the standard ones.
    #[serde(default)]
    pub data_dirs: Vec<String>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            icon_theme: default_icon_theme(),
            icon_size: default_icon_size(),
            data_dirs: Vec::new(),
        }
    }
}

fn default_icon_theme() -> String {
    "hicolor".to_string()
}

fn default_icon_size() -> u32 {
    16
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
