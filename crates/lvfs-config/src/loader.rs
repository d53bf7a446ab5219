// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lvfs.toml` > `~/.config/lvfs/lvfs.toml` > `/etc/lvfs/lvfs.toml`
//! with environment variable overrides via `LVFS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::LvfsConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lvfs/lvfs.toml";

/// Configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "lvfs.toml";

/// Per-user configuration file under the XDG config directory, if one is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lvfs/lvfs.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lvfs/lvfs.toml` (system-wide)
/// 3. `~/.config/lvfs/lvfs.toml` (user XDG config)
/// 4. `./lvfs.toml` (local directory)
/// 5. `LVFS_*` environment variables
pub fn load_config() -> Result<LvfsConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LvfsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LvfsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LvfsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LvfsConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LvfsConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LVFS_RESOLVER_MAX_SCHEMA_LENGTH` must map to
/// `resolver.max_schema_length`, not `resolver.max.schema.length`.
fn env_provider() -> Env {
    Env::prefixed("LVFS_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("plugins_", "plugins.", 1)
            .replacen("resolver_", "resolver.", 1)
            .replacen("desktop_", "desktop.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
