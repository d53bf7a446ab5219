// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::LvfsConfig;

/// Largest accepted `resolver.max_schema_length`.
pub const MAX_SCHEMA_LENGTH_LIMIT: usize = 4096;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LvfsConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let max = config.resolver.max_schema_length;
    if !(1..=MAX_SCHEMA_LENGTH_LIMIT).contains(&max) {
        fail(format!(
            "resolver.max_schema_length must be between 1 and {MAX_SCHEMA_LENGTH_LIMIT}, got {max}"
        ));
    }

    if config.plugins.modules.is_empty() {
        fail("plugins.modules must list at least one module".to_string());
    }

    let mut seen = HashSet::new();
    for (i, module) in config.plugins.modules.iter().enumerate() {
        if module.trim().is_empty() {
            fail(format!("plugins.modules[{i}] must not be empty"));
        } else if !seen.insert(module.as_str()) {
            fail(format!("duplicate module `{module}` in plugins.modules"));
        }
    }

    if config.desktop.icon_theme.trim().is_empty() {
        fail("desktop.icon_theme must not be empty".to_string());
    }

    if config.desktop.icon_size == 0 {
        fail("desktop.icon_size must be greater than zero".to_string());
    }

    let level = config.log.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "log.level `{}` is not one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
