// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LVFS: a pluggable virtual filesystem.
//!
//! A [`Resolver`] turns `schema://path` URIs into entries by asking the
//! protocol plugins of the configured modules, then lets content plugins
//! replace the entry based on its type. The desktop layer answers icon and
//! application questions for those types.

pub mod catalog;
pub mod resolver;
pub mod uri;

use std::path::PathBuf;
use std::sync::Arc;

use lvfs_config::DesktopConfig;
use lvfs_desktop::{Desktop, Locale, XdgLookup};

pub use catalog::builtin_catalog;
pub use resolver::Resolver;
pub use uri::{split_uri, Uri, DEFAULT_SCHEMA};

/// Build the desktop facade from configuration and the process environment.
pub fn desktop_from_config(config: &DesktopConfig) -> Desktop {
    let locale = Locale::from_env();
    let extra: Vec<PathBuf> = config.data_dirs.iter().map(PathBuf::from).collect();
    let lookup = XdgLookup::from_env(&extra, locale.clone());
    Desktop::new(Arc::new(lookup), config.icon_theme.clone(), locale)
}
