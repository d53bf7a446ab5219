// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Desktop layer for the LVFS virtual filesystem.
//!
//! Icon and application lookups are expensive, so they go through
//! [`Cache`], a read-through store that computes each key once and also
//! remembers keys that resolved to nothing. [`IconCache`] and [`AppsCache`]
//! build on it; [`Desktop`] bundles both with a locale and a theme.

pub mod apps_cache;
pub mod cache;
pub mod desktop;
pub mod desktop_file;
pub mod icon_cache;
pub mod locale;
pub mod lookup;
pub mod xdg;

pub use apps_cache::{Application, Applications, AppsCache};
pub use cache::{Cache, CacheIndex, CacheStats};
pub use desktop::{Desktop, IconType};
pub use icon_cache::IconCache;
pub use locale::Locale;
pub use lookup::{DesktopEntry, DesktopLookup, NullLookup};
pub use xdg::XdgLookup;
