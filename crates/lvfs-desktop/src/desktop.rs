// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Desktop integration facade: locale, icon theme, and cached lookups.

use std::sync::Arc;

use lvfs_core::{mime, Context, IconHandle, MimeType, SMALL_ICON_SIZE};

use crate::apps_cache::{Applications, AppsCache};
use crate::icon_cache::IconCache;
use crate::locale::Locale;
use crate::lookup::DesktopLookup;

/// Type name whose icon stands in for types without one.
const FALLBACK_ICON_TYPE: &str = "text/plain";

/// Which icon a file type gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconType {
    /// Icon of the preferred application.
    OnlyAppIcon,
    /// Icon of the type, or the plain-text icon.
    OnlyTypeIcon,
    /// Icon of the type, or of the preferred application when the type has none.
    #[default]
    AppIconIfNoTypeIcon,
}

/// Icons, applications and file types for one locale and icon theme.
pub struct Desktop {
    locale: Locale,
    icons: Arc<IconCache>,
    apps: AppsCache,
}

impl Desktop {
    pub fn new(lookup: Arc<dyn DesktopLookup>, theme: impl Into<String>, locale: Locale) -> Self {
        let icons = Arc::new(IconCache::new(Arc::clone(&lookup), theme));
        let apps = AppsCache::new(lookup, Arc::clone(&icons));
        Self {
            locale,
            icons,
            apps,
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn theme(&self) -> &str {
        self.icons.theme()
    }

    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    pub fn apps(&self) -> &AppsCache {
        &self.apps
    }

    /// Small icon `name` of `context`.
    pub fn icon(&self, name: &str, context: Context) -> Option<IconHandle> {
        self.icons.find_icon(name, SMALL_ICON_SIZE, context)
    }

    pub fn icon_sized(&self, name: &str, size: u32, context: Context) -> Option<IconHandle> {
        self.icons.find_icon(name, size, context)
    }

    /// Small icon of MIME type `type_name`.
    pub fn mime_icon(&self, type_name: &str) -> Option<IconHandle> {
        self.icons.find_mime_icon(type_name, SMALL_ICON_SIZE)
    }

    pub fn applications(&self, type_name: &str) -> Applications {
        self.apps.find_applications(type_name)
    }

    /// Type of a regular file guessed from its name, with an icon chosen by `icon_type`.
    pub fn type_of_file(&self, file_name: &str, icon_type: IconType) -> MimeType {
        let mime = mime::guess(file_name);
        let icon = match icon_type {
            IconType::OnlyAppIcon => self
                .first_app_icon(mime.name())
                .or_else(|| self.mime_icon(FALLBACK_ICON_TYPE)),
            IconType::OnlyTypeIcon => {
                self.icons
                    .find_mime_icon_or(mime.name(), FALLBACK_ICON_TYPE, SMALL_ICON_SIZE)
            }
            IconType::AppIconIfNoTypeIcon => self
                .mime_icon(mime.name())
                .or_else(|| self.first_app_icon(mime.name()))
                .or_else(|| self.mime_icon(FALLBACK_ICON_TYPE)),
        };
        mime.with_icon(icon)
    }

    pub fn type_of_directory(&self) -> MimeType {
        let dir = mime::directory();
        let icon = self.mime_icon(dir.name());
        dir.with_icon(icon)
    }

    pub fn type_of_unknown_file(&self) -> MimeType {
        let unknown = mime::unknown();
        let icon = self.mime_icon(unknown.name());
        unknown.with_icon(icon)
    }

    fn first_app_icon(&self, type_name: &str) -> Option<IconHandle> {
        self.applications(type_name)
            .first()
            .and_then(|app| app.icon().cloned())
    }
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("locale", &self.locale.to_string())
            .field("theme", &self.theme())
            .finish()
    }
}
