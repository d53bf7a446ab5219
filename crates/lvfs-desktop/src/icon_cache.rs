// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Icon resolution memoized by `(name, size, context)`.

use std::sync::Arc;

use lvfs_core::{Context, Icon, IconHandle};

use crate::cache::{Cache, CacheIndex, CacheStats};
use crate::lookup::DesktopLookup;

/// Resolves icons of one theme through a [`DesktopLookup`], once per key.
pub struct IconCache {
    cache: Cache<IconHandle>,
    lookup: Arc<dyn DesktopLookup>,
    theme: String,
}

impl IconCache {
    pub fn new(lookup: Arc<dyn DesktopLookup>, theme: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(),
            lookup,
            theme: theme.into(),
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Icon `name` of `context` at `size`.
    pub fn find_icon(&self, name: &str, size: u32, context: Context) -> Option<IconHandle> {
        self.cache.populate(CacheIndex::new(name, size, context), || {
            self.lookup
                .find_icon(name, size, context, &self.theme)
                .map(|path| Arc::new(Icon::new(path)))
        })
    }

    /// Icon of MIME type `type_name` at `size`.
    pub fn find_mime_icon(&self, type_name: &str, size: u32) -> Option<IconHandle> {
        self.cache
            .populate(CacheIndex::new(type_name, size, Context::MimeTypes), || {
                self.lookup
                    .find_mime_icon(type_name, size, &self.theme)
                    .map(|path| Arc::new(Icon::new(path)))
            })
    }

    /// Icon of `type_name`, or of `fallback` when `type_name` has none.
    ///
    /// Each type is cached under its own key, so a plain
    /// [`find_mime_icon`](Self::find_mime_icon) on `type_name` afterwards
    /// still reports the missing icon.
    pub fn find_mime_icon_or(&self, type_name: &str, fallback: &str, size: u32) -> Option<IconHandle> {
        self.find_mime_icon(type_name, size)
            .or_else(|| self.find_mime_icon(fallback, size))
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for IconCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCache")
            .field("theme", &self.theme)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::lookup::DesktopEntry;

    /// Knows one icon per name listed, counts every call.
    #[derive(Default)]
    struct Counting {
        known: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl DesktopLookup for Counting {
        fn find_icon(&self, name: &str, _size: u32, _context: Context, theme: &str) -> Option<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.known
                .contains(&name)
                .then(|| PathBuf::from(format!("/icons/{theme}/{name}.png")))
        }

        fn find_mime_icon(&self, mime: &str, size: u32, theme: &str) -> Option<PathBuf> {
            self.find_icon(mime, size, Context::MimeTypes, theme)
        }

        fn find_applications(&self, _type_name: &str) -> Vec<DesktopEntry> {
            Vec::new()
        }

        fn find_known_applications(&self, _type_name: &str) -> Vec<DesktopEntry> {
            Vec::new()
        }
    }

    fn cache(known: Vec<&'static str>) -> (Arc<Counting>, IconCache) {
        let lookup = Arc::new(Counting {
            known,
            ..Default::default()
        });
        let cache = IconCache::new(lookup.clone(), "hicolor");
        (lookup, cache)
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let (lookup, icons) = cache(vec!["folder"]);
        let first = icons.find_icon("folder", 16, Context::Places).unwrap();
        let second = icons.find_icon("folder", 16, Context::Places).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.path(), std::path::Path::new("/icons/hicolor/folder.png"));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_icons_are_not_looked_up_twice() {
        let (lookup, icons) = cache(vec![]);
        assert!(icons.find_icon("nope", 16, Context::Actions).is_none());
        assert!(icons.find_icon("nope", 16, Context::Actions).is_none());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(icons.stats().misses, 1);
    }

    #[test]
    fn mime_icon_fallback_is_cached_under_its_own_type() {
        let (lookup, icons) = cache(vec!["text/plain"]);
        let icon = icons.find_mime_icon_or("text/x-weird", "text/plain", 16).unwrap();
        assert_eq!(icon.path(), std::path::Path::new("/icons/hicolor/text/plain.png"));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);

        assert!(icons.find_mime_icon("text/x-weird", 16).is_none());
        let again = icons.find_mime_icon_or("text/x-weird", "text/plain", 16).unwrap();
        assert!(Arc::ptr_eq(&icon, &again));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cached_miss_still_tries_the_fallback() {
        let (lookup, icons) = cache(vec!["text/plain"]);
        assert!(icons.find_mime_icon("text/x-weird", 16).is_none());
        assert!(icons.find_mime_icon_or("text/x-weird", "text/plain", 16).is_some());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn contexts_are_cached_separately() {
        let (lookup, icons) = cache(vec!["x"]);
        icons.find_icon("x", 16, Context::Actions);
        icons.find_icon("x", 16, Context::Devices);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }
}
