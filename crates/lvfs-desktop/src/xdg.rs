// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem-backed [`DesktopLookup`] following the XDG base directory,
//! icon theme, and desktop entry layouts.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use lvfs_core::Context;
use tracing::debug;

use crate::desktop_file::{split_list, ApplicationFile, KeyFile};
use crate::locale::Locale;
use crate::lookup::{DesktopEntry, DesktopLookup};

const ICON_EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];
const FALLBACK_THEME: &str = "hicolor";
const ADDED_ASSOCIATIONS: &str = "Added Associations";

/// Looks up icons and applications under XDG data and config directories.
#[derive(Debug, Clone)]
pub struct XdgLookup {
    data_dirs: Vec<PathBuf>,
    config_dirs: Vec<PathBuf>,
    locale: Locale,
}

impl XdgLookup {
    /// Uses explicit directories, searched in the given order.
    pub fn with_dirs(data_dirs: Vec<PathBuf>, config_dirs: Vec<PathBuf>, locale: Locale) -> Self {
        Self {
            data_dirs,
            config_dirs,
            locale,
        }
    }

    /// Uses `extra_data_dirs`, then `$XDG_DATA_HOME`, then `$XDG_DATA_DIRS`
    /// (default `/usr/local/share:/usr/share`). Config comes from
    /// `$XDG_CONFIG_HOME` and `/etc/xdg`.
    pub fn from_env(extra_data_dirs: &[PathBuf], locale: Locale) -> Self {
        let mut data_dirs: Vec<PathBuf> = extra_data_dirs.to_vec();
        data_dirs.extend(dirs::data_dir());
        match std::env::var("XDG_DATA_DIRS") {
            Ok(value) if !value.is_empty() => {
                data_dirs.extend(std::env::split_paths(&value).filter(|p| p.is_absolute()))
            }
            _ => data_dirs.extend(["/usr/local/share", "/usr/share"].map(PathBuf::from)),
        }
        dedup_paths(&mut data_dirs);

        let mut config_dirs: Vec<PathBuf> = dirs::config_dir().into_iter().collect();
        config_dirs.push(PathBuf::from("/etc/xdg"));
        dedup_paths(&mut config_dirs);

        debug!(data_dirs = ?data_dirs, "xdg lookup directories");
        Self::with_dirs(data_dirs, config_dirs, locale)
    }

    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn find_in_theme(&self, name: &str, size: u32, context: Context, theme: &str) -> Option<PathBuf> {
        let sized = format!("{size}x{size}");
        self.data_dirs.iter().find_map(|data| {
            let theme_dir = data.join("icons").join(theme);
            let fixed = theme_dir.join(&sized).join(context.theme_dir());
            ICON_EXTENSIONS
                .iter()
                .map(|ext| fixed.join(format!("{name}.{ext}")))
                .chain(std::iter::once(
                    theme_dir
                        .join("scalable")
                        .join(context.theme_dir())
                        .join(format!("{name}.svg")),
                ))
                .find(|p| p.is_file())
        })
    }

    fn find_pixmap(&self, name: &str) -> Option<PathBuf> {
        self.data_dirs.iter().find_map(|data| {
            let pixmaps = data.join("pixmaps");
            std::iter::once(pixmaps.join(name))
                .chain(ICON_EXTENSIONS.iter().map(|ext| pixmaps.join(format!("{name}.{ext}"))))
                .find(|p| p.is_file())
        })
    }

    /// Every application desktop file, by id, first data dir wins.
    fn application_files(&self) -> Vec<ApplicationFile> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for data in &self.data_dirs {
            let Ok(read_dir) = fs::read_dir(data.join("applications")) else {
                continue;
            };
            let mut paths: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "desktop"))
                .collect();
            paths.sort();

            for path in paths {
                let Some(id) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                    continue;
                };
                if !seen.insert(id.clone()) {
                    continue;
                }
                if let Some(app) = read_application(&id, &path, &self.locale) {
                    out.push(app);
                }
            }
        }

        out
    }

    fn application_by_id(&self, id: &str) -> Option<DesktopEntry> {
        self.data_dirs
            .iter()
            .map(|data| data.join("applications").join(id))
            .find(|p| p.is_file())
            .and_then(|path| read_application(id, &path, &self.locale))
            .map(|app| app.entry)
    }

    fn mimeapps_lists(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.config_dirs
            .iter()
            .map(|d| d.join("mimeapps.list"))
            .chain(
                self.data_dirs
                    .iter()
                    .map(|d| d.join("applications").join("mimeapps.list")),
            )
    }
}

fn read_application(id: &str, path: &Path, locale: &Locale) -> Option<ApplicationFile> {
    match fs::read_to_string(path) {
        Ok(content) => ApplicationFile::parse(id, &content, locale),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable desktop file");
            None
        }
    }
}

fn dedup_paths(paths: &mut Vec<PathBuf>) {
    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
}

impl DesktopLookup for XdgLookup {
    fn find_icon(&self, name: &str, size: u32, context: Context, theme: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let path = Path::new(name);
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }

        std::iter::once(theme)
            .chain((theme != FALLBACK_THEME).then_some(FALLBACK_THEME))
            .find_map(|t| self.find_in_theme(name, size, context, t))
            .or_else(|| self.find_pixmap(name))
    }

    fn find_mime_icon(&self, mime: &str, size: u32, theme: &str) -> Option<PathBuf> {
        let specific = mime.replace('/', "-");
        let generic = mime
            .split_once('/')
            .map(|(major, _)| format!("{major}-x-generic"));

        std::iter::once(specific)
            .chain(generic)
            .find_map(|name| self.find_icon(&name, size, Context::MimeTypes, theme))
    }

    fn find_applications(&self, type_name: &str) -> Vec<DesktopEntry> {
        self.application_files()
            .into_iter()
            .filter(|app| app.handles(type_name))
            .map(|app| app.entry)
            .collect()
    }

    fn find_known_applications(&self, type_name: &str) -> Vec<DesktopEntry> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for list in self.mimeapps_lists() {
            let Ok(content) = fs::read_to_string(&list) else {
                continue;
            };
            let file = KeyFile::parse(&content);
            let Some(ids) = file.get(ADDED_ASSOCIATIONS, type_name) else {
                continue;
            };
            for id in split_list(ids) {
                if seen.insert(id.to_string())
                    && let Some(entry) = self.application_by_id(id)
                {
                    out.push(entry);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, XdgLookup) {
        let root = TempDir::new().unwrap();
        let data = root.path().join("share");
        let config = root.path().join("config");

        write(&data.join("icons/Adwaita/16x16/mimetypes/text-plain.png"), "");
        write(&data.join("icons/hicolor/16x16/apps/gedit.png"), "");
        write(&data.join("icons/hicolor/scalable/mimetypes/image-x-generic.svg"), "");
        write(&data.join("pixmaps/legacy.xpm"), "");
        write(
            &data.join("applications/gedit.desktop"),
            "[Desktop Entry]\nType=Application\nName=Gedit\nExec=gedit %U\nIcon=gedit\nMimeType=text/plain;\n",
        );
        write(
            &data.join("applications/vim.desktop"),
            "[Desktop Entry]\nType=Application\nName=Vim\nExec=vim %f\nMimeType=text/x-c;\n",
        );
        write(
            &config.join("mimeapps.list"),
            "[Added Associations]\ntext/plain=vim.desktop;missing.desktop;\n",
        );

        let lookup = XdgLookup::with_dirs(vec![data], vec![config], Locale::default());
        (root, lookup)
    }

    #[test]
    fn finds_icon_in_requested_theme() {
        let (_root, lookup) = fixture();
        let path = lookup
            .find_icon("text-plain", 16, Context::MimeTypes, "Adwaita")
            .unwrap();
        assert!(path.ends_with("icons/Adwaita/16x16/mimetypes/text-plain.png"));
    }

    #[test]
    fn falls_back_to_hicolor_then_pixmaps() {
        let (_root, lookup) = fixture();
        let app = lookup.find_icon("gedit", 16, Context::Applications, "Adwaita").unwrap();
        assert!(app.ends_with("icons/hicolor/16x16/apps/gedit.png"));
        let legacy = lookup.find_icon("legacy", 16, Context::Applications, "Adwaita").unwrap();
        assert!(legacy.ends_with("pixmaps/legacy.xpm"));
        assert!(lookup.find_icon("gedit", 32, Context::Actions, "Adwaita").is_none());
    }

    #[test]
    fn mime_icon_uses_generic_fallback() {
        let (_root, lookup) = fixture();
        let path = lookup.find_mime_icon("image/png", 16, "Adwaita").unwrap();
        assert!(path.ends_with("scalable/mimetypes/image-x-generic.svg"));
        assert!(lookup.find_mime_icon("audio/ogg", 16, "Adwaita").is_none());
    }

    #[test]
    fn applications_match_mime_type_list() {
        let (_root, lookup) = fixture();
        let apps = lookup.find_applications("text/plain");
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, "gedit.desktop");
        assert_eq!(apps[0].exec, "gedit %U");
    }

    #[test]
    fn known_applications_come_from_associations() {
        let (_root, lookup) = fixture();
        let known = lookup.find_known_applications("text/plain");
        assert_eq!(known.len(), 1);
        assert_eq!(known[0].name, "Vim");
        assert!(lookup.find_known_applications("image/png").is_empty());
    }
}
