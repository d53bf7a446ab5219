// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applications able to open a MIME type, memoized per type.

use std::path::Path;
use std::process::{Child, Command};
use std::sync::Arc;

use lvfs_core::{Context, IconHandle, LvfsError, SMALL_ICON_SIZE, UNKNOWN_TYPE_NAME};
use tracing::debug;

use crate::cache::{Cache, CacheIndex, CacheStats};
use crate::icon_cache::IconCache;
use crate::lookup::{DesktopEntry, DesktopLookup};

/// Field codes that expand to nothing.
const DROPPED_FIELD_CODES: [char; 7] = ['d', 'D', 'n', 'N', 'k', 'v', 'm'];

/// The field code letters of `arg`, skipping `%%` escapes.
fn field_codes(arg: &str) -> impl Iterator<Item = char> + '_ {
    let mut chars = arg.chars();
    std::iter::from_fn(move || {
        while let Some(c) = chars.next() {
            if c == '%' {
                match chars.next() {
                    Some('%') | None => continue,
                    Some(code) => return Some(code),
                }
            }
        }
        None
    })
}

/// An application that can open files of some type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    name: String,
    description: String,
    exec: String,
    icon_name: Option<String>,
    icon: Option<IconHandle>,
}

impl Application {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        exec: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            exec: exec.into(),
            icon_name: None,
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon_name: Option<String>, icon: Option<IconHandle>) -> Self {
        self.icon_name = icon_name;
        self.icon = icon;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `Exec` template, with field codes unexpanded.
    pub fn exec(&self) -> &str {
        &self.exec
    }

    pub fn icon(&self) -> Option<&IconHandle> {
        self.icon.as_ref()
    }

    /// Expands the `Exec` template for opening `file`.
    ///
    /// `%f %F %u %U` become `file`, `%c` the application name, `%%` a single
    /// `%`, and an argument holding `%i` becomes `--icon <icon>` (or nothing
    /// without an icon). Deprecated codes and `KEY=VALUE` arguments are
    /// dropped. Substituted text is never expanded again.
    pub fn command_line(&self, file: &str) -> Vec<String> {
        let mut args = Vec::new();
        for arg in self.exec.split_whitespace() {
            if arg.contains('=') {
                continue;
            }
            let icon = self.icon_name.as_deref();
            if field_codes(arg).any(|code| code == 'i') {
                if let Some(icon) = icon {
                    args.push("--icon".to_string());
                    args.push(self.expand(arg, file, icon));
                }
                continue;
            }
            let arg = self.expand(arg, file, icon.unwrap_or_default());
            if !arg.is_empty() {
                args.push(arg);
            }
        }
        args
    }

    /// One left-to-right pass over `arg`.
    fn expand(&self, arg: &str, file: &str, icon: &str) -> String {
        let mut out = String::with_capacity(arg.len());
        let mut chars = arg.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('f' | 'F' | 'u' | 'U') => out.push_str(file),
                Some('c') => out.push_str(&self.name),
                Some('i') => out.push_str(icon),
                Some('%') => out.push('%'),
                Some(code) if DROPPED_FIELD_CODES.contains(&code) => {}
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }

    /// Starts the application on `file` with `working_dir` as current directory.
    pub fn launch(&self, file: &str, working_dir: &Path) -> Result<Child, LvfsError> {
        let args = self.command_line(file);
        let (program, rest) = args.split_first().ok_or_else(|| {
            LvfsError::Internal(format!("application `{}` has an empty command line", self.name))
        })?;
        debug!(application = %self.name, program = %program, "launching application");
        Ok(Command::new(program)
            .args(rest)
            .current_dir(working_dir)
            .spawn()?)
    }
}

/// Applications for one type, exact matches first.
pub type Applications = Arc<Vec<Application>>;

/// Resolves and caches the applications for each MIME type.
pub struct AppsCache {
    cache: Cache<Applications>,
    lookup: Arc<dyn DesktopLookup>,
    icons: Arc<IconCache>,
}

impl AppsCache {
    pub fn new(lookup: Arc<dyn DesktopLookup>, icons: Arc<IconCache>) -> Self {
        Self {
            cache: Cache::new(),
            lookup,
            icons,
        }
    }

    /// Applications declaring `type_name`, followed by the ones merely
    /// associated with it. Never fails; an empty list is cached too.
    pub fn find_applications(&self, type_name: &str) -> Applications {
        let index = CacheIndex::new(type_name, 0, Context::Applications);
        self.cache
            .populate(index, || {
                let apps: Vec<Application> = self
                    .lookup
                    .find_applications(type_name)
                    .into_iter()
                    .chain(self.lookup.find_known_applications(type_name))
                    .map(|entry| self.application(entry))
                    .collect();
                Some(Arc::new(apps))
            })
            .unwrap_or_default()
    }

    fn application(&self, entry: DesktopEntry) -> Application {
        let icon = entry
            .icon
            .as_deref()
            .and_then(|name| self.icons.find_icon(name, SMALL_ICON_SIZE, Context::Applications))
            .or_else(|| self.icons.find_mime_icon(UNKNOWN_TYPE_NAME, SMALL_ICON_SIZE));

        Application {
            description: entry.description().to_string(),
            name: entry.name,
            exec: entry.exec,
            icon_name: entry.icon,
            icon,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for AppsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppsCache").field("cache", &self.cache).finish()
    }
}
