// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal reader for `.desktop` and `mimeapps.list` key files.

use std::collections::BTreeMap;

use crate::locale::Locale;
use crate::lookup::DesktopEntry;

/// Groups of `key=value` pairs, keyed by group name.
#[derive(Debug, Default)]
pub struct KeyFile {
    groups: BTreeMap<String, BTreeMap<String, String>>,
}

impl KeyFile {
    /// Parses key file text. Comments, blank lines and keys outside a group
    /// are skipped.
    pub fn parse(content: &str) -> Self {
        let mut groups: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                groups.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }
            if let (Some(group), Some((key, value))) = (&current, line.split_once('=')) {
                groups
                    .entry(group.clone())
                    .or_default()
                    .entry(key.trim().to_string())
                    .or_insert_with(|| value.trim().to_string());
            }
        }

        Self { groups }
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }

    /// Looks up `key[suffix]` for each locale suffix, then the plain key.
    pub fn get_localized(&self, group: &str, key: &str, locale: &Locale) -> Option<&str> {
        locale
            .key_suffixes()
            .iter()
            .find_map(|suffix| self.get(group, &format!("{key}[{suffix}]")))
            .or_else(|| self.get(group, key))
    }
}

/// Splits a `;`-separated list value, dropping empty items.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(';').map(str::trim).filter(|s| !s.is_empty())
}

const ENTRY_GROUP: &str = "Desktop Entry";

/// A parsed application desktop file.
#[derive(Debug)]
pub struct ApplicationFile {
    pub entry: DesktopEntry,
    pub mime_types: Vec<String>,
}

impl ApplicationFile {
    /// Reads an application entry. Returns `None` for hidden entries, for
    /// non-application types, and for entries without `Name` or `Exec`.
    pub fn parse(id: &str, content: &str, locale: &Locale) -> Option<Self> {
        let file = KeyFile::parse(content);

        if file.get(ENTRY_GROUP, "Type").is_some_and(|t| t != "Application")
            || file.get(ENTRY_GROUP, "Hidden") == Some("true")
        {
            return None;
        }

        let name = file.get_localized(ENTRY_GROUP, "Name", locale)?.to_string();
        let exec = file.get(ENTRY_GROUP, "Exec")?.to_string();

        Some(Self {
            entry: DesktopEntry {
                id: id.to_string(),
                name,
                generic_name: file
                    .get_localized(ENTRY_GROUP, "GenericName", locale)
                    .map(str::to_string),
                comment: file
                    .get_localized(ENTRY_GROUP, "Comment", locale)
                    .map(str::to_string),
                exec,
                icon: file.get(ENTRY_GROUP, "Icon").map(str::to_string),
            },
            mime_types: file
                .get(ENTRY_GROUP, "MimeType")
                .map(|v| split_list(v).map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }

    pub fn handles(&self, type_name: &str) -> bool {
        self.mime_types.iter().any(|t| t == type_name)
    }
}
