// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by entries, plugins, and the desktop layer.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default edge length in pixels for small icons.
pub const SMALL_ICON_SIZE: u32 = 16;

/// MIME type name used for directories.
pub const DIRECTORY_TYPE_NAME: &str = "inode/directory";

/// MIME type name used when nothing better is known.
pub const UNKNOWN_TYPE_NAME: &str = "application/octet-stream";

/// Lookup domain for icon and application caches.
///
/// Keys that are otherwise identical but live in different contexts are
/// cached separately. The declaration order is the cache ordering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Actions,
    Devices,
    MimeTypes,
    Applications,
    Status,
    Places,
}

impl Context {
    /// Icon theme subdirectory holding icons of this context.
    pub fn theme_dir(&self) -> &'static str {
        match self {
            Context::Actions => "actions",
            Context::Devices => "devices",
            Context::MimeTypes => "mimetypes",
            Context::Applications => "apps",
            Context::Status => "status",
            Context::Places => "places",
        }
    }
}

/// A resolved icon file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    path: PathBuf,
}

impl Icon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the icon, without directories.
    pub fn title(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Shared handle to a resolved icon.
pub type IconHandle = Arc<Icon>;

/// The type of an entry: a MIME type name, a description, and an optional icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType {
    name: String,
    description: String,
    icon: Option<IconHandle>,
}

impl MimeType {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<IconHandle>) -> Self {
        self.icon = icon;
        self
    }

    /// Stable identifier used for content-plugin dispatch, e.g. `text/plain`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> Option<&IconHandle> {
        self.icon.as_ref()
    }

    pub fn is_directory(&self) -> bool {
        self.name == DIRECTORY_TYPE_NAME
    }
}

bitflags! {
    /// Effective access of the current user to an entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u8 {
        const READ = 0b001;
        const WRITE = 0b010;
        const EXEC = 0b100;
    }
}

/// Filesystem properties of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Properties {
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Status change time, if the platform reports it.
    pub ctime: Option<SystemTime>,
    /// Last modification time.
    pub mtime: Option<SystemTime>,
    /// Last access time.
    pub atime: Option<SystemTime>,
    pub permissions: Permissions,
}

/// How a file stream is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OpenMode {
    Read,
    Write,
    ReadWrite,
}
