// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local files and directories as LVFS entries.

use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::SystemTime;

use lvfs_core::{
    mime, CopyProgress, DirIter, Directory, Entry, ErrorCode, File, Handle, LvfsError, MimeType,
    OpenMode, Permissions, Properties, Stream,
};
use tracing::debug;

use crate::permissions;

/// Schema served by this module.
pub const SCHEMA: &str = "file";

const COPY_CHUNK: usize = 64 * 1024;

/// What every local entry knows about itself.
#[derive(Debug, Clone)]
struct Common {
    path: PathBuf,
    location: String,
    title: String,
    mime: MimeType,
    properties: Properties,
}

impl Common {
    fn new(path: PathBuf, meta: &Metadata, mime: MimeType) -> Self {
        let location = path.to_string_lossy().into_owned();
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.clone());
        Self {
            properties: properties(meta),
            path,
            location,
            title,
            mime,
        }
    }
}

fn properties(meta: &Metadata) -> Properties {
    Properties {
        size: if meta.is_dir() { 0 } else { meta.len() },
        ctime: ctime(meta),
        mtime: meta.modified().ok(),
        atime: meta.accessed().ok(),
        permissions: permissions::effective(meta),
    }
}

#[cfg(unix)]
fn ctime(meta: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let secs = u64::try_from(meta.ctime()).ok()?;
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    SystemTime::UNIX_EPOCH.checked_add(Duration::new(secs, nanos))
}

#[cfg(not(unix))]
fn ctime(meta: &Metadata) -> Option<SystemTime> {
    meta.created().ok()
}

/// A regular local file.
#[derive(Debug, Clone)]
pub struct FsFile {
    common: Common,
}

impl FsFile {
    pub(crate) fn new(path: PathBuf, meta: &Metadata) -> Self {
        let mime = mime::guess(&path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default());
        Self {
            common: Common::new(path, meta, mime),
        }
    }

    pub fn path(&self) -> &Path {
        &self.common.path
    }
}

impl Entry for FsFile {
    fn title(&self) -> &str {
        &self.common.title
    }

    fn schema(&self) -> &str {
        SCHEMA
    }

    fn location(&self) -> &str {
        &self.common.location
    }

    fn entry_type(&self) -> &MimeType {
        &self.common.mime
    }

    fn properties(&self) -> Option<Properties> {
        Some(self.common.properties.clone())
    }

    fn as_file(&self) -> Option<&dyn File> {
        Some(self)
    }
}

impl File for FsFile {
    fn open(&self, mode: OpenMode) -> Result<Box<dyn Stream>, LvfsError> {
        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::Write => options.write(true),
            OpenMode::ReadWrite => options.read(true).write(true),
        };
        Ok(Box::new(options.open(&self.common.path)?))
    }

    fn size(&self) -> u64 {
        self.common.properties.size
    }

    fn set_permissions(&self, permissions: Permissions) -> Result<(), LvfsError> {
        Ok(permissions::apply(&self.common.path, permissions)?)
    }
}

/// A local directory.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    common: Common,
}

impl FsDirectory {
    pub(crate) fn new(path: PathBuf, meta: &Metadata) -> Self {
        Self {
            common: Common::new(path, meta, mime::directory()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.common.path
    }

    /// Resolves a child handle back to a path inside this directory.
    fn child_path(&self, entry: &Handle) -> Result<PathBuf, LvfsError> {
        let path = PathBuf::from(entry.location());
        if entry.schema() != SCHEMA || path.parent() != Some(self.common.path.as_path()) {
            return Err(LvfsError::Internal(format!(
                "`{}` is not an entry of `{}`",
                entry.location(),
                self.common.location
            )));
        }
        Ok(path)
    }

    /// Streams `source` into a new file at `target`. The target is removed
    /// again when the copy fails or is aborted.
    fn stream_copy(
        &self,
        progress: &CopyProgress<'_>,
        source: &dyn File,
        target: &Path,
    ) -> Result<(), LvfsError> {
        let mut reader = source.open(OpenMode::Read)?;
        let writer = OpenOptions::new().write(true).create_new(true).open(target)?;

        let result = pump(progress, reader.as_mut(), writer);
        if result.is_err() {
            let _ = fs::remove_file(target);
        }
        result
    }
}

fn pump<R: Read + ?Sized>(
    progress: &CopyProgress<'_>,
    reader: &mut R,
    mut writer: fs::File,
) -> Result<(), LvfsError> {
    let mut buffer = vec![0u8; COPY_CHUNK];
    let mut done = 0u64;

    loop {
        if progress.aborted.load(Ordering::Relaxed) {
            return Err(LvfsError::Aborted);
        }
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        writer.write_all(&buffer[..read])?;
        done += read as u64;
        (progress.on_progress)(done);
    }

    writer.flush()?;
    Ok(())
}

impl Entry for FsDirectory {
    fn title(&self) -> &str {
        &self.common.title
    }

    fn schema(&self) -> &str {
        SCHEMA
    }

    fn location(&self) -> &str {
        &self.common.location
    }

    fn entry_type(&self) -> &MimeType {
        &self.common.mime
    }

    fn properties(&self) -> Option<Properties> {
        Some(self.common.properties.clone())
    }

    fn as_directory(&self) -> Option<&dyn Directory> {
        Some(self)
    }
}

impl Directory for FsDirectory {
    fn iter(&self) -> Result<DirIter<'_>, LvfsError> {
        let read_dir = fs::read_dir(&self.common.path)?;
        Ok(Box::new(read_dir.map(|dirent| {
            let path = dirent?.path();
            open_child(path)
        })))
    }

    fn exists(&self, name: &str) -> bool {
        fs::symlink_metadata(self.common.path.join(name)).is_ok()
    }

    fn entry(&self, name: &str) -> Result<Handle, LvfsError> {
        open_child(self.common.path.join(name))
    }

    fn rename(&self, entry: &Handle, name: &str) -> Result<Handle, LvfsError> {
        let from = self.child_path(entry)?;
        let to = self.common.path.join(name);
        fs::rename(&from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "renamed");
        open_child(to)
    }

    fn remove(&self, entry: &Handle) -> Result<(), LvfsError> {
        let path = self.child_path(entry)?;
        let meta = fs::symlink_metadata(&path)?;
        if meta.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn copy(
        &self,
        progress: &CopyProgress<'_>,
        source: &Handle,
        move_source: bool,
    ) -> Result<Handle, LvfsError> {
        let target = self.common.path.join(source.title());
        // Covers copying an entry onto itself as well as clobbering a sibling.
        if fs::symlink_metadata(&target).is_ok() {
            return Err(LvfsError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("`{}` already exists", target.display()),
            )));
        }
        let local_source = (source.schema() == SCHEMA).then(|| PathBuf::from(source.location()));

        if move_source
            && let Some(from) = &local_source
            && fs::rename(from, &target).is_ok()
        {
            return open_child(target);
        }

        let Some(file) = source.as_file() else {
            return Err(LvfsError::Unsupported {
                operation: "copy",
                title: source.title().to_string(),
            });
        };

        self.stream_copy(progress, file, &target)?;

        if move_source {
            match &local_source {
                Some(from) => fs::remove_file(from)?,
                None => {
                    return Err(LvfsError::Unsupported {
                        operation: "move",
                        title: source.title().to_string(),
                    });
                }
            }
        }

        open_child(target)
    }
}

/// Opens `path` the way the protocol plugin does: regular files and
/// directories, following symlinks. A dangling symlink opens as a file with
/// the link's own metadata; other file types fail with `ENOENT`.
pub fn open_path(path: &Path) -> Result<Handle, ErrorCode> {
    let meta = fs::symlink_metadata(path).map_err(|e| ErrorCode::from_io(&e))?;

    let meta = if meta.file_type().is_symlink() {
        match fs::metadata(path) {
            Ok(target) => target,
            Err(_) => return Ok(Arc::new(FsFile::new(path.to_path_buf(), &meta))),
        }
    } else {
        meta
    };

    if meta.is_file() {
        Ok(Arc::new(FsFile::new(path.to_path_buf(), &meta)))
    } else if meta.is_dir() {
        Ok(Arc::new(FsDirectory::new(path.to_path_buf(), &meta)))
    } else {
        Err(ErrorCode::NOT_FOUND)
    }
}

/// Opens a directory child. Unlike [`open_path`], special files are listed
/// as plain files so enumeration never skips a name.
fn open_child(path: PathBuf) -> Result<Handle, LvfsError> {
    match open_path(&path) {
        Ok(handle) => Ok(handle),
        Err(code) if code == ErrorCode::NOT_FOUND => {
            let meta = fs::symlink_metadata(&path)?;
            Ok(Arc::new(FsFile::new(path, &meta)))
        }
        Err(code) => Err(LvfsError::Io(io::Error::from_raw_os_error(code.code()))),
    }
}
