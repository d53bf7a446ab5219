// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Effective permissions of the current user.

use std::fs::Metadata;
use std::path::Path;

use lvfs_core::Permissions;

/// Access the current process user has to a file with this metadata.
///
/// A bit is granted by the `other` class, by the `user` class when the user
/// owns the file, or by the `group` class when the group matches.
#[cfg(unix)]
pub fn effective(meta: &Metadata) -> Permissions {
    use std::os::unix::fs::MetadataExt;

    // SAFETY: getuid and getgid cannot fail and touch no memory.
    let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
    from_mode(meta.mode(), meta.uid() == uid, meta.gid() == gid)
}

#[cfg(not(unix))]
pub fn effective(meta: &Metadata) -> Permissions {
    if meta.permissions().readonly() {
        Permissions::READ
    } else {
        Permissions::READ | Permissions::WRITE
    }
}

/// Permissions granted by `mode` to a user who does or does not own the
/// file and share its group.
pub fn from_mode(mode: u32, owner: bool, group: bool) -> Permissions {
    let mut class = mode & 0o7;
    if owner {
        class |= (mode >> 6) & 0o7;
    }
    if group {
        class |= (mode >> 3) & 0o7;
    }

    let mut out = Permissions::empty();
    if class & 0o4 != 0 {
        out |= Permissions::READ;
    }
    if class & 0o2 != 0 {
        out |= Permissions::WRITE;
    }
    if class & 0o1 != 0 {
        out |= Permissions::EXEC;
    }
    out
}

/// Replaces the owner class of the file mode with `permissions`.
#[cfg(unix)]
pub fn apply(path: &Path, permissions: Permissions) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    let mut owner = 0;
    if permissions.contains(Permissions::READ) {
        owner |= 0o4;
    }
    if permissions.contains(Permissions::WRITE) {
        owner |= 0o2;
    }
    if permissions.contains(Permissions::EXEC) {
        owner |= 0o1;
    }
    perms.set_mode((perms.mode() & !0o700) | (owner << 6));
    std::fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
pub fn apply(path: &Path, permissions: Permissions) -> std::io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_readonly(!permissions.contains(Permissions::WRITE));
    std::fs::set_permissions(path, perms)
}
