// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lvfs open`, `lvfs ls` and `lvfs cat`.

use std::io::{self, IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use lvfs::Resolver;
use lvfs_core::{Entry, LvfsError, OpenMode, Permissions};

fn permissions_string(permissions: Permissions) -> String {
    [
        (Permissions::READ, 'r'),
        (Permissions::WRITE, 'w'),
        (Permissions::EXEC, 'x'),
    ]
    .iter()
    .map(|(bit, c)| if permissions.contains(*bit) { *c } else { '-' })
    .collect()
}

fn format_time(time: Option<SystemTime>) -> String {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn kind(entry: &dyn Entry) -> &'static str {
    if entry.as_directory().is_some() {
        "directory"
    } else if entry.as_file().is_some() {
        "file"
    } else {
        "entry"
    }
}

/// Print what the resolver knows about `uri`.
pub fn run_open(resolver: &Resolver, uri: &str, plain: bool) -> Result<(), LvfsError> {
    let entry = resolver.open(uri)?;
    let use_color = !plain && io::stdout().is_terminal();

    let title = if use_color {
        use colored::Colorize;
        entry.title().bold().to_string()
    } else {
        entry.title().to_string()
    };

    println!("  {title}");
    println!("    {:<12} {}", "kind", kind(entry.as_ref()));
    println!("    {:<12} {}://{}", "location", entry.schema(), entry.location());
    println!(
        "    {:<12} {} ({})",
        "type",
        entry.entry_type().name(),
        entry.entry_type().description()
    );
    if let Some(props) = entry.properties() {
        println!("    {:<12} {}", "size", props.size);
        println!("    {:<12} {}", "permissions", permissions_string(props.permissions));
        println!("    {:<12} {}", "mtime", format_time(props.mtime));
        println!("    {:<12} {}", "atime", format_time(props.atime));
        println!("    {:<12} {}", "ctime", format_time(props.ctime));
    }
    Ok(())
}

/// List the children of a directory in the order the directory yields them.
pub fn run_ls(resolver: &Resolver, uri: &str, plain: bool) -> Result<(), LvfsError> {
    let entry = resolver.open(uri)?;
    let Some(dir) = entry.as_directory() else {
        return Err(LvfsError::Unsupported {
            operation: "ls",
            title: entry.title().to_string(),
        });
    };
    let use_color = !plain && io::stdout().is_terminal();

    for child in dir.iter()? {
        let child = child?;
        let is_dir = child.as_directory().is_some();
        let name = if is_dir {
            format!("{}/", child.title())
        } else {
            child.title().to_string()
        };
        let name = if use_color && is_dir {
            use colored::Colorize;
            name.blue().bold().to_string()
        } else {
            name
        };
        println!("{:<40} {}", name, child.entry_type().name());
    }
    Ok(())
}

/// Copy a file's contents to stdout.
pub fn run_cat(resolver: &Resolver, uri: &str) -> Result<(), LvfsError> {
    let entry = resolver.open(uri)?;
    let Some(file) = entry.as_file() else {
        return Err(LvfsError::Unsupported {
            operation: "cat",
            title: entry.title().to_string(),
        });
    };
    let mut stream = file.open(OpenMode::Read)?;
    let mut stdout = io::stdout().lock();
    io::copy(&mut stream, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_render_as_rwx() {
        assert_eq!(permissions_string(Permissions::all()), "rwx");
        assert_eq!(permissions_string(Permissions::READ | Permissions::EXEC), "r-x");
        assert_eq!(permissions_string(Permissions::empty()), "---");
    }

    #[test]
    fn missing_time_renders_dash() {
        assert_eq!(format_time(None), "-");
        assert_eq!(format_time(Some(UNIX_EPOCH)), "0");
    }
}
