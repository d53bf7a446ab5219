// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lvfs apps` and `lvfs icon`.

use std::io::{self, IsTerminal};

use lvfs_core::{Context, LvfsError};
use lvfs_desktop::Desktop;

/// List the applications that open `type_name`.
pub fn run_apps(desktop: &Desktop, type_name: &str, plain: bool) {
    let apps = desktop.applications(type_name);
    if apps.is_empty() {
        println!("no applications for {type_name}");
        return;
    }
    let use_color = !plain && io::stdout().is_terminal();

    for app in apps.iter() {
        let name = if use_color {
            use colored::Colorize;
            app.name().bold().to_string()
        } else {
            app.name().to_string()
        };
        println!("  {name}");
        if !app.description().is_empty() {
            println!("    {}", app.description());
        }
        println!("    exec: {}", app.exec());
        if let Some(icon) = app.icon() {
            println!("    icon: {}", icon.path().display());
        }
    }
}

/// Print the path of the icon `name` in `context`.
pub fn run_icon(desktop: &Desktop, name: &str, context: Context, size: u32) -> Result<(), LvfsError> {
    let icon = if context == Context::MimeTypes {
        desktop.icons().find_mime_icon(name, size)
    } else {
        desktop.icon_sized(name, size, context)
    };
    match icon {
        Some(icon) => {
            println!("{}", icon.path().display());
            Ok(())
        }
        None => Err(LvfsError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no {context} icon named `{name}` at {size}x{size} in theme {}", desktop.theme()),
        ))),
    }
}
