// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lvfs plugins` and `lvfs config`.

use std::io::{self, IsTerminal};

use lvfs::Resolver;
use lvfs_config::LvfsConfig;
use lvfs_core::LvfsError;
use lvfs_plugin::ModuleCatalog;

/// Show catalog modules matching `query` and what the resolver registered.
pub fn run_plugins(catalog: &ModuleCatalog, resolver: &Resolver, query: &str, plain: bool) {
    let use_color = !plain && io::stdout().is_terminal();
    let loaded: Vec<&str> = resolver.registry().modules().collect();

    println!();
    println!("  modules");
    println!("  {}", "-".repeat(50));
    for entry in catalog.search(query) {
        let m = &entry.manifest;
        let is_loaded = loaded.contains(&m.name.as_str());
        let marker = match (is_loaded, use_color) {
            (true, true) => {
                use colored::Colorize;
                "✓".green().to_string()
            }
            (true, false) => "[loaded]".to_string(),
            (false, _) => "        ".to_string(),
        };
        println!("    {marker} {:<20} {:<8} {}", m.name, m.version, m.description);
        if !m.protocols.is_empty() {
            println!("      protocols: {}", m.protocols.join(", "));
        }
        if !m.content_types.is_empty() {
            println!("      content:   {}", m.content_types.join(", "));
        }
    }

    for (id, error) in &resolver.load_report().failed {
        let line = format!("    {id}: {error}");
        if use_color {
            use colored::Colorize;
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    println!();
    println!("  schemas:       {}", join_or_none(resolver.registry().schemas()));
    println!("  content types: {}", join_or_none(resolver.registry().content_types()));
    println!();
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Print the effective configuration as TOML.
pub fn run_config(config: &LvfsConfig) -> Result<(), LvfsError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| LvfsError::Config(format!("failed to render configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}
