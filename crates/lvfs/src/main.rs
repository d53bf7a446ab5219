// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LVFS - a pluggable virtual filesystem.
//!
//! This is the binary entry point for the `lvfs` command.

mod apps;
mod browse;
mod plugins;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lvfs::{builtin_catalog, desktop_from_config, Resolver};
use lvfs_config::LvfsConfig;
use lvfs_core::{Context, LvfsError};
use lvfs_plugin::ModuleCatalog;

/// LVFS - open files and directories through pluggable protocol and content handlers.
#[derive(Parser, Debug)]
#[command(name = "lvfs", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show title, type, location and properties of a URI.
    Open { uri: String },
    /// List a directory's children.
    Ls { uri: String },
    /// Write a file's contents to stdout.
    Cat { uri: String },
    /// List applications that open a MIME type.
    Apps { mime: String },
    /// Resolve an icon to a file path.
    Icon {
        name: String,
        /// Lookup domain (actions, devices, mimetypes, applications, status, places).
        #[arg(long, default_value = "applications")]
        context: Context,
        /// Icon size in pixels. Defaults to `desktop.icon_size`.
        #[arg(long)]
        size: Option<u32>,
    },
    /// Search the module catalog and show registered schemas and types.
    Plugins {
        #[arg(default_value = "")]
        query: String,
    },
    /// Print the effective configuration.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lvfs_config::load_and_validate_path(path),
        None => lvfs_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lvfs_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    if let Err(e) = run(cli, &config) {
        eprintln!("lvfs: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &LvfsConfig) -> Result<(), LvfsError> {
    let plain = cli.plain;
    let Some(command) = cli.command else {
        println!("lvfs: use --help for available commands");
        return Ok(());
    };

    match command {
        Commands::Config => plugins::run_config(config),
        Commands::Apps { mime } => {
            apps::run_apps(&desktop_from_config(&config.desktop), &mime, plain);
            Ok(())
        }
        Commands::Icon {
            name,
            context,
            size,
        } => {
            let size = size.unwrap_or(config.desktop.icon_size);
            apps::run_icon(&desktop_from_config(&config.desktop), &name, context, size)
        }
        Commands::Open { uri } => browse::run_open(&open_resolver(config)?.1, &uri, plain),
        Commands::Ls { uri } => browse::run_ls(&open_resolver(config)?.1, &uri, plain),
        Commands::Cat { uri } => browse::run_cat(&open_resolver(config)?.1, &uri),
        Commands::Plugins { query } => {
            let (catalog, resolver) = open_resolver(config)?;
            plugins::run_plugins(&catalog, &resolver, &query, plain);
            Ok(())
        }
    }
}

/// Build the resolver over the built-in modules.
fn open_resolver(config: &LvfsConfig) -> Result<(ModuleCatalog, Resolver), LvfsError> {
    let catalog = builtin_catalog().map_err(|e| LvfsError::Internal(e.to_string()))?;
    let resolver = Resolver::new(config, &catalog)?;
    Ok((catalog, resolver))
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `log.level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lvfs={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn icon_context_parses() {
        let cli = Cli::parse_from(["lvfs", "icon", "folder", "--context", "places", "--size", "32"]);
        match cli.command {
            Some(Commands::Icon { name, context, size }) => {
                assert_eq!(name, "folder");
                assert_eq!(context, Context::Places);
                assert_eq!(size, Some(32));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = lvfs_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.plugins.modules, ["lvfs-default"]);
    }
}
