// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module load errors.

use thiserror::Error;

/// Why a plugin module could not be added to the registry.
///
/// None of these are fatal to startup: the registry logs them and moves on
/// to the next module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("module `{id}` not found")]
    ModuleNotFound { id: String },

    #[error("module `{id}` has no package entry point")]
    MissingEntryPoint { id: String },

    /// The entry point ran but produced no package.
    #[error("module `{id}` returned no package")]
    InvalidPackage { id: String },

    #[error("module `{id}` requires lvfs {required}, running {running}")]
    Incompatible {
        id: String,
        required: String,
        running: String,
    },

    #[error("module `{id}` is already loaded")]
    AlreadyLoaded { id: String },

    #[error("invalid module manifest: {0}")]
    Manifest(String),
}

impl LoadError {
    /// Identifier of the module the error is about, if known.
    pub fn module_id(&self) -> Option<&str> {
        match self {
            LoadError::ModuleNotFound { id }
            | LoadError::MissingEntryPoint { id }
            | LoadError::InvalidPackage { id }
            | LoadError::Incompatible { id, .. }
            | LoadError::AlreadyLoaded { id } => Some(id),
            LoadError::Manifest(_) => None,
        }
    }
}
