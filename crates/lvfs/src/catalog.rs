// SPDX-FileCopyrightText: 2026 LVFS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modules compiled into the `lvfs` binary.

use lvfs_plugin::{LoadError, ModuleCatalog};

/// A catalog holding every built-in module.
pub fn builtin_catalog() -> Result<ModuleCatalog, LoadError> {
    let mut catalog = ModuleCatalog::new();
    lvfs_default::register(&mut catalog)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_module_is_built_in() {
        let catalog = builtin_catalog().unwrap();
        let entry = catalog.get(lvfs_default::MODULE_NAME).unwrap();
        assert!(entry.manifest.declares_protocol("file"));
        assert_eq!(catalog.search("filesystem").len(), 1);
    }
}
