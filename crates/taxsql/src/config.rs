//! Export configuration
//!
//! Where the dumps are read from, where the script goes, and which taxon the
//! exported subtree hangs from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taxsql_common::{Result, TaxsqlError};

use crate::taxdump::TaxId;

// ============================================================================
// Defaults
// ============================================================================

/// Embryophyta (land plants), the "Plantae" subtree
pub const DEFAULT_ROOT_TAX_ID: TaxId = 3193;

pub const DEFAULT_DIVISION_FILE: &str = "division.dmp";
pub const DEFAULT_NODES_FILE: &str = "nodes.dmp";
pub const DEFAULT_NAMES_FILE: &str = "names.dmp";
pub const DEFAULT_OUTPUT_FILE: &str = "taxonomy.sql";

/// Configuration for one export run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Path to division.dmp
    pub division_path: PathBuf,
    /// Path to nodes.dmp
    pub nodes_path: PathBuf,
    /// Path to names.dmp
    pub names_path: PathBuf,
    /// Path of the SQL script to write (overwritten if present)
    pub output_path: PathBuf,
    /// Taxon whose subtree is exported
    pub root_tax_id: TaxId,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            division_path: PathBuf::from(DEFAULT_DIVISION_FILE),
            nodes_path: PathBuf::from(DEFAULT_NODES_FILE),
            names_path: PathBuf::from(DEFAULT_NAMES_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            root_tax_id: DEFAULT_ROOT_TAX_ID,
        }
    }
}

impl ExportConfig {
    /// Create a configuration with the default file names and root
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the three dump files from `dir` under their default names
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.division_path = dir.join(DEFAULT_DIVISION_FILE);
        self.nodes_path = dir.join(DEFAULT_NODES_FILE);
        self.names_path = dir.join(DEFAULT_NAMES_FILE);
        self
    }

    pub fn with_division_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.division_path = path.into();
        self
    }

    pub fn with_nodes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.nodes_path = path.into();
        self
    }

    pub fn with_names_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.names_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_root_tax_id(mut self, root: TaxId) -> Self {
        self.root_tax_id = root;
        self
    }

    /// Reject empty paths before any file is touched
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("division", &self.division_path),
            ("nodes", &self.nodes_path),
            ("names", &self.names_path),
            ("output", &self.output_path),
        ];

        for (label, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(TaxsqlError::config(format!("{label} path is empty")));
            }
        }

        Ok(())
    }
}
