//! taxsql Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns an NCBI taxonomy dump into a SQL script holding one subtree of the
//! taxonomy: the division table, the taxa under a chosen root and their
//! scientific names.
//!
//! # Pipeline
//!
//! 1. [`taxdump::load_divisions`] and [`taxdump::load_nodes`] parse the dumps
//! 2. [`subtree::select_subtree`] collects the root and its descendants
//! 3. [`taxdump::load_names`] keeps scientific names of the selected taxa
//! 4. [`sql::SqlRenderer`] writes DDL and inserts
//!
//! [`pipeline::ExportPipeline`] runs all four from an [`config::ExportConfig`].
//!
//! # Example
//!
//! ```no_run
//! use taxsql::config::ExportConfig;
//! use taxsql::pipeline::ExportPipeline;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ExportConfig::new()
//!         .in_dir("./taxdump")
//!         .with_output_path("plants.sql");
//!
//!     let stats = ExportPipeline::new(config).run()?;
//!     println!("{} taxa exported", stats.selected_taxa);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod pipeline;
pub mod sql;
pub mod subtree;
pub mod taxdump;

pub use config::ExportConfig;
pub use pipeline::ExportPipeline;
pub use taxsql_common::{Result, TaxsqlError};
