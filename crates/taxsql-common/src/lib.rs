//! taxsql Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Error handling and logging shared by the taxsql workspace members.
//!
//! # Overview
//!
//! - **Error Handling**: [`TaxsqlError`] and the [`Result`] alias
//! - **Logging**: [`logging::LogConfig`] and [`logging::init_logging`]
//!
//! # Example
//!
//! ```no_run
//! use taxsql_common::{Result, TaxsqlError};
//!
//! fn require_root(root: i32, known: &[i32]) -> Result<()> {
//!     if !known.contains(&root) {
//!         return Err(TaxsqlError::RootNotFound(root));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, TaxsqlError};
