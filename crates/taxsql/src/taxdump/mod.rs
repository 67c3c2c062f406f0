//! NCBI taxonomy dump handling
//!
//! Models, the line parser and the file loaders for `division.dmp`,
//! `nodes.dmp` and `names.dmp`.

pub mod loader;
pub mod models;
pub mod parser;

pub use loader::{load_divisions, load_names, load_nodes};
pub use models::{
    Division, DivisionMap, ExportStats, NameEntry, NameMap, NodeMap, TaxId, TaxonNode,
    SCIENTIFIC_NAME_CLASS,
};
pub use parser::{TaxdumpParser, FIELD_SEPARATOR};
