//! File-backed loaders for the dump files
//!
//! Each loader opens its file, parses it and closes it before returning,
//! whether the parse succeeded or not.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use taxsql_common::{Result, TaxsqlError};
use tracing::{debug, instrument};

use super::models::{DivisionMap, NameMap, NodeMap};
use super::parser::TaxdumpParser;
use crate::subtree::Subtree;

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| TaxsqlError::read(path, e))?;
    Ok(BufReader::new(file))
}

/// Load division.dmp into an id-ordered division map
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_divisions(path: impl AsRef<Path>) -> Result<DivisionMap> {
    let path = path.as_ref();
    let divisions = TaxdumpParser::for_path(path).parse_divisions(open(path)?)?;

    debug!(count = divisions.len(), "Loaded divisions");
    Ok(divisions)
}

/// Load nodes.dmp
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_nodes(path: impl AsRef<Path>) -> Result<NodeMap> {
    let path = path.as_ref();
    let nodes = TaxdumpParser::for_path(path).parse_nodes(open(path)?)?;

    debug!(count = nodes.len(), "Loaded nodes");
    Ok(nodes)
}

/// Load the scientific names of the taxa in `subtree` from names.dmp
#[instrument(skip_all, fields(path = %path.as_ref().display(), root = subtree.root()))]
pub fn load_names(path: impl AsRef<Path>, subtree: &Subtree) -> Result<NameMap> {
    let path = path.as_ref();
    let names = TaxdumpParser::for_path(path).parse_names(open(path)?, subtree)?;

    debug!(count = names.len(), "Loaded scientific names");
    Ok(names)
}
