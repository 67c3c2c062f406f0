//! SQL script rendering
//!
//! Writes the `division`, `taxon` and `taxon_name` tables as DDL followed by
//! one `INSERT` per row. The layout is fixed so that two runs over the same
//! dumps produce byte-identical scripts.

use std::borrow::Cow;
use std::io::Write;

use taxsql_common::Result;
use tracing::{debug, warn};

use crate::subtree::Subtree;
use crate::taxdump::{Division, DivisionMap, NameMap, NodeMap, TaxId, TaxonNode};

pub const DIVISION_DDL: &str = "\
CREATE TABLE division (
  division_id INTEGER PRIMARY KEY,
  division_code TEXT,
  division_name TEXT,
  comments TEXT
);
";

pub const TAXON_DDL: &str = "\
CREATE TABLE taxon (
  tax_id INTEGER PRIMARY KEY,
  parent_tax_id INTEGER,
  rank TEXT,
  division_id INTEGER
);
";

pub const TAXON_NAME_DDL: &str = "\
CREATE TABLE taxon_name (
  tax_id INTEGER,
  name TEXT,
  UNIQUE(tax_id, name)
);
";

/// Escape a value for a single-quoted SQL string literal
///
/// Single quotes are doubled; nothing else is touched.
pub fn escape_sql_string(value: &str) -> Cow<'_, str> {
    if value.contains('\'') {
        Cow::Owned(value.replace('\'', "''"))
    } else {
        Cow::Borrowed(value)
    }
}

/// `INSERT` statement for a division row
pub fn division_insert(division: &Division) -> String {
    format!(
        "INSERT INTO division VALUES ({}, '{}', '{}', '{}');",
        division.id,
        escape_sql_string(&division.code),
        escape_sql_string(&division.name),
        escape_sql_string(&division.comment)
    )
}

/// `INSERT` statement for a taxon row
pub fn taxon_insert(node: &TaxonNode) -> String {
    format!(
        "INSERT INTO taxon VALUES ({}, {}, '{}', {});",
        node.tax_id,
        node.parent_tax_id,
        escape_sql_string(&node.rank),
        node.division_id
    )
}

/// `INSERT` statement for a taxon name row
pub fn taxon_name_insert(tax_id: TaxId, name: &str) -> String {
    format!("INSERT INTO taxon_name VALUES ({}, '{}');", tax_id, escape_sql_string(name))
}

/// Everything one script is rendered from
#[derive(Debug, Clone, Copy)]
pub struct ExportData<'a> {
    pub divisions: &'a DivisionMap,
    pub nodes: &'a NodeMap,
    pub subtree: &'a Subtree,
    pub names: &'a NameMap,
}

/// Streams the SQL script to a writer
///
/// Statements are written as they are produced; a failed write leaves
/// whatever was already written in place.
pub struct SqlRenderer<W: Write> {
    out: W,
}

impl<W: Write> SqlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the whole script in table order
    pub fn render(&mut self, data: &ExportData<'_>) -> Result<()> {
        self.write_divisions(data.divisions)?;
        self.out.write_all(b"\n")?;

        self.write_schema(TAXON_DDL)?;
        self.write_schema(TAXON_NAME_DDL)?;

        let taxa = self.write_taxa(data.nodes, data.subtree)?;
        self.out.write_all(b"\n")?;

        let names = self.write_names(data.names)?;

        debug!(divisions = data.divisions.len(), taxa, names, "Rendered SQL script");
        Ok(())
    }

    /// Division DDL and one insert per division, in map order
    pub fn write_divisions(&mut self, divisions: &DivisionMap) -> Result<usize> {
        self.write_schema(DIVISION_DDL)?;

        for division in divisions.values() {
            writeln!(self.out, "{}", division_insert(division))?;
        }

        Ok(divisions.len())
    }

    /// One insert per subtree member, ascending by tax id
    ///
    /// Members without a node record are skipped.
    pub fn write_taxa(&mut self, nodes: &NodeMap, subtree: &Subtree) -> Result<usize> {
        let mut written = 0;

        for tax_id in subtree.sorted_ids() {
            match nodes.get(&tax_id) {
                Some(node) => {
                    writeln!(self.out, "{}", taxon_insert(node))?;
                    written += 1;
                },
                None => warn!(tax_id, "Selected taxon has no node record, skipping"),
            }
        }

        Ok(written)
    }

    /// One insert per scientific name, in map order
    pub fn write_names(&mut self, names: &NameMap) -> Result<usize> {
        for (tax_id, name) in names {
            writeln!(self.out, "{}", taxon_name_insert(*tax_id, name))?;
        }

        Ok(names.len())
    }

    /// Flush and hand back the writer
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_schema(&mut self, ddl: &str) -> Result<()> {
        self.out.write_all(ddl.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
