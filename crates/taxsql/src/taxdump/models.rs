//! Taxonomy dump data models

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Taxon, parent and division identifier as written in the dump files
pub type TaxId = i32;

/// Divisions keyed by id, in first-seen dump order
pub type DivisionMap = IndexMap<TaxId, Division>;

/// Nodes keyed by tax id, in first-seen dump order
pub type NodeMap = IndexMap<TaxId, TaxonNode>;

/// Scientific names keyed by tax id, in first-seen dump order
pub type NameMap = IndexMap<TaxId, String>;

/// The names.dmp class that marks the canonical name of a taxon
pub const SCIENTIFIC_NAME_CLASS: &str = "scientific name";

/// A record from division.dmp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Division {
    /// Division id (e.g., 4 for Plants and Fungi)
    pub id: TaxId,
    /// Three-letter code (e.g., "PLN")
    pub code: String,
    /// Display name (e.g., "Plants and Fungi")
    pub name: String,
    /// Free-text comment, often empty
    pub comment: String,
}

impl Division {
    /// Create a new Division
    pub fn new(
        id: TaxId,
        code: impl Into<String>,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            comment: comment.into(),
        }
    }
}

/// A record from nodes.dmp, reduced to the columns we export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaxonNode {
    pub tax_id: TaxId,
    /// Parent tax id; the dump root points at itself
    pub parent_tax_id: TaxId,
    /// Rank label (e.g., "species", "no rank")
    pub rank: String,
    /// Foreign key into division.dmp
    pub division_id: TaxId,
}

impl TaxonNode {
    /// Create a new TaxonNode
    pub fn new(
        tax_id: TaxId,
        parent_tax_id: TaxId,
        rank: impl Into<String>,
        division_id: TaxId,
    ) -> Self {
        Self {
            tax_id,
            parent_tax_id,
            rank: rank.into(),
            division_id,
        }
    }

    /// Whether the node is its own parent
    pub fn is_self_parented(&self) -> bool {
        self.tax_id == self.parent_tax_id
    }
}

/// One names.dmp record before class filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub tax_id: TaxId,
    /// Name text (e.g., "Viridiplantae")
    pub name: String,
    /// Name class (e.g., "scientific name", "synonym", "common name")
    pub name_class: String,
}

impl NameEntry {
    /// Whether this is the canonical scientific name of the taxon
    pub fn is_scientific(&self) -> bool {
        self.name_class == SCIENTIFIC_NAME_CLASS
    }
}

/// Counts from one export run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportStats {
    /// Divisions read from division.dmp
    pub divisions: usize,
    /// Nodes read from nodes.dmp
    pub nodes: usize,
    /// Taxa in the exported subtree
    pub selected_taxa: usize,
    /// Scientific names kept for the subtree
    pub names: usize,
    /// Where the SQL script was written
    pub output_path: PathBuf,
}

impl ExportStats {
    /// Selected taxa that have no scientific name
    pub fn unnamed_taxa(&self) -> usize {
        self.selected_taxa.saturating_sub(self.names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_parented_root() {
        assert!(TaxonNode::new(1, 1, "no rank", 8).is_self_parented());
        assert!(!TaxonNode::new(3193, 131221, "clade", 4).is_self_parented());
    }

    #[test]
    fn test_division_new() {
        let division = Division::new(4, "PLN", "Plants and Fungi", "");
        assert_eq!(division.code, "PLN");
        assert_eq!(division.name, "Plants and Fungi");
        assert!(division.comment.is_empty());
    }

    #[test]
    fn test_unnamed_taxa() {
        let stats = ExportStats {
            divisions: 3,
            nodes: 5,
            selected_taxa: 4,
            names: 3,
            output_path: PathBuf::from("taxonomy.sql"),
        };
        assert_eq!(stats.unnamed_taxa(), 1);
    }

    #[test]
    fn test_repeated_key_keeps_first_position() {
        let mut divisions = DivisionMap::new();
        divisions.insert(1, Division::new(1, "A", "first", ""));
        divisions.insert(2, Division::new(2, "B", "second", ""));
        divisions.insert(1, Division::new(1, "A", "replaced", ""));

        let names: Vec<_> = divisions.values().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["replaced", "second"]);
    }
}
