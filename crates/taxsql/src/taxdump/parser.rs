//! NCBI taxdump parser
//!
//! Parses the three dump files the export needs:
//! - division.dmp: division id, code, name, comment
//! - nodes.dmp: tax id, parent id, rank, embl code, division id, ...
//! - names.dmp: tax id, name text, unique name, name class
//!
//! # File Format
//! Fields are separated by `\t|\t` and records end with `\t|` and a newline.
//! Blank lines are skipped; any other malformed record aborts the parse.

use std::io::BufRead;
use std::path::Path;

use taxsql_common::{Result, TaxsqlError};
use tracing::{debug, trace};

use super::models::{Division, DivisionMap, NameEntry, NameMap, NodeMap, TaxId, TaxonNode};
use crate::subtree::Subtree;

/// Separator between fields of a dump record
pub const FIELD_SEPARATOR: &str = "\t|\t";

const DIVISION_FIELDS: usize = 4;
const NODE_FIELDS: usize = 5;
const NAME_FIELDS: usize = 4;

/// Parser for NCBI taxdump files
///
/// The parser carries the name of the file it reads so that errors can point
/// at `nodes.dmp line 1042` rather than at a bare line number.
#[derive(Debug, Clone)]
pub struct TaxdumpParser {
    source_name: String,
}

impl TaxdumpParser {
    /// Create a parser whose errors mention `source_name`
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }

    /// Create a parser labelled with a file path
    pub fn for_path(path: &Path) -> Self {
        Self::new(path.display().to_string())
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Parse division.dmp
    ///
    /// # Format
    /// ```text
    /// division_id | code | name | comments |
    /// 4 | PLN | Plants and Fungi | |
    /// ```
    ///
    /// A repeated id replaces the earlier record.
    pub fn parse_divisions<R: BufRead>(&self, reader: R) -> Result<DivisionMap> {
        let mut divisions = DivisionMap::new();

        self.for_each_record(reader, |line, line_num| {
            let division = self.parse_division_line(line, line_num)?;
            divisions.insert(division.id, division);
            Ok(())
        })?;

        Ok(divisions)
    }

    /// Parse a single line from division.dmp
    pub fn parse_division_line(&self, line: &str, line_num: usize) -> Result<Division> {
        let fields = self.split_fields(line, line_num, DIVISION_FIELDS)?;

        Ok(Division::new(
            self.parse_id(fields[0], "division_id", line_num)?,
            fields[1],
            fields[2],
            fields[3],
        ))
    }

    /// Parse nodes.dmp
    ///
    /// # Format
    /// ```text
    /// tax_id | parent_tax_id | rank | embl_code | division_id | ...
    /// 3193 | 131221 | clade | | 4 | 1 | 1 | 1 | 1 | 1 | 1 | 0 | | |
    /// ```
    ///
    /// Only the first five fields are read; the embl code is skipped.
    pub fn parse_nodes<R: BufRead>(&self, reader: R) -> Result<NodeMap> {
        let mut nodes = NodeMap::new();

        self.for_each_record(reader, |line, line_num| {
            let node = self.parse_node_line(line, line_num)?;
            nodes.insert(node.tax_id, node);
            Ok(())
        })?;

        Ok(nodes)
    }

    /// Parse a single line from nodes.dmp
    pub fn parse_node_line(&self, line: &str, line_num: usize) -> Result<TaxonNode> {
        let fields = self.split_fields(line, line_num, NODE_FIELDS)?;

        Ok(TaxonNode::new(
            self.parse_id(fields[0], "tax_id", line_num)?,
            self.parse_id(fields[1], "parent_tax_id", line_num)?,
            fields[2],
            self.parse_id(fields[4], "division_id", line_num)?,
        ))
    }

    /// Parse names.dmp, keeping scientific names of taxa in `subtree`
    ///
    /// # Format
    /// ```text
    /// tax_id | name_txt | unique_name | name_class |
    /// 3193 | Embryophyta | | scientific name |
    /// 3193 | land plants | | common name |
    /// ```
    ///
    /// When a taxon has several scientific names the last one wins.
    pub fn parse_names<R: BufRead>(&self, reader: R, subtree: &Subtree) -> Result<NameMap> {
        let mut names = NameMap::new();

        self.for_each_record(reader, |line, line_num| {
            let entry = self.parse_name_line(line, line_num)?;
            if entry.is_scientific() && subtree.contains(entry.tax_id) {
                names.insert(entry.tax_id, entry.name);
            }
            Ok(())
        })?;

        Ok(names)
    }

    /// Parse a single line from names.dmp
    pub fn parse_name_line(&self, line: &str, line_num: usize) -> Result<NameEntry> {
        let fields = self.split_fields(line, line_num, NAME_FIELDS)?;

        Ok(NameEntry {
            tax_id: self.parse_id(fields[0], "tax_id", line_num)?,
            name: fields[1].to_string(),
            name_class: fields[3].to_string(),
        })
    }

    /// Feed every non-blank line to `handle` with its 1-based line number
    fn for_each_record<R, F>(&self, reader: R, mut handle: F) -> Result<()>
    where
        R: BufRead,
        F: FnMut(&str, usize) -> Result<()>,
    {
        let mut records = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| TaxsqlError::read(&self.source_name, e))?;

            if line.trim().is_empty() {
                continue;
            }

            handle(&line, index + 1)?;
            records += 1;
        }

        debug!(source = %self.source_name, records, "Parsed dump file");
        Ok(())
    }

    /// Split a record into trimmed fields, requiring at least `expected`
    fn split_fields<'a>(
        &self,
        line: &'a str,
        line_num: usize,
        expected: usize,
    ) -> Result<Vec<&'a str>> {
        // The record terminator leaves "\t|" glued to the last field
        let fields: Vec<&str> = line
            .split(FIELD_SEPARATOR)
            .map(|f| f.trim().trim_end_matches('|').trim())
            .collect();

        if fields.len() < expected {
            trace!(source = %self.source_name, line_num, line, "Short record");
            return Err(TaxsqlError::missing_fields(
                self.source_name.as_str(),
                line_num,
                expected,
                fields.len(),
            ));
        }

        Ok(fields)
    }

    fn parse_id(&self, value: &str, field: &'static str, line_num: usize) -> Result<TaxId> {
        value.parse().map_err(|_| {
            TaxsqlError::invalid_integer(self.source_name.as_str(), line_num, field, value)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::subtree::select_subtree;

    fn subtree_of(ids: &[TaxId]) -> Subtree {
        // A star under the first id
        let mut nodes = NodeMap::new();
        for &id in ids {
            nodes.insert(id, TaxonNode::new(id, ids[0], "species", 4));
        }
        select_subtree(&nodes, ids[0])
    }

    #[test]
    fn test_parse_division_line() {
        let parser = TaxdumpParser::new("division.dmp");
        let line = "4\t|\tPLN\t|\tPlants and Fungi\t|\t\t|";

        let division = parser.parse_division_line(line, 1).unwrap();
        assert_eq!(division, Division::new(4, "PLN", "Plants and Fungi", ""));
    }

    #[test]
    fn test_parse_division_line_keeps_comment() {
        let parser = TaxdumpParser::new("division.dmp");
        let line = "11\t|\tSYN\t|\tSynthetic and Chimeric\t|\t  O'Brien's set  \t|";

        let division = parser.parse_division_line(line, 1).unwrap();
        assert_eq!(division.comment, "O'Brien's set");
    }

    #[test]
    fn test_parse_division_line_too_few_fields() {
        let parser = TaxdumpParser::new("division.dmp");

        let err = parser.parse_division_line("4\t|\tPLN\t|", 7).unwrap_err();
        assert!(matches!(
            err,
            TaxsqlError::MissingFields {
                line: 7,
                expected: 4,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_division_line_invalid_id() {
        let parser = TaxdumpParser::new("division.dmp");

        let err = parser
            .parse_division_line("x\t|\tPLN\t|\tP\t|\t\t|", 1)
            .unwrap_err();
        assert!(matches!(
            err,
            TaxsqlError::InvalidInteger {
                line: 1,
                field: "division_id",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_division_line_ignores_extra_fields() {
        let parser = TaxdumpParser::new("division.dmp");
        let line = "4\t|\tPLN\t|\tPlants and Fungi\t|\tnote\t|\textra\t|";

        let division = parser.parse_division_line(line, 1).unwrap();
        assert_eq!(division, Division::new(4, "PLN", "Plants and Fungi", "note"));
    }

    #[test]
    fn test_errors_name_the_source_path() {
        let parser = TaxdumpParser::for_path(Path::new("dumps/nodes.dmp"));
        assert_eq!(parser.source_name(), "dumps/nodes.dmp");

        let err = parser.parse_node_line("1\t|\t1", 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dumps/nodes.dmp line 5: expected at least 5 fields, got 2"
        );
    }

    #[test]
    fn test_parse_node_line() {
        let parser = TaxdumpParser::new("nodes.dmp");
        let line = "3193\t|\t131221\t|\tclade\t|\t\t|\t4\t|\t1\t|\t1\t|\t1\t|\t1\t|\t1\t|\t1\t|\t0\t|\t\t|\t\t|";

        let node = parser.parse_node_line(line, 1).unwrap();
        assert_eq!(node, TaxonNode::new(3193, 131221, "clade", 4));
    }

    #[test]
    fn test_parse_node_line_with_exactly_five_fields() {
        let parser = TaxdumpParser::new("nodes.dmp");

        let node = parser.parse_node_line("1\t|\t1\t|\tno rank\t|\t\t|\t8\t|", 1).unwrap();
        assert_eq!(node.division_id, 8);
        assert!(node.is_self_parented());
    }

    #[test]
    fn test_parse_node_line_invalid_parent() {
        let parser = TaxdumpParser::new("nodes.dmp");

        let err = parser
            .parse_node_line("2\t|\tabc\t|\tgenus\t|\t\t|\t4\t|", 3)
            .unwrap_err();
        assert_eq!(err.to_string(), "nodes.dmp line 3: invalid parent_tax_id: 'abc'");
    }

    #[test]
    fn test_parse_nodes_last_duplicate_wins() {
        let parser = TaxdumpParser::new("nodes.dmp");
        let content = "1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\n\
                       2\t|\t1\t|\tgenus\t|\t\t|\t4\t|\n\
                       \n\
                       2\t|\t1\t|\tspecies\t|\t\t|\t4\t|\n";

        let nodes = parser.parse_nodes(content.as_bytes()).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[&2].rank, "species");
        assert_eq!(nodes.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_parse_nodes_reports_line_of_failure() {
        let parser = TaxdumpParser::new("nodes.dmp");
        let content = "1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\n2\t|\t1\t|\tgenus\n";

        let err = parser.parse_nodes(content.as_bytes()).unwrap_err();
        assert!(matches!(err, TaxsqlError::MissingFields { line: 2, .. }));
    }

    #[test]
    fn test_parse_names_keeps_only_scientific_names() {
        let parser = TaxdumpParser::new("names.dmp");
        let content = "2\t|\tOld name\t|\t\t|\tsynonym\t|\n\
                       2\t|\tRealus nameus\t|\t\t|\tscientific name\t|\n\
                       2\t|\tthing\t|\t\t|\tcommon name\t|\n";

        let names = parser.parse_names(content.as_bytes(), &subtree_of(&[1, 2])).unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(names[&2], "Realus nameus");
    }

    #[test]
    fn test_parse_names_drops_taxa_outside_subtree() {
        let parser = TaxdumpParser::new("names.dmp");
        let content = "1\t|\troot\t|\t\t|\tscientific name\t|\n\
                       9\t|\tElsewhere\t|\t\t|\tscientific name\t|\n";

        let names = parser.parse_names(content.as_bytes(), &subtree_of(&[1])).unwrap();
        assert_eq!(names.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_parse_names_last_scientific_name_wins() {
        let parser = TaxdumpParser::new("names.dmp");
        let content = "1\t|\tFirst\t|\t\t|\tscientific name\t|\n\
                       1\t|\tSecond\t|\t\t|\tscientific name\t|\n";

        let names = parser.parse_names(content.as_bytes(), &subtree_of(&[1])).unwrap();
        assert_eq!(names[&1], "Second");
    }

    #[test]
    fn test_parse_names_validates_filtered_lines() {
        let parser = TaxdumpParser::new("names.dmp");
        let content = "x\t|\tBroken\t|\t\t|\tsynonym\t|\n";

        assert!(parser.parse_names(content.as_bytes(), &subtree_of(&[1])).is_err());
    }

    #[test]
    fn test_crlf_line_endings() {
        let parser = TaxdumpParser::new("division.dmp");
        let content = "0\t|\tBCT\t|\tBacteria\t|\t\t|\r\n1\t|\tINV\t|\tInvertebrates\t|\t\t|\r\n";

        let divisions = parser.parse_divisions(content.as_bytes()).unwrap();
        assert_eq!(divisions[&1].name, "Invertebrates");
        assert_eq!(divisions[&0].comment, "");
    }
}
