//! Export pipeline: load, select, load names, render
//!
//! Stages run in sequence and share nothing but the data handed forward.
//! The first error aborts the run; an interrupted render may leave a
//! partial script behind.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use taxsql_common::{Result, TaxsqlError};
use tracing::{info, info_span};

use crate::config::ExportConfig;
use crate::sql::{ExportData, SqlRenderer};
use crate::subtree::select_subtree;
use crate::taxdump::{load_divisions, load_names, load_nodes, ExportStats};

/// Runs one dump-to-SQL conversion
pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run the conversion and write the script to the configured output
    pub fn run(&self) -> Result<ExportStats> {
        let config = &self.config;
        let _span = info_span!("export", root = config.root_tax_id).entered();

        config.validate()?;

        let divisions = load_divisions(&config.division_path)?;
        let nodes = load_nodes(&config.nodes_path)?;

        if !nodes.contains_key(&config.root_tax_id) {
            return Err(TaxsqlError::RootNotFound(config.root_tax_id));
        }

        let subtree = select_subtree(&nodes, config.root_tax_id);
        info!(selected = subtree.len(), total = nodes.len(), "Selected taxa under root");

        let names = load_names(&config.names_path, &subtree)?;

        let output_path = &config.output_path;
        let file = File::create(output_path).map_err(|e| TaxsqlError::write(output_path, e))?;

        let mut renderer = SqlRenderer::new(BufWriter::new(file));
        let data = ExportData {
            divisions: &divisions,
            nodes: &nodes,
            subtree: &subtree,
            names: &names,
        };
        renderer.render(&data).map_err(|e| at_output(output_path, e))?;
        renderer.finish().map_err(|e| at_output(output_path, e))?;

        let stats = ExportStats {
            divisions: divisions.len(),
            nodes: nodes.len(),
            selected_taxa: subtree.len(),
            names: names.len(),
            output_path: output_path.clone(),
        };

        info!(
            divisions = stats.divisions,
            taxa = stats.selected_taxa,
            names = stats.names,
            unnamed = stats.unnamed_taxa(),
            output = %output_path.display(),
            "Export complete"
        );

        Ok(stats)
    }
}

/// Attach the output path to bare IO errors from the renderer
fn at_output(path: &Path, err: TaxsqlError) -> TaxsqlError {
    match err {
        TaxsqlError::Io(source) => TaxsqlError::write(path, source),
        other => other,
    }
}
