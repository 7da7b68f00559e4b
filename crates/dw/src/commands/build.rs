//! `build` command implementation.

use std::path::PathBuf;

use clap::Args;
use dw_config::{CliSettings, Config};
use dw_sink::{MemoryDocument, Template};
use dw_translator::{DocxWriter, TranslatorOptions};
use dw_tree::TreeFormat;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Document tree to convert (`.json` or docutils `.xml`).
    tree: PathBuf,

    /// Output file. Defaults to `<tree stem>.document.json` next to the tree.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover dw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory image URIs are resolved against.
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// YAML style template.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Style applied to top-level tables without a directive.
    #[arg(long)]
    table_style: Option<String>,

    /// Input format, overriding the file extension.
    #[arg(long)]
    format: Option<TreeFormat>,

    /// Log conversion progress.
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Write logs to this file instead of the terminal.
    #[arg(long, env = "DW_LOG_FILE")]
    pub(crate) log_file: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, template or tree loading fails,
    /// or if the tree contains a structure the writer cannot express.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            template: self.template,
            table_style: self.table_style,
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output_path = config.output_resolved.path_for(&self.tree);

        output.heading(&format!("Converting {}", self.tree.display()));
        output.info(&format!("Source: {}", config.docs_resolved.source_dir.display()));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let template = match &config.template_resolved.path {
            Some(path) => {
                output.info(&format!("Template: {}", path.display()));
                Template::load(path)?
            }
            None => Template::default(),
        };
        let tree = dw_tree::load(&self.tree, self.format)?;
        tracing::info!(
            tree = %self.tree.display(),
            template = ?config.template_resolved.path,
            table_style = %config.template_resolved.table_style,
            "Loaded document tree"
        );

        let options = TranslatorOptions::default()
            .with_source_dir(config.docs_resolved.source_dir)
            .with_table_style(config.template_resolved.table_style);
        let conversion = DocxWriter::new(MemoryDocument::with_template(template), options)
            .write(&tree, &output_path)?;

        for warning in &conversion.report.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        if !conversion.report.skipped.is_empty() {
            output.info(&format!(
                "Skipped {} unsupported node(s)",
                conversion.report.skipped.len()
            ));
        }

        output.summary(conversion.document.stats(), conversion.report.warnings.len());
        output.success(&format!("Wrote {}", output_path.display()));
        Ok(())
    }
}
