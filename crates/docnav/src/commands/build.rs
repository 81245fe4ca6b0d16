//! `docnav build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config, DiagnosticLevel, DiagnosticsConfig};
use docnav_site::{
    DiagnosticsPolicy, DocumentRegistry, FsHtmlSource, GeneratorConfig, JsonGenerator, Report,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project manifest listing compiled documents (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Directory holding rendered HTML and receiving .fjson files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Root page of the TOC hierarchy (overrides config).
    #[arg(long)]
    master: Option<String>,

    /// Compute page data without writing .fjson files.
    #[arg(long)]
    no_json: bool,

    /// Write build errors to this file.
    #[arg(long, env = "DOCNAV_SAVE_ERRORS")]
    save_errors: Option<PathBuf>,

    /// Exit with an error status if the build reports any problem.
    #[arg(long)]
    fail_on_errors: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the manifest cannot be loaded,
    /// output cannot be written, or problems were found with `--fail-on-errors`.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            master_document: self.master,
            manifest: self.manifest,
            output_dir: self.output_dir,
            output_json: self.no_json.then_some(false),
            fail_on_errors: self.fail_on_errors.then_some(true),
            save_errors: self.save_errors,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;
        let diagnostics = &config.diagnostics_resolved;

        output.location("manifest", &build.manifest);
        output.location("output", &build.output_dir);

        let registry = DocumentRegistry::load(&build.manifest)?;
        let source = FsHtmlSource::new(&build.output_dir);
        let generator_config = GeneratorConfig {
            master_document: build.master_document.clone(),
            output_dir: build.output_json.then(|| build.output_dir.clone()),
            diagnostics: diagnostics_policy(diagnostics),
        };

        let result = JsonGenerator::new(&registry, &source, generator_config).generate()?;

        for diagnostic in &result.diagnostics {
            output.diagnostic(diagnostic);
        }
        if let Some(path) = &diagnostics.save_errors {
            result.save_errors(path)?;
            output.location("errors", path);
        }
        output.summary(&result);

        if diagnostics.fail_on_errors && !result.is_successful() {
            return Err(CliError::BuildErrors(result.diagnostics.len()));
        }

        Ok(())
    }
}

/// Map configured diagnostic levels onto the generator policy.
fn diagnostics_policy(config: &DiagnosticsConfig) -> DiagnosticsPolicy {
    let report = |level| match level {
        DiagnosticLevel::Ignore => Report::Ignore,
        DiagnosticLevel::Warn => Report::Warn,
    };
    DiagnosticsPolicy {
        missing_children: report(config.missing_children),
        orphans: report(config.orphans),
    }
}
