//! ezpdfkit - Merge PDF files and split them into parts.
//!
//! Command-line front end: reads inputs from disk, runs the request through
//! [`ezpdfkit::Toolkit`] and writes the generated files to the output
//! directory.

mod cli;

use clap::Parser;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use ezpdfkit::config::{Config, OverwriteMode};
use ezpdfkit::error::EzPdfError;
use ezpdfkit::io::{OutputWriter, UploadReader, read_uploads};
use ezpdfkit::output::{OutputFormatter, display_merge_report, display_split_outcome};
use ezpdfkit::Toolkit;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init only happens in tests; ignore it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), EzPdfError> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    let toolkit = Toolkit::new(&config);
    debug!(command = ?cli.command, output_dir = %config.output_dir.display(), "starting");

    if formatter.is_verbose() {
        formatter.section(&format!("{} v{}", ezpdfkit::NAME, ezpdfkit::VERSION));
        formatter.blank_line();
    }

    let (operation, files, summary) = match &cli.command {
        Command::Merge { inputs } => {
            formatter.info(&format!("Reading {} input pattern(s)...", inputs.len()));
            let uploads = read_uploads(inputs, &config).await?;

            formatter.info(&format!("Merging {} file(s)...", uploads.len()));
            let report = toolkit.merge(&uploads)?;
            display_merge_report(&formatter, &report);

            let summary =
                serde_json::to_value(&report).map_err(|e| EzPdfError::other(e.to_string()))?;
            let files = vec![(report.output.name.clone(), report.output.bytes)];
            ("merge", files, summary)
        }
        Command::Split { input, mode } => {
            let upload = UploadReader::new().read(input).await?;

            formatter.info(&format!("Splitting {}...", upload.name));
            let outcome = toolkit.split(&upload, &mode.to_request())?;
            display_split_outcome(&formatter, &outcome);

            let summary =
                serde_json::to_value(&outcome).map_err(|e| EzPdfError::other(e.to_string()))?;
            let files = outcome
                .files()
                .into_iter()
                .map(|(name, bytes)| (name.to_string(), bytes.to_vec()))
                .collect::<Vec<_>>();
            ("split", files, summary)
        }
    };

    let written = write_files(&config, &formatter, files).await?;

    if config.json {
        let document = json!({
            "operation": operation,
            "written": written,
            "result": summary,
        });
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| EzPdfError::other(e.to_string()))?;
        println!("{text}");
    }

    Ok(())
}

/// Write every generated file, asking before replacing existing ones.
async fn write_files(
    config: &Config,
    formatter: &OutputFormatter,
    files: Vec<(String, Vec<u8>)>,
) -> Result<Vec<PathBuf>, EzPdfError> {
    let mut written = Vec::with_capacity(files.len());

    for (name, bytes) in files {
        let path = config.output_dir.join(&name);
        let mode = handle_output_overwrite(&path, config, formatter)?;

        let stats = OutputWriter::new(mode)
            .write(&config.output_dir, &name, &bytes)
            .await?;

        formatter.debug(&format!(
            "Wrote {} ({}) in {:.2}s",
            stats.output_path.display(),
            stats.format_file_size(),
            stats.write_time.as_secs_f64()
        ));
        written.push(stats.output_path);
    }

    Ok(written)
}

/// Decide how to write `path` given the configured overwrite mode.
///
/// Returns the mode to hand to the writer, or an error if the file exists
/// and must not be replaced.
fn handle_output_overwrite(
    path: &Path,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<OverwriteMode, EzPdfError> {
    if !path.exists() {
        return Ok(OverwriteMode::NoClobber);
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(OverwriteMode::Force),
        OverwriteMode::NoClobber => Err(EzPdfError::OutputExists {
            path: path.to_path_buf(),
        }),
        OverwriteMode::Prompt => {
            // Nobody is reading prompts in quiet or JSON mode.
            if formatter.is_quiet() {
                return Err(EzPdfError::OutputExists {
                    path: path.to_path_buf(),
                });
            }

            formatter.warning(&format!("Output file already exists: {}", path.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| EzPdfError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(OverwriteMode::Force)
            } else {
                Err(EzPdfError::Cancelled)
            }
        }
    }
}
