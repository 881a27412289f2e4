use anyhow::{Context, Result};
use clap::Parser;
use logsift::batch::{self, ProcessOptions};
use logsift::cli::{Cli, Commands, InputArgs};
use logsift::export::ExportFormat;
use logsift::log_parser::{collect_records, open_log_file, warn_malformed, Query};
use logsift::{logging, utils};
use std::path::{Path, PathBuf};
use tracing::info;

fn prepare_batch(
    input: &InputArgs,
    save_files: bool,
    query: Option<Query>,
) -> Result<(Vec<PathBuf>, ProcessOptions)> {
    let export_format: ExportFormat = input.export_type.parse()?;
    let options = ProcessOptions {
        export_format,
        out_dir: utils::resolve_output_dir(&input.dir_out),
        save_files,
        query,
    };

    let input_dir = Path::new(&input.input_path);
    let files = batch::find_log_files(input_dir, &input.log_files)?;
    info!(
        "Accessing input directory '{}': {} '.{}' file(s)",
        input_dir.display(),
        files.len(),
        input.log_files.trim_start_matches('.')
    );
    Ok((files, options))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Convert { input } => {
            let (files, options) = prepare_batch(input, true, None)?;
            info!("Converting to {} in {}", options.export_format, options.out_dir.display());
            let result = batch::process_files(&files, &options);
            utils::output_report(&result.report, input.report.as_ref())?;
        }
        Commands::Search {
            input,
            predicates,
            output_results,
            save_files,
        } => {
            let query = Query::parse_all(predicates.as_slice())?;
            info!("Searching for: {}", query);

            let (files, options) = prepare_batch(input, *save_files, Some(query))?;
            let mut result = batch::process_files(&files, &options);
            batch::save_search_results(&mut result, &options, output_results);
            utils::output_report(&result.report, input.report.as_ref())?;
        }
        Commands::Parse { input, output } => {
            let path = Path::new(input);
            let parsed = open_log_file(path)
                .and_then(collect_records)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            warn_malformed(path, &parsed.malformed);
            info!(
                "{}: {} record(s), {} malformed line(s)",
                path.display(),
                parsed.records.len(),
                parsed.malformed.len()
            );
            utils::output_records(&parsed.records, output.as_ref())?;
        }
    }

    Ok(())
}
