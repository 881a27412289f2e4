//! Directory-level driver: discover files, parse each one, collect matches
//! and write per-file conversions.
//!
//! Files are handled one at a time and each is closed before the next is
//! opened. A file that cannot be read or exported is logged and counted; the
//! rest of the batch carries on.

use crate::error::LogError;
use crate::export::{export_records, ExportFormat};
use crate::log_parser::{collect_records, open_log_file, warn_malformed, LogRecord, Query};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_OUTPUT_DIR: &str = "FormattedLogFiles";

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub export_format: ExportFormat,
    pub out_dir: PathBuf,
    pub save_files: bool,
    pub query: Option<Query>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            export_format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save_files: true,
            query: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub files_processed: usize,
    pub files_failed: usize,
    pub records: usize,
    pub malformed_lines: usize,
    pub exports_written: usize,
    pub exports_failed: usize,
    pub matches: usize,
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub report: BatchReport,
    pub matches: Vec<LogRecord>,
}

/// Files in `dir` ending in `.ext`, sorted by path.
pub fn find_log_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, LogError> {
    if !dir.is_dir() {
        return Err(LogError::InvalidDirectory(dir.to_path_buf()));
    }

    let ext = ext.trim_start_matches('.');
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(ext)
    );

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry {}: {}", e.path().display(), e),
        }
    }
    files.sort();
    Ok(files)
}

pub fn process_files(files: &[PathBuf], options: &ProcessOptions) -> BatchResult {
    let mut result = BatchResult::default();

    for path in files {
        info!("Processing log file: {}", path.display());

        let parsed = match open_log_file(path).and_then(collect_records) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                result.report.files_failed += 1;
                continue;
            }
        };

        let report = &mut result.report;
        report.files_processed += 1;
        report.records += parsed.records.len();
        report.malformed_lines += parsed.malformed.len();
        if !parsed.malformed.is_empty() {
            warn_malformed(path, &parsed.malformed);
            warn!(
                "{}: skipped {} malformed line(s)",
                path.display(),
                parsed.malformed.len()
            );
        }

        if let Some(query) = &options.query {
            let hits = query.filter(&parsed.records);
            info!("{}: {} matching event(s)", path.display(), hits.len());
            report.matches += hits.len();
            result.matches.extend(hits);
        }

        if options.save_files {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            match export_records(
                options.export_format,
                &parsed.records,
                &options.out_dir,
                &file_name,
            ) {
                Ok(_) => report.exports_written += 1,
                Err(e) => {
                    warn!("Export skipped: {}", e);
                    report.exports_failed += 1;
                }
            }
        }
    }

    result
}

/// Write the accumulated search matches as `<out_dir>/<results_name>`.
pub fn save_search_results(result: &mut BatchResult, options: &ProcessOptions, results_name: &str) {
    info!(
        "Saving {} search result(s) to: {}/{}",
        result.matches.len(),
        options.out_dir.display(),
        results_name
    );
    match export_records(
        options.export_format,
        &result.matches,
        &options.out_dir,
        results_name,
    ) {
        Ok(_) => result.report.exports_written += 1,
        Err(e) => {
            warn!("Search results not saved: {}", e);
            result.report.exports_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_parser::fixtures::{sample_record, SAMPLE_LINE};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn write_logs(dir: &Path) {
        let post = SAMPLE_LINE.replace("GET", "POST");
        fs::write(
            dir.join("a.log"),
            format!("{}\nbroken line\n{}\n", SAMPLE_LINE, post),
        )
        .unwrap();
        fs::write(dir.join("b.log"), format!("{}\n", SAMPLE_LINE)).unwrap();
        fs::write(dir.join("notes.txt"), "not a log\n").unwrap();
        fs::write(dir.join(".hidden.log"), "ignored\n").unwrap();
    }

    #[test]
    fn test_find_log_files() {
        let dir = tempdir().unwrap();
        write_logs(dir.path());

        let files = find_log_files(dir.path(), "log").unwrap();
        assert_eq!(files, vec![dir.path().join("a.log"), dir.path().join("b.log")]);

        let same = find_log_files(dir.path(), ".log").unwrap();
        assert_eq!(same, files);

        assert!(find_log_files(dir.path(), "csv").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_log_files(&missing, "log"),
            Err(LogError::InvalidDirectory(path)) if path == missing
        ));
    }

    #[test]
    fn test_convert_and_search() {
        let dir = tempdir().unwrap();
        write_logs(dir.path());
        let out_dir = dir.path().join("out");

        let options = ProcessOptions {
            out_dir: out_dir.clone(),
            query: Some(Query::single("method", "GET").unwrap()),
            ..ProcessOptions::default()
        };
        let files = find_log_files(dir.path(), "log").unwrap();
        let mut result = process_files(&files, &options);

        assert_eq!(
            result.report,
            BatchReport {
                files_processed: 2,
                files_failed: 0,
                records: 3,
                malformed_lines: 1,
                exports_written: 2,
                exports_failed: 0,
                matches: 2,
            }
        );
        assert_eq!(result.matches, vec![sample_record(), sample_record()]);
        assert!(out_dir.join("a.csv").exists());
        assert!(out_dir.join("b.csv").exists());

        save_search_results(&mut result, &options, "hits.txt");
        assert_eq!(result.report.exports_written, 3);
        let saved: Vec<LogRecord> = csv::Reader::from_path(out_dir.join("hits.csv"))
            .unwrap()
            .deserialize()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(saved, result.matches);
    }

    #[test]
    fn test_unreadable_file_does_not_stop_batch() {
        let dir = tempdir().unwrap();
        write_logs(dir.path());
        let options = ProcessOptions {
            save_files: false,
            ..ProcessOptions::default()
        };

        let files = vec![dir.path().join("gone.log"), dir.path().join("b.log")];
        let result = process_files(&files, &options);
        assert_eq!(result.report.files_failed, 1);
        assert_eq!(result.report.files_processed, 1);
        assert_eq!(result.report.records, 1);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_export_failure_is_counted() {
        let dir = tempdir().unwrap();
        write_logs(dir.path());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let options = ProcessOptions {
            export_format: ExportFormat::Json,
            out_dir: blocker,
            ..ProcessOptions::default()
        };
        let files = find_log_files(dir.path(), "log").unwrap();
        let result = process_files(&files, &options);
        assert_eq!(result.report.files_processed, 2);
        assert_eq!(result.report.exports_failed, 2);
        assert_eq!(result.report.exports_written, 0);
    }
}
