//! CSV and JSON sinks for parsed records.

use crate::error::{ExportError, LogError};
use crate::log_parser::{LogRecord, FIELD_NAMES};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(LogError::UnsupportedExportFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// `<out_dir>/<name without its last extension>.<csv|json>`
pub fn output_path(out_dir: &Path, file_name: &str, format: ExportFormat) -> PathBuf {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    out_dir.join(format!("{}.{}", stem, format.extension()))
}

pub fn write_records<W: Write>(
    format: ExportFormat,
    records: &[LogRecord],
    mut writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            // Header is written by hand so an empty batch still gets one.
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            csv_writer.write_record(FIELD_NAMES)?;
            for record in records {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer(&mut writer, records)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Write `records` next to their siblings in `out_dir`, creating it if needed.
pub fn export_records(
    format: ExportFormat,
    records: &[LogRecord],
    out_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, LogError> {
    fs::create_dir_all(out_dir).map_err(|e| LogError::ExportWriteFailure {
        path: out_dir.to_path_buf(),
        source: e.into(),
    })?;

    let path = output_path(out_dir, file_name, format);
    info!("Exporting {} records to: {}", records.len(), path.display());

    let result = File::create(&path)
        .map_err(ExportError::from)
        .and_then(|file| write_records(format, records, BufWriter::new(file)));

    match result {
        Ok(()) => Ok(path),
        Err(source) => Err(LogError::ExportWriteFailure { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_parser::fixtures::sample_record;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn two_records() -> Vec<LogRecord> {
        let first = sample_record();
        let second = LogRecord {
            ip: "10.0.0.7".to_string(),
            method: "POST".to_string(),
            url: "/api/v1/items?id=3,4".to_string(),
            status: 0,
            bytes: "-".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) \"quoted\"".to_string(),
            ..first.clone()
        };
        vec![first, second]
    }

    #[test]
    fn test_format_names() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(LogError::UnsupportedExportFormat(name)) if name == "xml"
        ));
        assert_eq!(ExportFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn test_output_path_replaces_last_extension() {
        let dir = Path::new("out");
        assert_eq!(
            output_path(dir, "access.2021-02.log", ExportFormat::Csv),
            dir.join("access.2021-02.csv")
        );
        assert_eq!(
            output_path(dir, "results", ExportFormat::Json),
            dir.join("results.json")
        );
        assert_eq!(
            output_path(dir, ".hidden", ExportFormat::Csv),
            dir.join(".hidden.csv")
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempdir().unwrap();
        let records = two_records();
        let path = export_records(ExportFormat::Csv, &records, dir.path(), "site.log").unwrap();
        assert_eq!(path, dir.path().join("site.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, FIELD_NAMES);

        let read_back: Vec<LogRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_json_is_array_of_objects() {
        let dir = tempdir().unwrap();
        let records = two_records();
        let path = export_records(ExportFormat::Json, &records, dir.path(), "site.log").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["website"], "example.com");
        assert_eq!(array[1]["status"], 0);

        let read_back: Vec<LogRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_empty_batch_still_has_header() {
        let mut buffer = Vec::new();
        write_records(ExportFormat::Csv, &[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), format!("{}\n", FIELD_NAMES.join(",")));

        let mut buffer = Vec::new();
        write_records(ExportFormat::Json, &[], &mut buffer).unwrap();
        assert_eq!(buffer, b"[]");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("FormattedLogFiles").join("2021");
        let path = export_records(ExportFormat::Csv, &two_records(), &nested, "a.log").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_directory_reports_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file in the way").unwrap();

        let err = export_records(ExportFormat::Json, &two_records(), &blocker, "a.log").unwrap_err();
        match err {
            LogError::ExportWriteFailure { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
