//! Utility functions for logsift
//!
//! This module provides common utilities for:
//! - Output formatting (plain text and JSON) of run reports and records
//! - Resolving settings from arguments and environment variables

use crate::batch::{BatchReport, DEFAULT_OUTPUT_DIR};
use crate::cli::OutputFormat;
use crate::log_parser::LogRecord;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

fn wants_json(format: Option<&OutputFormat>) -> bool {
    format.is_some_and(|f| matches!(f, OutputFormat::Json)) || env::var("JSON_OUTPUT").is_ok()
}

pub fn render_report(report: &BatchReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut lines = vec![
        format!("Files processed:  {}", report.files_processed),
        format!("Records parsed:   {}", report.records),
        format!("Malformed lines:  {}", report.malformed_lines),
        format!("Exports written:  {}", report.exports_written),
    ];
    if report.files_failed > 0 {
        lines.push(format!("Files failed:     {}", report.files_failed));
    }
    if report.exports_failed > 0 {
        lines.push(format!("Exports failed:   {}", report.exports_failed));
    }
    lines.push(format!("Search matches:   {}", report.matches));
    Ok(lines.join("\n"))
}

pub fn output_report(report: &BatchReport, format: Option<&OutputFormat>) -> Result<()> {
    println!("{}", render_report(report, wants_json(format))?);

    if report.malformed_lines > 0 || report.files_failed > 0 || report.exports_failed > 0 {
        eprintln!(
            "\nWarning: {} malformed line(s), {} unreadable file(s), {} failed export(s)",
            report.malformed_lines, report.files_failed, report.exports_failed
        );
    }
    Ok(())
}

pub fn render_records(records: &[LogRecord], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(records)?);
    }
    Ok(records
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn output_records(records: &[LogRecord], format: Option<&OutputFormat>) -> Result<()> {
    let rendered = render_records(records, wants_json(format))?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

pub fn resolve_output_dir(dir_arg: &Option<String>) -> PathBuf {
    match dir_arg {
        Some(dir) => PathBuf::from(dir),
        None => env::var("LOGSIFT_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
    }
}
