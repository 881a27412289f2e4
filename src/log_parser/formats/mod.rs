pub mod hosting;

use super::record::LogRecord;
use crate::error::MalformedReason;

pub trait LogLineParser {
    /// Build one record from one raw line, or say why the line was rejected.
    fn parse_line(&self, line: &str) -> Result<LogRecord, MalformedReason>;

    /// Whether `line` opens a new record.
    fn is_record_start(&self, line: &str) -> bool;
}
