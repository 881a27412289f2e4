use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("'{}' is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("line {line_number}: {reason}")]
    MalformedLine {
        line_number: usize,
        line: String,
        reason: MalformedReason,
    },

    #[error("'{0}' is not a record field (valid fields: {fields})", fields = crate::log_parser::record::FIELD_NAMES.join(", "))]
    UnknownQueryField(String),

    #[error("a query needs at least one predicate")]
    EmptyQuery,

    #[error("invalid file pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("'{0}' is not a field=value predicate")]
    InvalidPredicate(String),

    #[error("export type '{0}' is not supported (expected csv or json)")]
    UnsupportedExportFormat(String),

    #[error("failed to write {}: {source}", .path.display())]
    ExportWriteFailure {
        path: PathBuf,
        #[source]
        source: ExportError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Serializer-level failure behind an [`LogError::ExportWriteFailure`].
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    InvalidIp(String),
    MissingTimestamp,
    MissingRequest,
    MissingStatus,
    InvalidStatus(String),
    MissingBytes,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::InvalidIp(token) => {
                write!(f, "first item '{}' is not a valid IP address", token)
            }
            MalformedReason::MissingTimestamp => write!(f, "no [date:time] timestamp"),
            MalformedReason::MissingRequest => {
                write!(f, "no quoted \"METHOD URL PROTOCOL\" request")
            }
            MalformedReason::MissingStatus => write!(f, "no status code"),
            MalformedReason::InvalidStatus(token) => {
                write!(f, "status '{}' is not a status code (0-65535)", token)
            }
            MalformedReason::MissingBytes => write!(f, "no response size"),
        }
    }
}

impl LogError {
    pub fn malformed(line_number: usize, line: &str, reason: MalformedReason) -> Self {
        LogError::MalformedLine {
            line_number,
            line: line.to_string(),
            reason,
        }
    }
}
