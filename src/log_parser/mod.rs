pub mod extractors;
pub mod formats;
pub mod patterns;
pub mod query;
pub mod record;
pub mod stream;

pub use query::{Predicate, Query};
pub use record::{LogRecord, RecordField, FIELD_NAMES};
pub use stream::{collect_records, open_log_file, warn_malformed, ParsedFile, RecordStream};
