use super::extractors::leading_token;
use super::formats::{hosting::HostingLogParser, LogLineParser};
use super::record::LogRecord;
use crate::error::{LogError, MalformedReason};
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::Path;
use tracing::{debug, warn};

/// Lazy, single-pass sequence of records read from `R`.
///
/// A line whose first token is a valid IP starts a record, which is yielded as
/// soon as it is built, so items come out in line order. Any other non-blank
/// line comes out as `Err(LogError::MalformedLine)` and never merges into a
/// neighbouring record. A read error is yielded once and ends the stream.
pub struct RecordStream<R, P = HostingLogParser> {
    lines: Split<R>,
    parser: P,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> RecordStream<R> {
    pub fn new(reader: R) -> Self {
        Self::with_parser(reader, HostingLogParser)
    }
}

impl<R: BufRead, P: LogLineParser> RecordStream<R, P> {
    pub fn with_parser(reader: R, parser: P) -> Self {
        Self {
            lines: reader.split(b'\n'),
            parser,
            line_number: 0,
            finished: false,
        }
    }

    fn next_line(&mut self) -> Option<Result<String, LogError>> {
        let bytes = match self.lines.next()? {
            Ok(bytes) => bytes,
            Err(e) => return Some(Err(LogError::Io(e))),
        };
        self.line_number += 1;
        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        if line.ends_with('\r') {
            line.pop();
        }
        Some(Ok(line))
    }
}

impl<R: BufRead, P: LogLineParser> Iterator for RecordStream<R, P> {
    type Item = Result<LogRecord, LogError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let line = match self.next_line() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            if line.trim().is_empty() {
                debug!(line_number = self.line_number, "skipping blank line");
                continue;
            }

            if !self.parser.is_record_start(&line) {
                let token = leading_token(&line).unwrap_or_default().to_string();
                return Some(Err(LogError::malformed(
                    self.line_number,
                    &line,
                    MalformedReason::InvalidIp(token),
                )));
            }

            return Some(
                self.parser
                    .parse_line(&line)
                    .map_err(|reason| LogError::malformed(self.line_number, &line, reason)),
            );
        }
        None
    }
}

pub fn open_log_file(path: &Path) -> Result<RecordStream<BufReader<File>>, LogError> {
    let file = File::open(path)?;
    Ok(RecordStream::new(BufReader::new(file)))
}

/// Records and skipped-line diagnostics from one fully drained stream.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<LogRecord>,
    pub malformed: Vec<LogError>,
}

/// Drain a stream into records and diagnostics. A read error aborts the file.
pub fn collect_records<I>(stream: I) -> Result<ParsedFile, LogError>
where
    I: IntoIterator<Item = Result<LogRecord, LogError>>,
{
    let mut parsed = ParsedFile::default();
    for item in stream {
        match item {
            Ok(record) => parsed.records.push(record),
            Err(e @ LogError::MalformedLine { .. }) => parsed.malformed.push(e),
            Err(e) => return Err(e),
        }
    }
    Ok(parsed)
}

fn malformed_message(path: &Path, error: &LogError) -> Option<String> {
    match error {
        LogError::MalformedLine {
            line_number,
            line,
            reason,
        } => Some(format!(
            "{}:{}: {} (skipped: {:?})",
            path.display(),
            line_number,
            reason,
            line
        )),
        _ => None,
    }
}

/// Log each skipped line of `path` with its number, reason and text.
pub fn warn_malformed(path: &Path, malformed: &[LogError]) {
    for message in malformed.iter().filter_map(|e| malformed_message(path, e)) {
        warn!("{}", message);
    }
}
