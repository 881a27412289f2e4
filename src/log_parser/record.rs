use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Column order used by every export.
pub const FIELD_NAMES: [&str; 11] = [
    "ip",
    "date",
    "time",
    "method",
    "url",
    "protocol",
    "status",
    "bytes",
    "user_agent",
    "website",
    "dest_url",
];

/// One access-log event. Field declaration order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub ip: String,
    pub date: String,
    pub time: String,
    pub method: String,
    pub url: String,
    pub protocol: String,
    pub status: u16,
    pub bytes: String,
    pub user_agent: String,
    pub website: String,
    pub dest_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Ip,
    Date,
    Time,
    Method,
    Url,
    Protocol,
    Status,
    Bytes,
    UserAgent,
    Website,
    DestUrl,
}

impl RecordField {
    pub const ALL: [RecordField; 11] = [
        RecordField::Ip,
        RecordField::Date,
        RecordField::Time,
        RecordField::Method,
        RecordField::Url,
        RecordField::Protocol,
        RecordField::Status,
        RecordField::Bytes,
        RecordField::UserAgent,
        RecordField::Website,
        RecordField::DestUrl,
    ];

    pub fn name(&self) -> &'static str {
        FIELD_NAMES[*self as usize]
    }
}

impl FromStr for RecordField {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELD_NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| RecordField::ALL[i])
            .ok_or_else(|| LogError::UnknownQueryField(s.to_string()))
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl LogRecord {
    /// Text form of a field; `status` is rendered in decimal.
    pub fn value(&self, field: RecordField) -> Cow<'_, str> {
        match field {
            RecordField::Ip => Cow::Borrowed(&self.ip),
            RecordField::Date => Cow::Borrowed(&self.date),
            RecordField::Time => Cow::Borrowed(&self.time),
            RecordField::Method => Cow::Borrowed(&self.method),
            RecordField::Url => Cow::Borrowed(&self.url),
            RecordField::Protocol => Cow::Borrowed(&self.protocol),
            RecordField::Status => Cow::Owned(self.status.to_string()),
            RecordField::Bytes => Cow::Borrowed(&self.bytes),
            RecordField::UserAgent => Cow::Borrowed(&self.user_agent),
            RecordField::Website => Cow::Borrowed(&self.website),
            RecordField::DestUrl => Cow::Borrowed(&self.dest_url),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in RecordField::ALL {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}={:?}", field, self.value(field))?;
        }
        Ok(())
    }
}
