//! Exact-match, multi-field record search.
//!
//! A [`Query`] is an ordered list of field/value predicates joined with AND.
//! Field names are checked against the record schema when the query is
//! built, so a typo fails before any file is read.

use super::record::{LogRecord, RecordField};
use crate::error::LogError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: RecordField,
    pub value: String,
}

impl Predicate {
    pub fn new(field: &str, value: impl Into<String>) -> Result<Self, LogError> {
        Ok(Self {
            field: field.parse()?,
            value: value.into(),
        })
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        record.value(self.field) == self.value.as_str()
    }
}

/// Parses `field=value`. Only the first `=` separates, so values may contain one.
/// Whitespace around the field and the value is dropped.
impl FromStr for Predicate {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| LogError::InvalidPredicate(s.to_string()))?;
        Predicate::new(field.trim(), value.trim())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {:?}", self.field, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    predicates: Vec<Predicate>,
}

impl Query {
    pub fn new(predicates: Vec<Predicate>) -> Result<Self, LogError> {
        if predicates.is_empty() {
            return Err(LogError::EmptyQuery);
        }
        Ok(Self { predicates })
    }

    pub fn single(field: &str, value: impl Into<String>) -> Result<Self, LogError> {
        Self::new(vec![Predicate::new(field, value)?])
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, LogError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let predicates = pairs
            .into_iter()
            .map(|(field, value)| Predicate::new(field.as_ref(), value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(predicates)
    }

    pub fn parse_all<S: AsRef<str>>(texts: &[S]) -> Result<Self, LogError> {
        let predicates = texts
            .iter()
            .map(|text| text.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(predicates)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Matching records, in input order.
    pub fn filter<'a, I>(&self, records: I) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}
