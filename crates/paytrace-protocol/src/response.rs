use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::{
    DEFAULT_RECORD_FIELDS, ERROR_FIELD, FIELD_DELIMITER, RECORD_DELIMITER,
    RECORD_VALUE_DELIMITER, RESPONSE_FIELD, SUCCESS_TOKEN, VALUE_DELIMITER,
};
use crate::error::ProtocolError;

/// Flat wire code → value mapping, in response order.
pub type Values = IndexMap<String, String>;

/// One nested record, sub-key → sub-value, in response order.
pub type Record = IndexMap<String, String>;

/// A decoded gateway response.
///
/// Exactly one of [`has_errors`](Response::has_errors) and
/// [`has_values`](Response::has_values) is true. Check before trusting values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    #[serde(skip)]
    raw: String,
    values: Values,
    records: Vec<Record>,
    errors: Vec<String>,
}

impl Response {
    /// Decode with the default record-list fields.
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, DEFAULT_RECORD_FIELDS)
    }

    /// Same as [`parse`](Response::parse).
    pub fn decode(raw: &str) -> Self {
        Self::parse(raw)
    }

    /// Decode, expanding every field whose code is in `record_fields` into
    /// a [`Record`].
    ///
    /// Decoding never fails: tokens without a `~` are skipped, duplicate
    /// codes keep the last value, unknown codes are kept verbatim.
    pub fn parse_with(raw: &str, record_fields: &[&str]) -> Self {
        let mut values = Values::new();
        let mut records = Vec::new();
        let mut errors = Vec::new();

        for token in raw.trim_end_matches(['\r', '\n']).split(FIELD_DELIMITER) {
            if token.is_empty() {
                continue;
            }
            let Some((code, value)) = token.split_once(VALUE_DELIMITER) else {
                tracing::debug!(token, "skipping malformed response token");
                continue;
            };

            if record_fields.contains(&code) {
                let record = parse_record(value);
                if !record.is_empty() {
                    records.push(record);
                }
                continue;
            }

            if code == ERROR_FIELD && !value.is_empty() {
                errors.push(value.to_string());
            }
            values.insert(code.to_string(), value.to_string());
        }

        if let Some(status) = values.get(RESPONSE_FIELD) {
            if !status.eq_ignore_ascii_case(SUCCESS_TOKEN) {
                errors.push(status.clone());
            }
        }

        Self {
            raw: raw.to_string(),
            values,
            records,
            errors,
        }
    }

    /// The undecoded response text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_values(&self) -> bool {
        !self.has_errors()
    }

    /// Error messages in response order: every non-empty `ERROR` field,
    /// then a non-`ok` `RESPONSE` field.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All error messages joined with `"; "`.
    pub fn error_message(&self) -> Option<String> {
        self.has_errors().then(|| self.errors.join("; "))
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn into_values(self) -> Values {
        self.values
    }

    /// Turn a business failure into [`ProtocolError::Gateway`].
    pub fn into_result(self) -> Result<Self, ProtocolError> {
        if self.has_errors() {
            Err(ProtocolError::Gateway(self.errors))
        } else {
            Ok(self)
        }
    }
}

fn parse_record(value: &str) -> Record {
    value
        .split(RECORD_DELIMITER)
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| match chunk.split_once(RECORD_VALUE_DELIMITER) {
            Some((key, value)) => Some((key.to_string(), value.to_string())),
            None => {
                tracing::debug!(chunk, "skipping malformed record pair");
                None
            }
        })
        .collect()
}
