use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::constants::{FIELD_DELIMITER, TERMS_ACCEPTED, VALUE_DELIMITER};
use crate::fields::{Field, FieldKey};
use crate::value::FieldValue;

/// Account credentials sent at the head of every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A single gateway request under construction.
///
/// Fields are kept in the order they were first set. `UN`, `PSWD` and
/// `TERMS` are always the first three. Setting a field again replaces its
/// value without moving it.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    fields: IndexMap<String, String>,
    flagged: Vec<String>,
}

impl Request {
    pub fn new(credentials: &Credentials) -> Self {
        let mut request = Self {
            fields: IndexMap::new(),
            flagged: Vec::new(),
        };
        request
            .set_field(Field::UserName, credentials.user_name.as_str())
            .set_field(Field::Password, credentials.password.as_str())
            .set_field(Field::Terms, TERMS_ACCEPTED);
        request
    }

    /// Start a request for the given `METHOD`.
    pub fn with_method(credentials: &Credentials, method: &str) -> Self {
        let mut request = Self::new(credentials);
        request.set_field(Field::Method, method);
        request
    }

    /// Set a field, keeping its original position if it was already set.
    ///
    /// The protocol cannot escape `|` or `~`. A value containing either is
    /// sent unchanged, logged, and listed by [`Request::flagged_fields`].
    ///
    /// Dictionary fields must get a value their [`kind`](Field::kind)
    /// accepts; debug builds panic otherwise. Raw keys take anything.
    pub fn set_field(
        &mut self,
        key: impl Into<FieldKey>,
        value: impl Into<FieldValue>,
    ) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let FieldKey::Known(field) = &key {
            debug_assert!(
                field.kind().accepts(&value),
                "field {} expects a {:?} value, got {:?}",
                field.name(),
                field.kind(),
                value
            );
        }
        let rendered = value.to_string();
        let code = key.wire_code();

        if rendered.contains([FIELD_DELIMITER, VALUE_DELIMITER]) {
            tracing::warn!(
                field = %code,
                "value contains a reserved delimiter and will not survive the wire format"
            );
            if !self.flagged.iter().any(|c| c == code) {
                self.flagged.push(code.to_string());
            }
        }

        self.fields.insert(code.to_string(), rendered);
        self
    }

    /// Set a field only when a value is present.
    pub fn set_optional<V: Into<FieldValue>>(
        &mut self,
        key: impl Into<FieldKey>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set_field(key, value);
        }
        self
    }

    /// Copy the listed fields from `source`, in the order given.
    /// Keys missing from `source` are skipped.
    pub fn set_fields(&mut self, keys: &[Field], source: &HashMap<Field, FieldValue>) -> &mut Self {
        for key in keys {
            if let Some(value) = source.get(key) {
                self.set_field(*key, value.clone());
            }
        }
        self
    }

    /// Serialize to the wire format: `CODE~value|CODE~value|`.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        for (code, value) in &self.fields {
            encoded.push_str(code);
            encoded.push(VALUE_DELIMITER);
            encoded.push_str(value);
            encoded.push(FIELD_DELIMITER);
        }
        encoded
    }

    /// Rendered value for a wire code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.fields.get(code).map(String::as_str)
    }

    pub fn method(&self) -> Option<&str> {
        self.get(Field::Method.wire_code())
    }

    /// Wire codes whose values contain a reserved delimiter.
    pub fn flagged_fields(&self) -> &[String] {
        &self.flagged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = Field::Password.wire_code();
        f.debug_map()
            .entries(self.fields.iter().map(|(code, value)| {
                let shown = if code == password { "[REDACTED]" } else { value.as_str() };
                (code.as_str(), shown)
            }))
            .finish()
    }
}
