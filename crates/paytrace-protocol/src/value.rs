use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Date layout expected by the gateway.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A typed request value.
///
/// Each variant has exactly one rendering rule:
/// text is sent verbatim, integers in base 10, decimals in plain notation
/// with the scale they were given (`9.99`, `5.1`), dates as `MM/DD/YYYY`,
/// and flags as `Y`/`N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }
}

/// Value kind a dictionary field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    Flag,
}

impl FieldKind {
    /// Whether a value may be stored in a field of this kind.
    ///
    /// Text fields also take integers (numeric ids, zip codes) and decimal
    /// fields take whole-number integers. Everything else must match exactly.
    pub fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self, value.kind()),
            (FieldKind::Text, FieldKind::Text | FieldKind::Integer)
                | (FieldKind::Integer, FieldKind::Integer)
                | (FieldKind::Decimal, FieldKind::Decimal | FieldKind::Integer)
                | (FieldKind::Date, FieldKind::Date)
                | (FieldKind::Flag, FieldKind::Flag)
        )
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            FieldValue::Flag(true) => f.write_str("Y"),
            FieldValue::Flag(false) => f.write_str("N"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&String> for FieldValue {
    fn from(text: &String) -> Self {
        FieldValue::Text(text.clone())
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        FieldValue::Decimal(d)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        FieldValue::Date(date)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

macro_rules! integer_value {
    ($($t:ty),+) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Integer(i64::from(n))
                }
            }
        )+
    };
}

integer_value!(u8, u16, u32, i8, i16, i32, i64);
