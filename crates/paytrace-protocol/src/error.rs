use thiserror::Error;

/// Errors returned by the protocol layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A semantic field name with no entry in the dictionary.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The gateway answered but reported a business failure.
    #[error("gateway error: {}", .0.join("; "))]
    Gateway(Vec<String>),
}
