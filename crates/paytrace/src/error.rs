use paytrace_protocol::ProtocolError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Errors returned by gateway operations.
///
/// [`Transport`](PayTraceError::Transport) means the gateway could not be
/// reached; [`Gateway`](PayTraceError::Gateway) means it answered with a
/// business failure.
#[derive(Debug, Error)]
pub enum PayTraceError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("gateway error: {}", .0.join("; "))]
    Gateway(Vec<String>),

    /// A field name that is not in the dictionary, from `Field::from_name(..)?`.
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("gateway response is missing {0}")]
    MissingResponseField(&'static str),
}

impl From<ProtocolError> for PayTraceError {
    fn from(e: ProtocolError) -> Self {
        match e {
            ProtocolError::Gateway(errors) => PayTraceError::Gateway(errors),
            ProtocolError::UnknownField(name) => PayTraceError::UnknownField(name),
        }
    }
}

impl PayTraceError {
    /// True when the gateway answered and rejected the request.
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, PayTraceError::Gateway(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paytrace_protocol::{Field, Response};

    fn resolve(name: &str) -> Result<Field, PayTraceError> {
        Ok(Field::from_name(name)?)
    }

    #[test]
    fn test_unknown_field_name_converts() {
        assert_eq!(resolve("customer_id").unwrap(), Field::CustomerId);

        let err = resolve("favourite_colour").unwrap_err();
        assert!(matches!(&err, PayTraceError::UnknownField(name) if name == "favourite_colour"));
        assert!(!err.is_gateway_error());
    }

    #[test]
    fn test_gateway_errors_are_flattened() {
        let err: PayTraceError = Response::parse("ERROR~first|ERROR~second|")
            .into_result()
            .unwrap_err()
            .into();
        assert!(err.is_gateway_error());
        assert_eq!(err.to_string(), "gateway error: first; second");
    }
}
