//! PayTrace wire protocol.
//!
//! The gateway speaks a flat, delimiter-joined format instead of JSON or form
//! fields. A request is a list of `CODE~value` pairs joined by `|` with a
//! trailing `|`; a response uses the same outer format, and list operations
//! pack whole records into a single field as `key=value` pairs joined by `+`.
//!
//! - [`Field`] / [`FieldKey`]: the dictionary from semantic names to wire codes
//! - [`FieldValue`]: typed values with one rendering rule per type
//! - [`Request`]: ordered, credential-prefixed request encoder
//! - [`Response`]: tolerant decoder with error detection and record expansion
//!
//! # Example
//!
//! ```
//! use paytrace_protocol::{methods, Credentials, Field, Request, Response};
//!
//! let credentials = Credentials::new("demo123", "demo123");
//! let mut request = Request::new(&credentials);
//! request
//!     .set_field(Field::Method, methods::DELETE_CUSTOMER)
//!     .set_field(Field::CustomerId, "john_doe");
//!
//! assert_eq!(
//!     request.encode(),
//!     "UN~demo123|PSWD~demo123|TERMS~Y|METHOD~DeleteCustomer|CUSTID~john_doe|"
//! );
//!
//! let response = Response::parse("RESPONSE~ok|CUSTID~john_doe|");
//! assert!(response.has_values());
//! assert_eq!(response.get("CUSTID"), Some("john_doe"));
//! ```
//!
//! The protocol has no escaping. Values containing `|` or `~` cannot be sent
//! faithfully; [`Request`] flags them instead of rewriting them.

pub mod constants;
pub mod error;
pub mod fields;
pub mod request;
pub mod response;
pub mod value;

pub use constants::*;
pub use error::ProtocolError;
pub use fields::{Field, FieldKey};
pub use request::{Credentials, Request};
pub use response::{Record, Response, Values};
pub use value::{FieldKind, FieldValue};
