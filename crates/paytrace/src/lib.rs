//! PayTrace gateway client.
//!
//! Builds requests in the gateway's delimited wire format (see
//! [`paytrace_protocol`]), sends them through a pluggable [`Transport`], and
//! decodes the replies.
//!
//! Two failure channels are kept apart: [`PayTraceError::Transport`] when the
//! gateway could not be reached, and business errors reported by the gateway,
//! which stay inside the [`Response`] of [`Gateway::send_request`] or become
//! [`PayTraceError::Gateway`] in the higher-level helpers.
//!
//! # Quick Example
//!
//! ```no_run
//! use paytrace::{Customer, CustomerExportFilter, Gateway, PayTraceConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), paytrace::PayTraceError> {
//! let config = PayTraceConfig::new("demo123", "demo123").with_domain("stage.paytrace.com");
//! let gateway = Gateway::from_config(config)?;
//!
//! for record in Customer::export(&gateway, &CustomerExportFilter::default()).await? {
//!     println!("{:?}", record.get("CUSTID"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Testing without a network
//!
//! ```
//! use std::sync::Arc;
//! use paytrace::{Customer, Gateway, LastExchange, PayTraceConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let log = Arc::new(LastExchange::new());
//! let gateway = Gateway::stubbed(PayTraceConfig::new("u", "p"), "RESPONSE~ok|")
//!     .with_log(log.clone());
//!
//! Customer::delete_by_id(&gateway, "foo_bar").await.unwrap();
//! assert_eq!(
//!     log.request().unwrap(),
//!     "UN~u|PSWD~p|TERMS~Y|METHOD~DeleteCustomer|CUSTID~foo_bar|"
//! );
//! # }
//! ```

pub mod address;
pub mod batch;
pub mod config;
pub mod credit_card;
pub mod customer;
pub mod email_receipt;
pub mod error;
pub mod gateway;
pub mod recurring;
pub mod transaction;
pub mod transport;

pub use address::{Address, AddressType};
pub use config::{ConfigError, PayTraceConfig};
pub use credit_card::CreditCard;
pub use customer::{Customer, CustomerDetails, CustomerExportFilter, CustomerUpdate};
pub use email_receipt::{send_receipt, ReceiptSource};
pub use error::PayTraceError;
pub use gateway::{Exchange, ExchangeLog, Gateway, LastExchange, TracingLog};
pub use recurring::{RecurringPayment, RecurringTarget, RecurringUpdate};
pub use transaction::{
    PaymentSource, ShippingQuoteRequest, TransactionExportFilter, TransactionRequest,
    TransactionResult, TransactionType,
};
pub use transport::{HttpTransport, OfflineTransport, Transport, TransportError};

// Re-export the protocol types callers handle directly
pub use paytrace_protocol::{
    methods, Credentials, Field, FieldKey, FieldKind, FieldValue, Record, Request, Response,
    Values,
};
