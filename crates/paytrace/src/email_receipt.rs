use paytrace_protocol::{methods, Field, Response};

use crate::error::PayTraceError;
use crate::gateway::Gateway;
use crate::transport::Transport;

/// What the receipt is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptSource {
    Transaction(String),
    Check(String),
}

/// Ask the gateway to email a receipt for a card transaction or a check.
pub async fn send_receipt<T: Transport>(
    gateway: &Gateway<T>,
    source: &ReceiptSource,
    email: &str,
) -> Result<Response, PayTraceError> {
    let mut request = gateway.request_for(methods::EMAIL_RECEIPT);
    match source {
        ReceiptSource::Transaction(id) => request.set_field(Field::TransactionId, id),
        ReceiptSource::Check(id) => request.set_field(Field::CheckId, id),
    };
    request.set_field(Field::Email, email);

    gateway.execute(request).await
}
