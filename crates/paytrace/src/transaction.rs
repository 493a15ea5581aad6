//! Card transactions, transaction exports and shipping quotes.

use chrono::NaiveDate;
use paytrace_protocol::{methods, Field, Record, Request, Response};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::address::{Address, AddressType};
use crate::credit_card::CreditCard;
use crate::error::PayTraceError;
use crate::gateway::Gateway;
use crate::transport::Transport;

/// Response field carrying the new transaction's id.
pub const TRANSACTION_ID_FIELD: &str = "TRANSACTIONID";
/// Response field carrying the issuer's approval code.
pub const APPROVAL_CODE_FIELD: &str = "APPCODE";
/// Response field carrying the issuer's approval message.
pub const APPROVAL_MESSAGE_FIELD: &str = "APPMSG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Sale,
    Authorization,
    Refund,
    Void,
    Capture,
    /// Sale completed with an approval code obtained by phone.
    Force,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Sale => "Sale",
            TransactionType::Authorization => "Authorization",
            TransactionType::Refund => "Refund",
            TransactionType::Void => "Void",
            TransactionType::Capture => "Capture",
            TransactionType::Force => "Force",
        }
    }
}

/// What the transaction is charged against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSource {
    Card(CreditCard),
    /// A stored customer profile.
    Customer(String),
    /// An earlier transaction (refunds, voids, captures).
    Transaction(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    pub source: PaymentSource,
    /// Required for every type except `Void`.
    pub amount: Option<Decimal>,
    /// Approval code for `Force` transactions.
    pub approval_code: Option<String>,
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub description: Option<String>,
    pub tax_amount: Option<Decimal>,
    pub invoice: Option<String>,
    pub customer_reference_id: Option<String>,
    pub email: Option<String>,
}

impl TransactionRequest {
    pub fn new(transaction_type: TransactionType, source: PaymentSource) -> Self {
        Self {
            transaction_type,
            source,
            amount: None,
            approval_code: None,
            billing_address: None,
            shipping_address: None,
            description: None,
            tax_amount: None,
            invoice: None,
            customer_reference_id: None,
            email: None,
        }
    }

    pub fn sale(source: PaymentSource, amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
            ..Self::new(TransactionType::Sale, source)
        }
    }

    fn set_request(&self, request: &mut Request) {
        request
            .set_field(Field::TransactionType, self.transaction_type.as_str())
            .set_optional(Field::Amount, self.amount);
        match &self.source {
            PaymentSource::Card(card) => card.set_request(request),
            PaymentSource::Customer(id) => {
                request.set_field(Field::CustomerId, id);
            }
            PaymentSource::Transaction(id) => {
                request.set_field(Field::TransactionId, id);
            }
        }
        request.set_optional(Field::ApprovalCode, self.approval_code.as_ref());
        if let Some(address) = &self.billing_address {
            address.set_request(AddressType::Billing, request);
        }
        if let Some(address) = &self.shipping_address {
            address.set_request(AddressType::Shipping, request);
        }
        request
            .set_optional(Field::Description, self.description.as_ref())
            .set_optional(Field::TaxAmount, self.tax_amount)
            .set_optional(Field::Invoice, self.invoice.as_ref())
            .set_optional(Field::CustomerReferenceId, self.customer_reference_id.as_ref())
            .set_optional(Field::Email, self.email.as_ref());
    }
}

/// Outcome of an approved transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    pub transaction_id: String,
    pub approval_code: Option<String>,
    pub approval_message: Option<String>,
    pub response: Response,
}

/// Run a transaction through `PROCESSTRANX`.
pub async fn process<T: Transport>(
    gateway: &Gateway<T>,
    transaction: &TransactionRequest,
) -> Result<TransactionResult, PayTraceError> {
    if transaction.amount.is_none() && transaction.transaction_type != TransactionType::Void {
        tracing::warn!(
            transaction_type = transaction.transaction_type.as_str(),
            "transaction sent without an amount"
        );
    }

    let mut request = gateway.request_for(methods::PROCESS_TRANSACTION);
    transaction.set_request(&mut request);

    let response = gateway.execute(request).await?;
    let transaction_id = response
        .get(TRANSACTION_ID_FIELD)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(PayTraceError::MissingResponseField(TRANSACTION_ID_FIELD))?;

    Ok(TransactionResult {
        transaction_id,
        approval_code: response.get(APPROVAL_CODE_FIELD).map(str::to_string),
        approval_message: response.get(APPROVAL_MESSAGE_FIELD).map(str::to_string),
        response,
    })
}

/// Void an unsettled transaction.
pub async fn void<T: Transport>(
    gateway: &Gateway<T>,
    transaction_id: &str,
) -> Result<TransactionResult, PayTraceError> {
    let transaction = TransactionRequest::new(
        TransactionType::Void,
        PaymentSource::Transaction(transaction_id.to_string()),
    );
    process(gateway, &transaction).await
}

/// Filters for [`export`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionExportFilter {
    pub transaction_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Only transactions entered by this gateway user.
    pub user: Option<String>,
    pub search_text: Option<String>,
}

pub async fn export<T: Transport>(
    gateway: &Gateway<T>,
    filter: &TransactionExportFilter,
) -> Result<Vec<Record>, PayTraceError> {
    let mut request = gateway.request_for(methods::EXPORT_TRANSACTIONS);
    request
        .set_optional(Field::TransactionId, filter.transaction_id.as_ref())
        .set_optional(Field::StartDate, filter.start_date)
        .set_optional(Field::EndDate, filter.end_date)
        .set_optional(Field::User, filter.user.as_ref())
        .set_optional(Field::SearchText, filter.search_text.as_ref());
    Ok(gateway.execute(request).await?.into_records())
}

/// Parcel details for [`calculate_shipping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingQuoteRequest {
    pub source_zip: String,
    pub source_state: String,
    pub destination_zip: String,
    pub destination_state: String,
    pub destination_country: Option<String>,
    /// Weight in pounds.
    pub weight: Decimal,
    /// Carriers to quote, e.g. `UPS`, `USPS`, `FEDEX`.
    pub shippers: Vec<String>,
}

/// Quote shipping costs. One record per carrier and service.
pub async fn calculate_shipping<T: Transport>(
    gateway: &Gateway<T>,
    quote: &ShippingQuoteRequest,
) -> Result<Vec<Record>, PayTraceError> {
    let mut request = gateway.request_for(methods::CALCULATE_SHIPPING);
    request
        .set_field(Field::SourceZip, quote.source_zip.as_str())
        .set_field(Field::SourceState, quote.source_state.as_str())
        .set_field(Field::ShippingPostalCode, quote.destination_zip.as_str())
        .set_field(Field::ShippingWeight, quote.weight)
        .set_field(Field::Shippers, quote.shippers.join(","))
        .set_field(Field::ShippingState, quote.destination_state.as_str())
        .set_optional(Field::ShippingCountry, quote.destination_country.as_ref());
    Ok(gateway.execute(request).await?.into_records())
}
