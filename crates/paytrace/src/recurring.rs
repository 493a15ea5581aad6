//! Recurring payments scheduled against a stored customer profile.

use chrono::NaiveDate;
use paytrace_protocol::{methods, Field, Record, Request, Response};
use rust_decimal::Decimal;

use crate::error::PayTraceError;
use crate::gateway::Gateway;
use crate::transport::Transport;

/// A new recurring payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringPayment {
    pub customer_id: String,
    /// Gateway frequency code, e.g. `3` for monthly.
    pub frequency: String,
    pub start: NaiveDate,
    /// Number of payments; `999` means until cancelled.
    pub total_count: u32,
    pub amount: Decimal,
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    /// Email the customer a receipt for each payment.
    pub customer_receipt: Option<bool>,
    pub recur_type: Option<String>,
}

/// Changes to an existing recurring payment. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurringUpdate {
    pub frequency: Option<String>,
    pub start: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
    pub total_count: Option<u32>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub customer_receipt: Option<bool>,
    pub recur_type: Option<String>,
}

/// Selects recurring payments by their own id or by customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringTarget {
    Recurrence(String),
    Customer(String),
}

impl RecurringTarget {
    fn set_request(&self, request: &mut Request) {
        match self {
            RecurringTarget::Recurrence(id) => request.set_field(Field::RecurId, id),
            RecurringTarget::Customer(id) => request.set_field(Field::CustomerId, id),
        };
    }
}

/// Schedule a recurring payment. Returns the gateway's recurrence id.
pub async fn create<T: Transport>(
    gateway: &Gateway<T>,
    payment: &RecurringPayment,
) -> Result<String, PayTraceError> {
    let mut request = gateway.request_for(methods::CREATE_RECURRING);
    request
        .set_field(Field::CustomerId, payment.customer_id.as_str())
        .set_field(Field::RecurFrequency, payment.frequency.as_str())
        .set_field(Field::RecurStart, payment.start)
        .set_field(Field::RecurCount, payment.total_count)
        .set_field(Field::Amount, payment.amount)
        .set_optional(Field::TransactionType, payment.transaction_type.as_ref())
        .set_optional(Field::Description, payment.description.as_ref())
        .set_optional(Field::RecurReceipt, payment.customer_receipt)
        .set_optional(Field::RecurType, payment.recur_type.as_ref());

    let response = gateway.execute(request).await?;
    recurrence_id(&response)
}

/// Update a recurring payment. Returns the recurrence id.
pub async fn update<T: Transport>(
    gateway: &Gateway<T>,
    recur_id: &str,
    update: &RecurringUpdate,
) -> Result<String, PayTraceError> {
    let mut request = gateway.request_for(methods::UPDATE_RECURRING);
    request
        .set_field(Field::RecurId, recur_id)
        .set_optional(Field::RecurFrequency, update.frequency.as_ref())
        .set_optional(Field::RecurStart, update.start)
        .set_optional(Field::RecurNext, update.next)
        .set_optional(Field::RecurCount, update.total_count)
        .set_optional(Field::Amount, update.amount)
        .set_optional(Field::Description, update.description.as_ref())
        .set_optional(Field::RecurReceipt, update.customer_receipt)
        .set_optional(Field::RecurType, update.recur_type.as_ref());

    let response = gateway.execute(request).await?;
    Ok(response
        .get(Field::RecurId.wire_code())
        .unwrap_or(recur_id)
        .to_string())
}

/// Delete one recurrence, or every recurrence of a customer.
pub async fn delete<T: Transport>(
    gateway: &Gateway<T>,
    target: &RecurringTarget,
) -> Result<Response, PayTraceError> {
    let mut request = gateway.request_for(methods::DELETE_RECURRING);
    target.set_request(&mut request);
    gateway.execute(request).await
}

pub async fn export<T: Transport>(
    gateway: &Gateway<T>,
    target: &RecurringTarget,
) -> Result<Vec<Record>, PayTraceError> {
    let mut request = gateway.request_for(methods::EXPORT_RECURRING);
    target.set_request(&mut request);
    Ok(gateway.execute(request).await?.into_records())
}

fn recurrence_id(response: &Response) -> Result<String, PayTraceError> {
    response
        .get(Field::RecurId.wire_code())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(PayTraceError::MissingResponseField("RECURID"))
}
