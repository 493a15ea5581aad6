//! Settlement batch exports.

use chrono::NaiveDate;
use paytrace_protocol::{methods, Field, Response, Values};

use crate::error::PayTraceError;
use crate::gateway::Gateway;
use crate::transport::Transport;

/// Summary of one batch, or of the pending batch when `batch_number` is
/// `None`.
pub async fn export_single<T: Transport>(
    gateway: &Gateway<T>,
    batch_number: Option<&str>,
) -> Result<Values, PayTraceError> {
    let mut request = gateway.request_for(methods::EXPORT_BATCH);
    request.set_optional(Field::BatchNumber, batch_number);
    Ok(gateway.execute(request).await?.into_values())
}

/// Summaries of every batch settled between two dates, inclusive.
pub async fn export_multiple<T: Transport>(
    gateway: &Gateway<T>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Values, PayTraceError> {
    let mut request = gateway.request_for(methods::EXPORT_BATCHES);
    request
        .set_field(Field::StartDate, start_date)
        .set_field(Field::EndDate, end_date);
    Ok(gateway.execute(request).await?.into_values())
}

/// Transactions in a batch. Summary fields are in
/// [`values`](Response::values), transactions in [`records`](Response::records).
pub async fn export_details<T: Transport>(
    gateway: &Gateway<T>,
    batch_number: &str,
) -> Result<Response, PayTraceError> {
    let mut request = gateway.request_for(methods::EXPORT_BATCH_DETAILS);
    request.set_field(Field::BatchNumber, batch_number);
    gateway.execute(request).await
}
