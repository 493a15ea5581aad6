//! Customer profiles stored on the gateway.
//!
//! Field order matters: the gateway tolerates any order, but requests are
//! built in a fixed sequence so they can be compared byte-for-byte.

use indexmap::IndexMap;
use paytrace_protocol::{methods, Field, FieldKey, Record, Request, Response};

use crate::address::{Address, AddressType};
use crate::credit_card::CreditCard;
use crate::error::PayTraceError;
use crate::gateway::Gateway;
use crate::transport::Transport;

/// Optional profile data shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub billing_address: Option<Address>,
    pub shipping_address: Option<Address>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    /// Password for the customer's own portal login.
    pub customer_password: Option<String>,
    /// Checking account number (`DDA`).
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
    /// Merchant-defined fields, sent under their own names.
    pub discretionary_data: IndexMap<String, String>,
}

impl CustomerDetails {
    fn set_addresses(&self, request: &mut Request) {
        if let Some(address) = &self.billing_address {
            address.set_request(AddressType::Billing, request);
        }
        if let Some(address) = &self.shipping_address {
            address.set_request(AddressType::Shipping, request);
        }
    }

    fn set_extras(&self, request: &mut Request) {
        request
            .set_optional(Field::Email, self.email.as_ref())
            .set_optional(Field::Phone, self.phone.as_ref())
            .set_optional(Field::Fax, self.fax.as_ref())
            .set_optional(Field::CustomerPassword, self.customer_password.as_ref())
            .set_optional(Field::AccountNumber, self.account_number.as_ref())
            .set_optional(Field::RoutingNumber, self.routing_number.as_ref());
        for (key, value) in &self.discretionary_data {
            request.set_field(FieldKey::raw(key.as_str()), value);
        }
    }
}

/// Changes applied by [`Customer::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub new_customer_id: Option<String>,
    pub credit_card: Option<CreditCard>,
    pub details: CustomerDetails,
}

/// Filters for [`Customer::export`]. Empty exports every profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerExportFilter {
    pub customer_id: Option<String>,
    pub email: Option<String>,
}

/// A customer profile, identified by its merchant-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: String,
}

impl Customer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create a profile from card details.
    pub async fn from_credit_card<T: Transport>(
        gateway: &Gateway<T>,
        customer_id: &str,
        card: &CreditCard,
        details: &CustomerDetails,
    ) -> Result<Customer, PayTraceError> {
        let mut request = gateway.request_for(methods::CREATE_CUSTOMER);
        request.set_field(Field::CustomerId, customer_id);
        details.set_addresses(&mut request);
        card.set_request(&mut request);
        details.set_extras(&mut request);

        let response = gateway.execute(request).await?;
        Ok(Self::created(customer_id, &response))
    }

    /// Create a profile from the card used in an earlier transaction.
    pub async fn from_transaction_id<T: Transport>(
        gateway: &Gateway<T>,
        customer_id: &str,
        transaction_id: &str,
        details: &CustomerDetails,
    ) -> Result<Customer, PayTraceError> {
        let mut request = gateway.request_for(methods::CREATE_CUSTOMER);
        request
            .set_field(Field::CustomerId, customer_id)
            .set_field(Field::TransactionId, transaction_id);
        details.set_addresses(&mut request);
        details.set_extras(&mut request);

        let response = gateway.execute(request).await?;
        Ok(Self::created(customer_id, &response))
    }

    // The gateway echoes the id back as CUSTID.
    fn created(requested_id: &str, response: &Response) -> Customer {
        let id = response
            .get(Field::CustomerId.wire_code())
            .filter(|id| !id.is_empty())
            .unwrap_or(requested_id);
        tracing::debug!(customer_id = %id, "customer profile created");
        Customer::new(id)
    }

    /// Update this profile. A new id, if given, takes effect on success.
    pub async fn update<T: Transport>(
        &mut self,
        gateway: &Gateway<T>,
        update: &CustomerUpdate,
    ) -> Result<Response, PayTraceError> {
        let mut request = gateway.request_for(methods::UPDATE_CUSTOMER);
        request
            .set_field(Field::CustomerId, self.id.as_str())
            .set_optional(Field::NewCustomerId, update.new_customer_id.as_ref());
        update.details.set_addresses(&mut request);
        if let Some(card) = &update.credit_card {
            card.set_request(&mut request);
        }
        update.details.set_extras(&mut request);

        let response = gateway.execute(request).await?;
        if let Some(new_id) = &update.new_customer_id {
            self.id = new_id.clone();
        }
        Ok(response)
    }

    pub async fn delete<T: Transport>(&self, gateway: &Gateway<T>) -> Result<Response, PayTraceError> {
        Self::delete_by_id(gateway, &self.id).await
    }

    pub async fn delete_by_id<T: Transport>(
        gateway: &Gateway<T>,
        customer_id: &str,
    ) -> Result<Response, PayTraceError> {
        let mut request = gateway.request_for(methods::DELETE_CUSTOMER);
        request.set_field(Field::CustomerId, customer_id);
        gateway.execute(request).await
    }

    /// Export customer profiles as records.
    pub async fn export<T: Transport>(
        gateway: &Gateway<T>,
        filter: &CustomerExportFilter,
    ) -> Result<Vec<Record>, PayTraceError> {
        let mut request = gateway.request_for(methods::EXPORT_CUSTOMERS);
        request
            .set_optional(Field::CustomerId, filter.customer_id.as_ref())
            .set_optional(Field::Email, filter.email.as_ref());
        Ok(gateway.execute(request).await?.into_records())
    }

    /// Export profiles with no activity in the last `days_inactive` days.
    pub async fn export_inactive<T: Transport>(
        gateway: &Gateway<T>,
        days_inactive: u32,
    ) -> Result<Vec<Record>, PayTraceError> {
        let mut request = gateway.request_for(methods::EXPORT_INACTIVE_CUSTOMERS);
        request.set_field(Field::DaysInactive, days_inactive);
        Ok(gateway.execute(request).await?.into_records())
    }
}
