use paytrace_protocol::{Field, Request};

/// Which set of address fields to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    Billing,
    Shipping,
}

/// A postal address attached to a customer or transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    /// County or region. Sent for shipping addresses only.
    pub region: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Address with only a name, the minimum the gateway accepts.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Write the populated fields as billing or shipping fields.
    pub fn set_request(&self, kind: AddressType, request: &mut Request) {
        match kind {
            AddressType::Billing => {
                request
                    .set_optional(Field::BillingName, self.name.as_ref())
                    .set_optional(Field::BillingAddress, self.street.as_ref())
                    .set_optional(Field::BillingAddress2, self.street2.as_ref())
                    .set_optional(Field::BillingCity, self.city.as_ref())
                    .set_optional(Field::BillingState, self.state.as_ref())
                    .set_optional(Field::BillingPostalCode, self.postal_code.as_ref())
                    .set_optional(Field::BillingCountry, self.country.as_ref());
            }
            AddressType::Shipping => {
                request
                    .set_optional(Field::ShippingName, self.name.as_ref())
                    .set_optional(Field::ShippingAddress, self.street.as_ref())
                    .set_optional(Field::ShippingAddress2, self.street2.as_ref())
                    .set_optional(Field::ShippingCity, self.city.as_ref())
                    .set_optional(Field::ShippingRegion, self.region.as_ref())
                    .set_optional(Field::ShippingState, self.state.as_ref())
                    .set_optional(Field::ShippingPostalCode, self.postal_code.as_ref())
                    .set_optional(Field::ShippingCountry, self.country.as_ref());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paytrace_protocol::Credentials;

    fn full_address() -> Address {
        Address {
            name: Some("Foo Bar".to_string()),
            street: Some("1234 Main Street".to_string()),
            street2: Some("Apartment 1B".to_string()),
            city: Some("Shoreline".to_string()),
            region: Some("Snohomish".to_string()),
            state: Some("WA".to_string()),
            postal_code: Some("98133".to_string()),
            country: Some("USA".to_string()),
        }
    }

    fn encode(kind: AddressType, address: &Address) -> String {
        let mut request = Request::new(&Credentials::new("u", "p"));
        address.set_request(kind, &mut request);
        request.encode()
    }

    #[test]
    fn test_billing_fields_skip_region() {
        assert_eq!(
            encode(AddressType::Billing, &full_address()),
            "UN~u|PSWD~p|TERMS~Y|BNAME~Foo Bar|BADDRESS~1234 Main Street|BADDRESS2~Apartment 1B|\
             BCITY~Shoreline|BSTATE~WA|BZIP~98133|BCOUNTRY~USA|"
        );
    }

    #[test]
    fn test_shipping_fields_include_region() {
        assert_eq!(
            encode(AddressType::Shipping, &full_address()),
            "UN~u|PSWD~p|TERMS~Y|SNAME~Foo Bar|SADDRESS~1234 Main Street|SADDRESS2~Apartment 1B|\
             SCITY~Shoreline|SCOUNTY~Snohomish|SSTATE~WA|SZIP~98133|SCOUNTRY~USA|"
        );
    }

    #[test]
    fn test_missing_parts_are_omitted() {
        assert_eq!(
            encode(AddressType::Billing, &Address::named("Foo Bar")),
            "UN~u|PSWD~p|TERMS~Y|BNAME~Foo Bar|"
        );
    }
}
