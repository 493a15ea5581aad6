//! Field dictionary: semantic field names and the gateway's wire codes.
//!
//! Known fields form a closed enum so a misspelled field is a compile error.
//! Codes the dictionary does not know (discretionary data, undocumented
//! gateway fields) go through [`FieldKey::Raw`] unchanged.

use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;
use crate::value::FieldKind;

macro_rules! field_dictionary {
    ($($(#[$meta:meta])* $variant:ident => $name:literal, $code:literal, $kind:ident;)+) => {
        /// A field known to the gateway.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Field {
            $($(#[$meta])* $variant,)+
        }

        impl Field {
            /// Every entry in the dictionary.
            pub const ALL: &'static [Field] = &[$(Field::$variant,)+];

            /// Semantic snake_case name, e.g. `billing_city`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)+
                }
            }

            /// Code sent on the wire, e.g. `BCITY`.
            pub const fn wire_code(self) -> &'static str {
                match self {
                    $(Field::$variant => $code,)+
                }
            }

            /// Kind of value the gateway expects in this field.
            pub const fn kind(self) -> FieldKind {
                match self {
                    $(Field::$variant => FieldKind::$kind,)+
                }
            }
        }
    };
}

field_dictionary! {
    Method => "method", "METHOD", Text;
    UserName => "user_name", "UN", Text;
    Password => "password", "PSWD", Text;
    Terms => "terms", "TERMS", Text;

    TransactionType => "transaction_type", "TRANXTYPE", Text;
    TransactionId => "transaction_id", "TRANXID", Text;
    Amount => "amount", "AMOUNT", Decimal;
    CardNumber => "card_number", "CC", Text;
    ExpirationMonth => "expiration_month", "EXPMNTH", Integer;
    ExpirationYear => "expiration_year", "EXPYR", Integer;
    /// Card security code.
    Csc => "csc", "CSC", Text;
    /// Raw magnetic stripe data.
    Swipe => "swipe", "SWIPE", Text;

    BillingName => "billing_name", "BNAME", Text;
    BillingAddress => "billing_address", "BADDRESS", Text;
    BillingAddress2 => "billing_address2", "BADDRESS2", Text;
    BillingCity => "billing_city", "BCITY", Text;
    BillingState => "billing_state", "BSTATE", Text;
    BillingPostalCode => "billing_postal_code", "BZIP", Text;
    BillingCountry => "billing_country", "BCOUNTRY", Text;

    ShippingName => "shipping_name", "SNAME", Text;
    ShippingAddress => "shipping_address", "SADDRESS", Text;
    ShippingAddress2 => "shipping_address2", "SADDRESS2", Text;
    ShippingCity => "shipping_city", "SCITY", Text;
    /// County or region. Only shipping addresses carry one.
    ShippingRegion => "shipping_region", "SCOUNTY", Text;
    ShippingState => "shipping_state", "SSTATE", Text;
    ShippingPostalCode => "shipping_postal_code", "SZIP", Text;
    ShippingCountry => "shipping_country", "SCOUNTRY", Text;

    CustomerId => "customer_id", "CUSTID", Text;
    NewCustomerId => "new_customer_id", "NEWCUSTID", Text;
    CustomerPassword => "customer_password", "CUSTPSWD", Text;
    /// Checking account number.
    AccountNumber => "account_number", "DDA", Text;
    RoutingNumber => "routing_number", "TR", Text;
    Email => "email", "EMAIL", Text;
    Phone => "phone", "PHONE", Text;
    Fax => "fax", "FAX", Text;

    Description => "description", "DESCRIPTION", Text;
    TaxAmount => "tax_amount", "TAX", Decimal;
    Invoice => "invoice", "INVOICE", Text;
    CustomerReferenceId => "customer_reference_id", "CUSTREF", Text;
    ApprovalCode => "approval_code", "APPROVAL", Text;
    ReturnClr => "return_clr", "RETURNCLR", Flag;
    CustomDba => "custom_dba", "CUSTOMDBA", Text;
    EnablePartialAuthentication => "enable_partial_authentication", "ENABLEPARTIALAUTH", Flag;
    ReturnBin => "return_bin", "RETURNBIN", Flag;

    StartDate => "start_date", "SDATE", Date;
    EndDate => "end_date", "EDATE", Date;
    User => "user", "USER", Text;
    SearchText => "search_text", "SEARCHTEXT", Text;
    CheckId => "check_id", "CHECKID", Text;
    DaysInactive => "days_inactive", "DAYS", Integer;
    BatchNumber => "batch_number", "BATCHNUMBER", Text;

    RecurId => "recur_id", "RECURID", Text;
    RecurFrequency => "recur_frequency", "FREQUENCY", Text;
    RecurStart => "recur_start", "START", Date;
    RecurNext => "recur_next", "NEXT", Date;
    RecurCount => "recur_count", "TOTALCOUNT", Integer;
    RecurReceipt => "recur_receipt", "CUSTRECEIPT", Flag;
    RecurType => "recur_type", "RECURTYPE", Text;

    SourceZip => "source_zip", "SOURCEZIP", Text;
    SourceState => "source_state", "SOURCESTATE", Text;
    ShippingWeight => "shipping_weight", "WEIGHT", Decimal;
    Shippers => "shippers", "SHIPPERS", Text;
}

impl Field {
    /// Look up a field by its semantic name.
    pub fn from_name(name: &str) -> Result<Field, ProtocolError> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| ProtocolError::UnknownField(name.to_string()))
    }
}

impl FromStr for Field {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key of a request field: a dictionary entry or a verbatim wire code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Known(Field),
    /// Sent as-is. Used for discretionary data such as `hair_color`.
    Raw(String),
}

impl FieldKey {
    pub fn raw(code: impl Into<String>) -> Self {
        FieldKey::Raw(code.into())
    }

    pub fn wire_code(&self) -> &str {
        match self {
            FieldKey::Known(field) => field.wire_code(),
            FieldKey::Raw(code) => code,
        }
    }
}

impl From<Field> for FieldKey {
    fn from(field: Field) -> Self {
        FieldKey::Known(field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Field::from_name("customer_id").unwrap(), Field::CustomerId);
        assert_eq!(Field::from_name("billing_city").unwrap().wire_code(), "BCITY");
        assert_eq!(Field::from_name("method").unwrap().wire_code(), "METHOD");
        assert_eq!("shipping_region".parse::<Field>().unwrap(), Field::ShippingRegion);
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = Field::from_name("favourite_colour").unwrap_err();
        assert_eq!(err, ProtocolError::UnknownField("favourite_colour".to_string()));
    }

    #[test]
    fn test_names_and_codes_are_unique() {
        let names: HashSet<_> = Field::ALL.iter().map(|f| f.name()).collect();
        let codes: HashSet<_> = Field::ALL.iter().map(|f| f.wire_code()).collect();
        assert_eq!(names.len(), Field::ALL.len());
        assert_eq!(codes.len(), Field::ALL.len());
    }

    #[test]
    fn test_every_name_round_trips() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()).unwrap(), *field);
        }
    }

    #[test]
    fn test_declared_kinds() {
        assert_eq!(Field::Amount.kind(), FieldKind::Decimal);
        assert_eq!(Field::ExpirationYear.kind(), FieldKind::Integer);
        assert_eq!(Field::RecurStart.kind(), FieldKind::Date);
        assert_eq!(Field::RecurReceipt.kind(), FieldKind::Flag);
        assert_eq!(Field::CustomerId.kind(), FieldKind::Text);
    }

    #[test]
    fn test_raw_key_keeps_code_verbatim() {
        let key = FieldKey::raw("hair_color");
        assert_eq!(key.wire_code(), "hair_color");
        assert_eq!(FieldKey::from(Field::Phone).to_string(), "PHONE");
    }
}
