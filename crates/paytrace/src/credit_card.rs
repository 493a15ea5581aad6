use std::fmt;

use paytrace_protocol::{Field, Request};

/// Card details for customer profiles and transactions.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub card_number: String,
    pub expiration_month: u32,
    pub expiration_year: u32,
    /// Security code (CVV/CSC).
    pub csc: Option<String>,
    /// Magnetic stripe data for card-present transactions.
    pub swipe: Option<String>,
}

impl CreditCard {
    pub fn new(card_number: impl Into<String>, expiration_month: u32, expiration_year: u32) -> Self {
        Self {
            card_number: card_number.into(),
            expiration_month,
            expiration_year,
            csc: None,
            swipe: None,
        }
    }

    pub fn with_csc(mut self, csc: impl Into<String>) -> Self {
        self.csc = Some(csc.into());
        self
    }

    pub fn set_request(&self, request: &mut Request) {
        request
            .set_field(Field::CardNumber, self.card_number.as_str())
            .set_field(Field::ExpirationMonth, self.expiration_month)
            .set_field(Field::ExpirationYear, self.expiration_year)
            .set_optional(Field::Csc, self.csc.as_ref())
            .set_optional(Field::Swipe, self.swipe.as_ref());
    }

    /// Card number with all but the last four digits masked.
    pub fn masked_number(&self) -> String {
        let digits = self.card_number.chars().count();
        let visible = digits.min(4);
        let mut masked = "*".repeat(digits - visible);
        masked.extend(self.card_number.chars().skip(digits - visible));
        masked
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("card_number", &self.masked_number())
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("csc", &self.csc.as_ref().map(|_| "[REDACTED]"))
            .field("swipe", &self.swipe.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paytrace_protocol::Credentials;

    #[test]
    fn test_card_fields_in_order() {
        let mut request = Request::new(&Credentials::new("u", "p"));
        CreditCard::new("1234123412341234", 12, 2014)
            .with_csc("999")
            .set_request(&mut request);

        assert_eq!(
            request.encode(),
            "UN~u|PSWD~p|TERMS~Y|CC~1234123412341234|EXPMNTH~12|EXPYR~2014|CSC~999|"
        );
    }

    #[test]
    fn test_debug_masks_card_data() {
        let card = CreditCard::new("4111111111111111", 12, 2014).with_csc("123");
        let debug = format!("{card:?}");
        assert!(debug.contains("************1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_masked_number_short_input() {
        assert_eq!(CreditCard::new("12", 1, 2020).masked_number(), "12");
    }
}
