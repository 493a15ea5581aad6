/// Separates whole `CODE~value` fields in requests and responses.
pub const FIELD_DELIMITER: char = '|';

/// Separates a field's wire code from its value.
pub const VALUE_DELIMITER: char = '~';

/// Separates `key=value` pairs inside a nested record field.
pub const RECORD_DELIMITER: char = '+';

/// Separates a nested record's sub-key from its sub-value.
pub const RECORD_VALUE_DELIMITER: char = '=';

/// Value sent in the `TERMS` field on every request.
pub const TERMS_ACCEPTED: &str = "Y";

/// Response field carrying a business error message.
pub const ERROR_FIELD: &str = "ERROR";

/// Response field carrying the gateway's status text.
pub const RESPONSE_FIELD: &str = "RESPONSE";

/// `RESPONSE` value meaning success. Compared case-insensitively.
pub const SUCCESS_TOKEN: &str = "ok";

/// Exported customer profiles.
pub const CUSTOMER_RECORD: &str = "CUSTOMERRECORD";

/// Exported transactions (also returned by batch detail exports).
pub const TRANSACTION_RECORD: &str = "TRANSACTIONRECORD";

/// Exported recurring payments.
pub const RECURRING_RECORD: &str = "RECURRINGPAYMENT";

/// Shipping quotes returned by `CalculateShipping`.
pub const SHIPPING_RECORD: &str = "SHIPPINGRECORD";

/// Record-list fields expanded by [`Response::parse`](crate::Response::parse).
pub const DEFAULT_RECORD_FIELDS: &[&str] = &[
    CUSTOMER_RECORD,
    TRANSACTION_RECORD,
    RECURRING_RECORD,
    SHIPPING_RECORD,
];

/// Values for the `METHOD` field. The encoder treats them as plain text.
pub mod methods {
    pub const CREATE_CUSTOMER: &str = "CreateCustomer";
    pub const UPDATE_CUSTOMER: &str = "UpdateCustomer";
    pub const DELETE_CUSTOMER: &str = "DeleteCustomer";
    pub const EXPORT_CUSTOMERS: &str = "ExportCustomers";
    pub const EXPORT_INACTIVE_CUSTOMERS: &str = "ExportInactiveCustomers";

    pub const EXPORT_BATCH: &str = "ExportBatch";
    pub const EXPORT_BATCHES: &str = "ExportBatches";
    pub const EXPORT_BATCH_DETAILS: &str = "ExportBatchDetails";

    pub const EMAIL_RECEIPT: &str = "EmailReceipt";

    pub const PROCESS_TRANSACTION: &str = "PROCESSTRANX";
    pub const EXPORT_TRANSACTIONS: &str = "ExportTranx";
    pub const CALCULATE_SHIPPING: &str = "CalculateShipping";

    pub const CREATE_RECURRING: &str = "CreateRecur";
    pub const UPDATE_RECURRING: &str = "UpdateRecur";
    pub const DELETE_RECURRING: &str = "DeleteRecur";
    pub const EXPORT_RECURRING: &str = "ExportRecur";
}
