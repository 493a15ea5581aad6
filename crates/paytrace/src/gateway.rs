//! Gateway dispatcher: encodes a [`Request`], sends it through a
//! [`Transport`], and decodes the reply into an [`Exchange`].

use std::sync::{Arc, Mutex};

use paytrace_protocol::{
    Field, Request, Response, DEFAULT_RECORD_FIELDS, FIELD_DELIMITER, VALUE_DELIMITER,
};

use crate::config::PayTraceConfig;
use crate::error::PayTraceError;
use crate::transport::{HttpTransport, OfflineTransport, Transport};

/// One request/response round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// The encoded request string as sent.
    pub request: String,
    pub response: Response,
}

impl Exchange {
    /// The encoded request with the password value masked.
    pub fn redacted_request(&self) -> String {
        redact_password(&self.request)
    }
}

/// Sink that sees every exchange a [`Gateway`] completes, stubbed or not.
pub trait ExchangeLog: Send + Sync {
    fn record(&self, exchange: &Exchange);
}

/// Emits each exchange as a `debug` event. The password is masked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ExchangeLog for TracingLog {
    fn record(&self, exchange: &Exchange) {
        tracing::debug!(
            request = %exchange.redacted_request(),
            response = %exchange.response.raw(),
            has_errors = exchange.response.has_errors(),
            "gateway exchange"
        );
    }
}

/// Keeps only the most recent exchange.
#[derive(Debug, Default)]
pub struct LastExchange {
    slot: Mutex<Option<Exchange>>,
}

impl LastExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Exchange> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Encoded request of the most recent exchange.
    pub fn request(&self) -> Option<String> {
        self.get().map(|exchange| exchange.request)
    }

    pub fn response(&self) -> Option<Response> {
        self.get().map(|exchange| exchange.response)
    }
}

impl ExchangeLog for LastExchange {
    fn record(&self, exchange: &Exchange) {
        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(exchange.clone());
    }
}

/// Client for the PayTrace gateway.
///
/// Holds no per-call state: every [`send_request`](Gateway::send_request)
/// returns its own [`Exchange`], so a `&Gateway` can be shared freely.
/// Diagnostics go to an optional [`ExchangeLog`].
///
/// In stub mode (see [`set_stub_response`](Gateway::set_stub_response)) the
/// transport is never called and the canned text is decoded instead.
pub struct Gateway<T = HttpTransport> {
    config: PayTraceConfig,
    transport: T,
    stub_response: Option<String>,
    log: Option<Arc<dyn ExchangeLog>>,
}

impl Gateway<HttpTransport> {
    /// Gateway over HTTPS with default client settings.
    pub fn from_config(config: PayTraceConfig) -> Result<Self, PayTraceError> {
        Ok(Self::new(config, HttpTransport::new()?))
    }
}

impl Gateway<OfflineTransport> {
    /// Gateway that answers every request with `raw_response` and never
    /// touches the network.
    pub fn stubbed(config: PayTraceConfig, raw_response: impl Into<String>) -> Self {
        let mut gateway = Self::new(config, OfflineTransport);
        gateway.set_stub_response(Some(raw_response.into()));
        gateway
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(config: PayTraceConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            stub_response: None,
            log: None,
        }
    }

    pub fn with_log(mut self, log: Arc<dyn ExchangeLog>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn config(&self) -> &PayTraceConfig {
        &self.config
    }

    /// A new request carrying this gateway's credentials.
    pub fn request(&self) -> Request {
        Request::new(&self.config.credentials())
    }

    /// A new request with credentials and `METHOD` set.
    pub fn request_for(&self, method: &str) -> Request {
        Request::with_method(&self.config.credentials(), method)
    }

    /// Enable stub mode with `Some(raw)`, disable it with `None`.
    /// The canned response is reused until cleared.
    pub fn set_stub_response(&mut self, raw_response: Option<String>) {
        self.stub_response = raw_response;
    }

    pub fn is_stubbed(&self) -> bool {
        self.stub_response.is_some()
    }

    /// Send a request and decode the reply with the default record fields.
    ///
    /// Business failures come back inside the [`Response`]; only transport
    /// failures are returned as errors.
    pub async fn send_request(&self, request: Request) -> Result<Exchange, PayTraceError> {
        self.send_request_with(request, DEFAULT_RECORD_FIELDS).await
    }

    /// Like [`send_request`](Gateway::send_request), expanding the given
    /// record-list fields.
    pub async fn send_request_with(
        &self,
        request: Request,
        record_fields: &[&str],
    ) -> Result<Exchange, PayTraceError> {
        let encoded = request.encode();
        let method = request.method().unwrap_or("<none>");

        let raw = match &self.stub_response {
            Some(canned) => {
                tracing::debug!(method, "returning stubbed gateway response");
                canned.clone()
            }
            None => {
                let url = self.config.api_url();
                tracing::debug!(method, %url, "dispatching gateway request");
                self.transport.post(&url, &encoded).await?
            }
        };

        let exchange = Exchange {
            request: encoded,
            response: Response::parse_with(&raw, record_fields),
        };

        if let Some(log) = &self.log {
            log.record(&exchange);
        }

        Ok(exchange)
    }

    /// Send a request and fail with [`PayTraceError::Gateway`] if the
    /// gateway reports an error.
    pub async fn execute(&self, request: Request) -> Result<Response, PayTraceError> {
        let exchange = self.send_request(request).await?;
        Ok(exchange.response.into_result()?)
    }

    pub async fn execute_with(
        &self,
        request: Request,
        record_fields: &[&str],
    ) -> Result<Response, PayTraceError> {
        let exchange = self.send_request_with(request, record_fields).await?;
        Ok(exchange.response.into_result()?)
    }
}

fn redact_password(encoded: &str) -> String {
    let password = Field::Password.wire_code();
    encoded
        .split_inclusive(FIELD_DELIMITER)
        .map(|token| match token.split_once(VALUE_DELIMITER) {
            Some((code, _)) if code == password => {
                format!("{code}{VALUE_DELIMITER}[REDACTED]{FIELD_DELIMITER}")
            }
            _ => token.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    /// Records posted bodies and answers with a fixed result.
    struct RecordingTransport {
        reply: Result<String, TransportError>,
        posted: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn replying(reply: Result<String, TransportError>) -> Self {
            Self {
                reply,
                posted: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        async fn post(&self, url: &str, body: &str) -> Result<String, TransportError> {
            self.posted
                .lock()
                .unwrap()
                .push((url.to_string(), body.to_string()));
            self.reply.clone()
        }
    }

    fn config() -> PayTraceConfig {
        PayTraceConfig::new("demo123", "secret").with_domain("stage.paytrace.com")
    }

    #[tokio::test]
    async fn test_send_request_posts_encoded_body() {
        let transport =
            RecordingTransport::replying(Ok("RESPONSE~ok|CUSTOMERID~12345|".to_string()));
        let gateway = Gateway::new(config(), transport);

        let mut request = gateway.request_for("DeleteCustomer");
        request.set_field(Field::CustomerId, "foo_bar");
        let exchange = gateway.send_request(request).await.unwrap();

        assert_eq!(
            exchange.request,
            "UN~demo123|PSWD~secret|TERMS~Y|METHOD~DeleteCustomer|CUSTID~foo_bar|"
        );
        assert_eq!(exchange.response.get("CUSTOMERID"), Some("12345"));

        let posted = gateway.transport.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "https://stage.paytrace.com/api/default.pay");
        assert_eq!(posted[0].1, exchange.request);
    }

    #[tokio::test]
    async fn test_business_error_is_not_a_transport_error() {
        let transport = RecordingTransport::replying(Ok("ERROR~Invalid customer ID|".to_string()));
        let gateway = Gateway::new(config(), transport);

        let exchange = gateway.send_request(gateway.request()).await.unwrap();
        assert!(exchange.response.has_errors());

        let err = gateway.execute(gateway.request()).await.unwrap_err();
        assert!(err.is_gateway_error());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = RecordingTransport::replying(Err(TransportError::Timeout));
        let log = Arc::new(LastExchange::new());
        let gateway = Gateway::new(config(), transport).with_log(log.clone());

        let err = gateway.send_request(gateway.request()).await.unwrap_err();
        assert!(matches!(err, PayTraceError::Transport(TransportError::Timeout)));
        assert!(log.get().is_none());
    }

    #[tokio::test]
    async fn test_stub_mode_skips_transport_and_can_be_toggled() {
        let transport = RecordingTransport::replying(Ok("RESPONSE~ok|FROM~network|".to_string()));
        let mut gateway = Gateway::new(config(), transport);

        gateway.set_stub_response(Some("RESPONSE~ok|FROM~stub|".to_string()));
        assert!(gateway.is_stubbed());
        for _ in 0..2 {
            let exchange = gateway.send_request(gateway.request()).await.unwrap();
            assert_eq!(exchange.response.get("FROM"), Some("stub"));
        }
        assert!(gateway.transport.posted.lock().unwrap().is_empty());

        gateway.set_stub_response(None);
        let exchange = gateway.send_request(gateway.request()).await.unwrap();
        assert_eq!(exchange.response.get("FROM"), Some("network"));
        assert_eq!(gateway.transport.posted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stubbed_gateway_records_last_exchange() {
        let log = Arc::new(LastExchange::new());
        let gateway = Gateway::stubbed(config(), "RESPONSE~ok|CUSTID~john_doe|")
            .with_log(log.clone());

        let exchange = gateway.send_request(gateway.request_for("ExportCustomers")).await.unwrap();

        assert_eq!(log.get(), Some(exchange.clone()));
        assert_eq!(
            log.request().as_deref(),
            Some("UN~demo123|PSWD~secret|TERMS~Y|METHOD~ExportCustomers|")
        );
        assert_eq!(log.response().unwrap().get("CUSTID"), Some("john_doe"));
    }

    #[tokio::test]
    async fn test_offline_gateway_without_stub_fails() {
        let mut gateway = Gateway::stubbed(config(), "RESPONSE~ok|");
        gateway.set_stub_response(None);

        let err = gateway.send_request(gateway.request()).await.unwrap_err();
        assert!(matches!(err, PayTraceError::Transport(TransportError::Offline)));
    }

    #[tokio::test]
    async fn test_custom_record_fields() {
        let gateway = Gateway::stubbed(config(), "BATCHRECORD~BATCHNUMBER=7+|");
        let response = gateway
            .execute_with(gateway.request_for("ExportBatches"), &["BATCHRECORD"])
            .await
            .unwrap();
        assert_eq!(response.records()[0]["BATCHNUMBER"], "7");
    }

    #[test]
    fn test_redact_password() {
        assert_eq!(
            redact_password("UN~demo123|PSWD~secret|TERMS~Y|"),
            "UN~demo123|PSWD~[REDACTED]|TERMS~Y|"
        );
    }
}
