use std::sync::Arc;

use chrono::NaiveDate;
use paytrace::{
    batch, send_receipt, transaction, Customer, CustomerExportFilter, Gateway, HttpTransport,
    PayTraceConfig, PayTraceError, ReceiptSource, ShippingQuoteRequest, TracingLog,
};
use paytrace_protocol::value::DATE_FORMAT;
use rust_decimal::Decimal;

const USAGE: &str = "usage: paytrace-cli <command> [args]

commands:
  export-customers
  export-inactive <days>
  delete-customer <customer-id>
  email-receipt <transaction-id> <email>
  void-transaction <transaction-id>
  export-batches <MM/DD/YYYY> <MM/DD/YYYY>
  calculate-shipping <source-zip> <source-state> <dest-zip> <dest-state> <weight> <shippers>

environment:
  PAYTRACE_USER_NAME, PAYTRACE_PASSWORD   account credentials (required)
  PAYTRACE_DOMAIN                         gateway host (default: paytrace.com)
  PAYTRACE_STUB_RESPONSE                  answer with this text instead of calling the gateway";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        println!("{USAGE}");
        return;
    }

    if let Err(e) = run(&args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), CliError> {
    let config = PayTraceConfig::from_env().map_err(PayTraceError::from)?;
    tracing::info!(domain = %config.domain, user = %config.user_name, "loaded configuration");

    let transport = HttpTransport::new().map_err(PayTraceError::from)?;
    let mut gateway = Gateway::new(config, transport).with_log(Arc::new(TracingLog));
    if let Some(stub) = std::env::var("PAYTRACE_STUB_RESPONSE").ok().filter(|s| !s.is_empty()) {
        tracing::info!("stub mode enabled, no requests will reach the gateway");
        gateway.set_stub_response(Some(stub));
    }

    let output = match (args[0].as_str(), &args[1..]) {
        ("export-customers", []) => {
            let records = Customer::export(&gateway, &CustomerExportFilter::default()).await?;
            serde_json::to_value(records)?
        }
        ("export-inactive", [days]) => {
            let days: u32 = days
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid day count: {days}")))?;
            serde_json::to_value(Customer::export_inactive(&gateway, days).await?)?
        }
        ("delete-customer", [customer_id]) => {
            let response = Customer::delete_by_id(&gateway, customer_id).await?;
            serde_json::to_value(response)?
        }
        ("email-receipt", [transaction_id, email]) => {
            let source = ReceiptSource::Transaction(transaction_id.clone());
            serde_json::to_value(send_receipt(&gateway, &source, email).await?)?
        }
        ("void-transaction", [transaction_id]) => {
            serde_json::to_value(transaction::void(&gateway, transaction_id).await?)?
        }
        ("export-batches", [start, end]) => {
            let values = batch::export_multiple(&gateway, parse_date(start)?, parse_date(end)?).await?;
            serde_json::to_value(values)?
        }
        (
            "calculate-shipping",
            [source_zip, source_state, destination_zip, destination_state, weight, shippers],
        ) => {
            let quote = ShippingQuoteRequest {
                source_zip: source_zip.clone(),
                source_state: source_state.clone(),
                destination_zip: destination_zip.clone(),
                destination_state: destination_state.clone(),
                destination_country: None,
                weight: weight
                    .parse::<Decimal>()
                    .map_err(|_| CliError::Usage(format!("invalid weight: {weight}")))?,
                shippers: shippers.split(',').map(|s| s.trim().to_string()).collect(),
            };
            serde_json::to_value(transaction::calculate_shipping(&gateway, &quote).await?)?
        }
        _ => return Err(CliError::Usage(USAGE.to_string())),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| CliError::Usage(format!("invalid date {s}: {e}")))
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    PayTrace(#[from] PayTraceError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
