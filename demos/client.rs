//! Example FiberPay client.
//!
//! Creates a split order on the test environment, adds one payout to it,
//! closes its definition and reads it back.
//!
//! Run with:
//! ```bash
//! cargo run --example client
//! ```
//!
//! Environment variables (a `.env` file works too):
//! - FIBERPAY_API_KEY: API key
//! - FIBERPAY_API_SECRET: API secret
//! - FIBERPAY_TEST: set to `false` to use production (defaults to the test API)
//! - FIBERPAY_CALLBACK_URL: optional webhook for the payout

use anyhow::Context;
use fiberpay_rs::{Callback, FiberPayClient, DEFAULT_CURRENCY};
use rust_decimal::Decimal;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let api_key = std::env::var("FIBERPAY_API_KEY").context("FIBERPAY_API_KEY is not set")?;
    let api_secret =
        std::env::var("FIBERPAY_API_SECRET").context("FIBERPAY_API_SECRET is not set")?;
    let use_test = std::env::var("FIBERPAY_TEST")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);
    let callback = std::env::var("FIBERPAY_CALLBACK_URL")
        .ok()
        .map(|url| Callback::new(url).with_params(json!({"source": "demo"})));

    let client = FiberPayClient::new(api_key, api_secret, use_test);
    println!("FiberPay demo against {}", client.base_url());

    let created = client.create_split(DEFAULT_CURRENCY).await?;
    let order_code = order_code(&created)?;
    println!("Created split order {}", order_code);

    let item = client
        .add_split_item(
            &order_code,
            "Jan Kowalski",
            "PL61109010140000071219812874",
            "Demo payout",
            Decimal::new(1000, 2),
            DEFAULT_CURRENCY,
            callback,
        )
        .await?;
    println!("Added item: {}", item);

    client.end_definition_of_split(&order_code).await?;

    match client.get_split(&order_code).await {
        Ok(body) => {
            let json: Value = serde_json::from_str(&body)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(e) if e.is_unauthorized() => {
            eprintln!("Credentials rejected: {}", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn order_code(response: &str) -> anyhow::Result<String> {
    let json: Value = serde_json::from_str(response)?;
    json["data"]["code"]
        .as_str()
        .map(str::to_string)
        .context("response carries no order code")
}
