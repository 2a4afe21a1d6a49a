use std::io;

use notify_africa::{
    ApiKey, MessageText, PhoneNumber, RawPhoneNumber, SendBatchSms, SenderId, SmsClient,
};
use phonenumber::country;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("SMS_APIKEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS_APIKEY environment variable is required",
        )
    })?;
    let phones_raw = std::env::var("NOTIFY_PHONES").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_PHONES environment variable is required (comma-separated numbers)",
        )
    })?;

    // Local numbers like 0765432100 are normalized against Tanzania.
    let phones = phones_raw
        .split(',')
        .map(|raw| PhoneNumber::parse(Some(country::Id::TZ), raw).map(RawPhoneNumber::from))
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = SmsClient::builder(ApiKey::new(api_key)?);
    if let Ok(base_url) = std::env::var("NOTIFY_AFRICA_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let request = SendBatchSms::new(
        phones,
        MessageText::new("Batch test message")?,
        SenderId::new(std::env::var("NOTIFY_SENDER_ID").unwrap_or_else(|_| "137".to_owned()))?,
    );
    let response = client.send_batch(request).await?;

    println!(
        "status: {}, messages: {}, credits deducted: {}, remaining balance: {}",
        response.status,
        response.data.message_count,
        response.data.credits_deducted,
        response.data.remaining_balance
    );

    Ok(())
}
