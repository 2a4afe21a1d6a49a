use std::io;

use notify_africa::{ApiKey, MessageId, SmsClient};
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
    let message_id = std::env::var("NOTIFY_MESSAGE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NOTIFY_MESSAGE_ID environment variable is required",
        )
    })?;

    let client = SmsClient::new(ApiKey::new(api_key)?)?;
    let response = client.check_status(&MessageId::new(message_id)?).await?;

    println!(
        "status: {}, delivery: {}, sent_at: {:?}, delivered_at: {:?}",
        response.status, response.data.status, response.data.sent_at, response.data.delivered_at
    );

    Ok(())
}
