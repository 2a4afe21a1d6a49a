use std::io;
use std::time::Duration;

use notify_africa::{
    ApiKey, MessageText, RawPhoneNumber, RequestContext, SendSingleSms, SenderId, SmsClient,
};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut builder = SmsClient::builder(ApiKey::new(required_env("SMS_APIKEY")?)?);
    if let Ok(base_url) = std::env::var("NOTIFY_AFRICA_BASE_URL") {
        builder = builder.base_url(base_url);
    }
    let client = builder.build()?;

    let phone = RawPhoneNumber::new(required_env("NOTIFY_PHONE")?)?;
    let sender =
        SenderId::new(std::env::var("NOTIFY_SENDER_ID").unwrap_or_else(|_| "137".to_owned()))?;
    let text = MessageText::new(
        std::env::var("NOTIFY_MESSAGE").unwrap_or_else(|_| "Hello from Notify Africa!".to_owned()),
    )?;

    let ctx = RequestContext::new().with_timeout(Duration::from_secs(10));
    let response = client
        .send_single_with_context(SendSingleSms::new(phone, text, sender), &ctx)
        .await?;

    println!(
        "status: {}, message: {:?}, message_id: {}, delivery: {}",
        response.status,
        response.message,
        response.data.message_id.as_str(),
        response.data.status
    );

    Ok(())
}
