use std::io;

use notify_africa::{
    CancellationToken, ClientConfig, EmailAddress, NotifyClient, RequestContext, SendEmail,
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

    let mut config = ClientConfig::new(required_env("SMS_APIKEY")?, required_env("EMAIL_APIKEY")?);
    config.base_url = std::env::var("NOTIFY_AFRICA_BASE_URL").ok();
    let client = NotifyClient::new(config)?;

    let sender = EmailAddress::new(required_env("NOTIFY_EMAIL_FROM")?)?;
    let recipients = required_env("NOTIFY_EMAIL_TO")?
        .split(',')
        .map(EmailAddress::new)
        .collect::<Result<Vec<_>, _>>()?;

    // Ctrl-C aborts the in-flight request.
    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let response = client
        .email()
        .send_with_context(
            SendEmail::new(sender, "Subject", "Body text", recipients),
            &RequestContext::new().with_cancellation(token),
        )
        .await?;

    println!("message: {}, success: {}", response.message, response.success);

    Ok(())
}
