//! Typed Rust client for the Notify Africa SMS and Email HTTP API.
//!
//! The crate is layered: a domain layer of strong types, a transport layer for
//! the JSON wire format, and a small client layer issuing the requests.
//!
//! ```rust,no_run
//! use notify_africa::{
//!     ApiKey, MessageText, NotifyError, RawPhoneNumber, SendSingleSms, SenderId, SmsClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), NotifyError> {
//!     let client = SmsClient::new(ApiKey::new("...")?)?;
//!     let request = SendSingleSms::new(
//!         RawPhoneNumber::new("255765432100")?,
//!         MessageText::new("Hello")?,
//!         SenderId::new("137")?,
//!     );
//!     let response = client.send_single(request).await?;
//!     println!("queued as {}", response.data.message_id.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClientConfig, DEFAULT_EMAIL_BASE_URL, DEFAULT_SMS_BASE_URL, EmailClient, EmailClientBuilder,
    NotifyClient, NotifyError, RequestContext, SmsClient, SmsClientBuilder,
};
pub use domain::{
    ApiKey, BatchSummary, DeliveryStatus, EmailAddress, EmailResponse, MessageId, MessageText,
    PhoneNumber, RawPhoneNumber, SendBatchSms, SendEmail, SendSingleSms, SenderId, SentSms,
    SmsResponse, ValidationError,
};
pub use tokio_util::sync::CancellationToken;
