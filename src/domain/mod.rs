//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SendBatchSms, SendEmail, SendSingleSms};
pub use response::{BatchSummary, DeliveryStatus, EmailResponse, SentSms, SmsResponse};
pub use validation::ValidationError;
pub use value::{
    ApiKey, EmailAddress, MessageId, MessageText, PhoneNumber, RawPhoneNumber, SenderId,
};
