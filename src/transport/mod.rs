//! Transport layer: JSON wire-format details (serialization/deserialization).

mod email;
mod sms;

pub use email::{decode_send_email_json_response, encode_send_email_json};
pub use sms::{
    decode_check_status_json_response, decode_send_batch_json_response,
    decode_send_single_json_response, encode_send_batch_json, encode_send_single_json,
};

use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains an invalid value: {0}")]
    InvalidValue(#[source] ValidationError),
}
