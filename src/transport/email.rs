use serde::{Deserialize, Serialize};

use super::TransportError;
use crate::domain::{EmailAddress, EmailResponse, SendEmail};

#[derive(Debug, Serialize)]
struct SendEmailPayload<'a> {
    sender: &'a str,
    subject: &'a str,
    body: &'a str,
    recipients: Vec<&'a str>,
}

// Missing fields decode to their zero values, matching what the API has been observed to send.
#[derive(Debug, Deserialize)]
struct SendEmailJsonResponse {
    #[serde(default)]
    message: String,
    #[serde(default)]
    success: bool,
}

pub fn encode_send_email_json(request: &SendEmail) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SendEmailPayload {
        sender: request.sender().as_str(),
        subject: request.subject(),
        body: request.body(),
        recipients: request
            .recipients()
            .iter()
            .map(EmailAddress::as_str)
            .collect(),
    })
}

pub fn decode_send_email_json_response(json: &str) -> Result<EmailResponse, TransportError> {
    let parsed: SendEmailJsonResponse = serde_json::from_str(json)?;
    Ok(EmailResponse {
        message: parsed.message,
        success: parsed.success,
    })
}
