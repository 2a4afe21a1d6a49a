use serde::{Deserialize, Serialize};

use super::TransportError;
use crate::domain::{
    BatchSummary, DeliveryStatus, MessageId, RawPhoneNumber, SendBatchSms, SendSingleSms, SentSms,
    SmsResponse,
};

#[derive(Debug, Serialize)]
struct SendSinglePayload<'a> {
    phone_number: &'a str,
    message: &'a str,
    sender_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SendBatchPayload<'a> {
    phone_numbers: Vec<&'a str>,
    message: &'a str,
    sender_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct SmsJsonEnvelope<T> {
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    path: Option<String>,
    data: T,
}

impl<T> SmsJsonEnvelope<T> {
    fn map_data<U>(
        self,
        f: impl FnOnce(T) -> Result<U, TransportError>,
    ) -> Result<SmsResponse<U>, TransportError> {
        Ok(SmsResponse {
            status: self.status,
            message: self.message,
            timestamp: self.timestamp,
            path: self.path,
            data: f(self.data)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SentSmsJson {
    message_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummaryJson {
    message_count: u64,
    credits_deducted: i64,
    remaining_balance: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryStatusJson {
    message_id: String,
    status: String,
    #[serde(default)]
    sent_at: Option<String>,
    #[serde(default)]
    delivered_at: Option<String>,
}

pub fn encode_send_single_json(request: &SendSingleSms) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SendSinglePayload {
        phone_number: request.phone_number().raw(),
        message: request.message().as_str(),
        sender_id: request.sender_id().as_str(),
    })
}

pub fn encode_send_batch_json(request: &SendBatchSms) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SendBatchPayload {
        phone_numbers: request
            .phone_numbers()
            .iter()
            .map(RawPhoneNumber::raw)
            .collect(),
        message: request.message().as_str(),
        sender_id: request.sender_id().as_str(),
    })
}

pub fn decode_send_single_json_response(
    json: &str,
) -> Result<SmsResponse<SentSms>, TransportError> {
    let parsed: SmsJsonEnvelope<SentSmsJson> = serde_json::from_str(json)?;
    parsed.map_data(|data| {
        Ok(SentSms {
            message_id: parse_message_id(data.message_id)?,
            status: data.status,
        })
    })
}

pub fn decode_send_batch_json_response(
    json: &str,
) -> Result<SmsResponse<BatchSummary>, TransportError> {
    let parsed: SmsJsonEnvelope<BatchSummaryJson> = serde_json::from_str(json)?;
    parsed.map_data(|data| {
        Ok(BatchSummary {
            message_count: data.message_count,
            credits_deducted: data.credits_deducted,
            remaining_balance: data.remaining_balance,
        })
    })
}

pub fn decode_check_status_json_response(
    json: &str,
) -> Result<SmsResponse<DeliveryStatus>, TransportError> {
    let parsed: SmsJsonEnvelope<DeliveryStatusJson> = serde_json::from_str(json)?;
    parsed.map_data(|data| {
        Ok(DeliveryStatus {
            message_id: parse_message_id(data.message_id)?,
            status: data.status,
            sent_at: data.sent_at,
            delivered_at: data.delivered_at,
        })
    })
}

fn parse_message_id(raw: String) -> Result<MessageId, TransportError> {
    MessageId::new(raw).map_err(TransportError::InvalidValue)
}
