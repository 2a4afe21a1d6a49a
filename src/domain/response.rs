use crate::domain::value::MessageId;

/// Envelope shared by the SMS endpoints.
///
/// `message`, `timestamp` and `path` are optional because the provider omits
/// them on some responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsResponse<T> {
    pub status: i64,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub path: Option<String>,
    pub data: T,
}

/// Data of `messages/send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub message_id: MessageId,
    pub status: String,
}

/// Data of `messages/batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub message_count: u64,
    pub credits_deducted: i64,
    pub remaining_balance: i64,
}

/// Data of `messages/status/{id}`.
///
/// Timestamps are kept exactly as the provider formats them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub message_id: MessageId,
    pub status: String,
    pub sent_at: Option<String>,
    pub delivered_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailResponse {
    pub message: String,
    pub success: bool,
}
