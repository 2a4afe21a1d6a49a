use std::time::Duration;

use tracing::debug;
use url::Url;

use super::http::{Connection, HttpMethod, HttpSettings, parse_base_url};
use super::{NotifyError, RequestContext};
use crate::domain::{
    ApiKey, BatchSummary, DeliveryStatus, MessageId, SendBatchSms, SendSingleSms, SentSms,
    SmsResponse,
};
use crate::transport;

/// Production base URL of the SMS API.
pub const DEFAULT_SMS_BASE_URL: &str = "https://api.notify.africa/api/v1/api";

#[derive(Debug, Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct SmsClientBuilder {
    api_key: ApiKey,
    base_url: String,
    settings: HttpSettings,
}

impl SmsClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_SMS_BASE_URL.to_owned(),
            settings: HttpSettings::default(),
        }
    }

    /// Override the base URL. Endpoint paths (`messages/send`, ...) are appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.settings.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, NotifyError> {
        let base_url = parse_base_url(&self.base_url)?;
        let http = self.settings.build_transport()?;
        Ok(SmsClient {
            connection: Connection::new(base_url, self.api_key, http),
        })
    }
}

#[derive(Debug, Clone)]
/// SMS client: single and batch sends plus delivery status lookups.
///
/// Endpoints, relative to the base URL:
/// - `POST messages/send`
/// - `POST messages/batch`
/// - `GET messages/status/{id}`
pub struct SmsClient {
    connection: Connection,
}

impl SmsClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(api_key: ApiKey) -> Result<Self, NotifyError> {
        Self::builder(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> SmsClientBuilder {
        SmsClientBuilder::new(api_key)
    }

    pub(crate) fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Base URL the endpoint paths are appended to.
    pub fn base_url(&self) -> &Url {
        self.connection.base_url()
    }

    /// Send one SMS to one recipient.
    pub async fn send_single(
        &self,
        request: SendSingleSms,
    ) -> Result<SmsResponse<SentSms>, NotifyError> {
        self.send_single_with_context(request, &RequestContext::default())
            .await
    }

    /// [`send_single`](Self::send_single) with cancellation and/or a deadline.
    ///
    /// Errors:
    /// - [`NotifyError::Transport`], [`NotifyError::Cancelled`] or [`NotifyError::TimedOut`]
    ///   when no response was received,
    /// - [`NotifyError::Api`] for non-2xx HTTP responses,
    /// - [`NotifyError::Decode`] when the body is not the expected JSON.
    pub async fn send_single_with_context(
        &self,
        request: SendSingleSms,
        ctx: &RequestContext,
    ) -> Result<SmsResponse<SentSms>, NotifyError> {
        let body = transport::encode_send_single_json(&request).map_err(NotifyError::Encode)?;
        let url = self.connection.endpoint(&["messages", "send"]);

        let response = self
            .connection
            .execute(HttpMethod::Post, url, Some(body), ctx)
            .await?;

        let parsed = transport::decode_send_single_json_response(&response)
            .map_err(|err| NotifyError::Decode(Box::new(err)))?;
        debug!(message_id = parsed.data.message_id.as_str(), "sms queued");
        Ok(parsed)
    }

    /// Send one SMS text to many recipients.
    ///
    /// An empty recipient list is sent as-is; the provider is the one to reject it.
    pub async fn send_batch(
        &self,
        request: SendBatchSms,
    ) -> Result<SmsResponse<BatchSummary>, NotifyError> {
        self.send_batch_with_context(request, &RequestContext::default())
            .await
    }

    /// [`send_batch`](Self::send_batch) with cancellation and/or a deadline.
    pub async fn send_batch_with_context(
        &self,
        request: SendBatchSms,
        ctx: &RequestContext,
    ) -> Result<SmsResponse<BatchSummary>, NotifyError> {
        let body = transport::encode_send_batch_json(&request).map_err(NotifyError::Encode)?;
        let url = self.connection.endpoint(&["messages", "batch"]);

        let response = self
            .connection
            .execute(HttpMethod::Post, url, Some(body), ctx)
            .await?;

        let parsed = transport::decode_send_batch_json_response(&response)
            .map_err(|err| NotifyError::Decode(Box::new(err)))?;
        debug!(
            message_count = parsed.data.message_count,
            remaining_balance = parsed.data.remaining_balance,
            "sms batch queued"
        );
        Ok(parsed)
    }

    /// Look up the delivery status of a previously sent message.
    pub async fn check_status(
        &self,
        message_id: &MessageId,
    ) -> Result<SmsResponse<DeliveryStatus>, NotifyError> {
        self.check_status_with_context(message_id, &RequestContext::default())
            .await
    }

    /// [`check_status`](Self::check_status) with cancellation and/or a deadline.
    pub async fn check_status_with_context(
        &self,
        message_id: &MessageId,
        ctx: &RequestContext,
    ) -> Result<SmsResponse<DeliveryStatus>, NotifyError> {
        let url = self
            .connection
            .endpoint(&["messages", "status", message_id.as_str()]);

        let response = self
            .connection
            .execute(HttpMethod::Get, url, None, ctx)
            .await?;

        transport::decode_check_status_json_response(&response)
            .map_err(|err| NotifyError::Decode(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use tokio_util::sync::CancellationToken;

    use super::super::http::fake::FakeTransport;
    use super::*;
    use crate::domain::{MessageText, RawPhoneNumber, SenderId};

    const BASE: &str = "https://sms.example.invalid/api/v1/api";

    fn make_client(transport: &FakeTransport) -> SmsClient {
        SmsClient::from_connection(transport.connection(BASE, "sms-key"))
    }

    fn single(phone: &str, text: &str, sender: &str) -> SendSingleSms {
        SendSingleSms::new(
            RawPhoneNumber::new(phone).unwrap(),
            MessageText::new(text).unwrap(),
            SenderId::new(sender).unwrap(),
        )
    }

    fn sent_body(transport: &FakeTransport) -> Value {
        let request = transport.last_request().unwrap();
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn send_single_posts_payload_and_parses_message_id() {
        let transport = FakeTransport::new(
            200,
            r#"{"status":200,"data":{"messageId":"abc123","status":"queued"}}"#,
        );
        let client = make_client(&transport);

        let response = client
            .send_single(single("255765432100", "Hello", "137"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.data.message_id.as_str(), "abc123");
        assert_eq!(response.data.status, "queued");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.as_str(), format!("{BASE}/messages/send"));
        assert_eq!(request.bearer_token, "sms-key");
        assert_eq!(
            sent_body(&transport),
            json!({
                "phone_number": "255765432100",
                "message": "Hello",
                "sender_id": "137"
            })
        );
    }

    #[tokio::test]
    async fn send_batch_posts_payload_and_parses_counts() {
        let json = r#"
        {
          "status": 200,
          "message": "Messages queued",
          "timestamp": "2025-06-01T10:00:00.000Z",
          "path": "/api/v1/api/messages/batch",
          "data": {"messageCount": 2, "creditsDeducted": 2, "remainingBalance": 120}
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(&transport);

        let request = SendBatchSms::new(
            vec![
                RawPhoneNumber::new("255763765548").unwrap(),
                RawPhoneNumber::new("255689737839").unwrap(),
            ],
            MessageText::new("Batch test message").unwrap(),
            SenderId::new("137").unwrap(),
        );
        let response = client.send_batch(request).await.unwrap();
        assert_eq!(response.message.as_deref(), Some("Messages queued"));
        assert_eq!(response.data.message_count, 2);
        assert_eq!(response.data.credits_deducted, 2);
        assert_eq!(response.data.remaining_balance, 120);

        let request = transport.last_request().unwrap();
        assert_eq!(request.url.as_str(), format!("{BASE}/messages/batch"));
        assert_eq!(
            sent_body(&transport),
            json!({
                "phone_numbers": ["255763765548", "255689737839"],
                "message": "Batch test message",
                "sender_id": "137"
            })
        );
    }

    #[tokio::test]
    async fn send_batch_with_no_recipients_still_reaches_the_provider() {
        let transport =
            FakeTransport::new(400, r#"{"message":"phone_numbers must not be empty"}"#);
        let client = make_client(&transport);

        let request = SendBatchSms::new(
            Vec::new(),
            MessageText::new("hi").unwrap(),
            SenderId::new("137").unwrap(),
        );
        let err = client.send_batch(request).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(transport.calls(), 1);
        assert_eq!(sent_body(&transport)["phone_numbers"], json!([]));
    }

    #[tokio::test]
    async fn check_status_uses_get_with_id_in_path() {
        let json = r#"
        {
          "status": 200,
          "message": "ok",
          "data": {
            "messageId": "abc123",
            "status": "delivered",
            "sentAt": "2025-06-01T10:00:01.000Z",
            "deliveredAt": "2025-06-01T10:00:05.000Z"
          }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(&transport);

        let id = MessageId::new("abc123").unwrap();
        let response = client.check_status(&id).await.unwrap();
        assert_eq!(response.data.message_id, id);
        assert_eq!(response.data.status, "delivered");
        assert_eq!(
            response.data.delivered_at.as_deref(),
            Some("2025-06-01T10:00:05.000Z")
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.as_str(), format!("{BASE}/messages/status/abc123"));
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn check_status_keeps_pending_timestamps_empty() {
        let json = r#"{"status":200,"data":{"messageId":"abc123","status":"queued","sentAt":null,"deliveredAt":null}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(&transport);

        let response = client
            .check_status(&MessageId::new("abc123").unwrap())
            .await
            .unwrap();
        assert_eq!(response.data.sent_at, None);
        assert_eq!(response.data.delivered_at, None);
    }

    #[tokio::test]
    async fn send_single_maps_non_success_http_status() {
        let transport = FakeTransport::new(401, r#"{"message":"Unauthorized"}"#);
        let client = make_client(&transport);

        let err = client
            .send_single(single("255765432100", "Hello", "137"))
            .await
            .unwrap_err();
        match err {
            NotifyError::Api {
                status,
                status_line,
                body,
            } => {
                assert_eq!(status, 401);
                assert_eq!(status_line, "401 Unauthorized");
                assert_eq!(body, r#"{"message":"Unauthorized"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_single_maps_invalid_json_to_decode_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(&transport);

        let err = client
            .send_single(single("255765432100", "Hello", "137"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Decode(_)));
    }

    #[tokio::test]
    async fn check_status_maps_wrong_shape_to_decode_error() {
        let transport = FakeTransport::new(200, r#"{"status":200,"data":{"status":"queued"}}"#);
        let client = make_client(&transport);

        let err = client
            .check_status(&MessageId::new("abc123").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Decode(_)));
    }

    #[tokio::test]
    async fn cancelled_token_aborts_before_sending() {
        let transport = FakeTransport::new(
            200,
            r#"{"status":200,"data":{"messageId":"x","status":"queued"}}"#,
        );
        let client = make_client(&transport);
        let token = CancellationToken::new();
        token.cancel();

        let err = client
            .send_single_with_context(
                single("255765432100", "Hello", "137"),
                &RequestContext::new().with_cancellation(token),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Cancelled));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_request() {
        let transport = FakeTransport::hanging();
        let client = make_client(&transport);
        let token = CancellationToken::new();

        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = client
            .check_status_with_context(
                &MessageId::new("abc123").unwrap(),
                &RequestContext::new().with_cancellation(token),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::Cancelled));
        assert!(err.is_transport());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn deadline_aborts_hanging_batch() {
        let transport = FakeTransport::hanging();
        let client = make_client(&transport);

        let request = SendBatchSms::new(
            vec![RawPhoneNumber::new("255765432100").unwrap()],
            MessageText::new("hi").unwrap(),
            SenderId::new("137").unwrap(),
        );
        let err = client
            .send_batch_with_context(
                request,
                &RequestContext::new().with_timeout(Duration::from_millis(10)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, NotifyError::TimedOut { .. }));
    }

    #[test]
    fn builder_applies_base_url_override() {
        let client = SmsClient::builder(ApiKey::new("key").unwrap())
            .base_url("https://custom.example.invalid/v2")
            .timeout(Duration::from_secs(5))
            .user_agent("notify-africa-tests")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://custom.example.invalid/v2");
    }

    #[test]
    fn builder_uses_default_base_url() {
        let client = SmsClient::new(ApiKey::new("key").unwrap()).unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_SMS_BASE_URL);
    }

    #[test]
    fn builder_rejects_invalid_base_url() {
        let err = SmsClient::builder(ApiKey::new("key").unwrap())
            .base_url("::not a url::")
            .build()
            .unwrap_err();
        assert!(matches!(err, NotifyError::Validation(_)));
    }
}
