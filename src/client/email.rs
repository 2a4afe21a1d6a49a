use std::time::Duration;

use tracing::debug;
use url::Url;

use super::http::{Connection, HttpMethod, HttpSettings, parse_base_url};
use super::{NotifyError, RequestContext};
use crate::domain::{ApiKey, EmailResponse, SendEmail};
use crate::transport;

/// Production base URL of the Email API.
pub const DEFAULT_EMAIL_BASE_URL: &str = "https://api.notify.africa/v2";

#[derive(Debug, Clone)]
/// Builder for [`EmailClient`].
pub struct EmailClientBuilder {
    api_key: ApiKey,
    base_url: String,
    settings: HttpSettings,
}

impl EmailClientBuilder {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_EMAIL_BASE_URL.to_owned(),
            settings: HttpSettings::default(),
        }
    }

    /// Override the base URL. `send-email` is appended to it.
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

    pub fn build(self) -> Result<EmailClient, NotifyError> {
        let base_url = parse_base_url(&self.base_url)?;
        let http = self.settings.build_transport()?;
        Ok(EmailClient {
            connection: Connection::new(base_url, self.api_key, http),
        })
    }
}

#[derive(Debug, Clone)]
/// Email client (`POST send-email`).
pub struct EmailClient {
    connection: Connection,
}

impl EmailClient {
    /// Create a client using the default base URL.
    pub fn new(api_key: ApiKey) -> Result<Self, NotifyError> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: ApiKey) -> EmailClientBuilder {
        EmailClientBuilder::new(api_key)
    }

    pub(crate) fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn base_url(&self) -> &Url {
        self.connection.base_url()
    }

    /// Send an email to every address in the request's recipient list.
    pub async fn send(&self, request: SendEmail) -> Result<EmailResponse, NotifyError> {
        self.send_with_context(request, &RequestContext::default())
            .await
    }

    /// [`send`](Self::send) with cancellation and/or a deadline.
    ///
    /// One attempt per call: failures are returned as-is, never retried.
    pub async fn send_with_context(
        &self,
        request: SendEmail,
        ctx: &RequestContext,
    ) -> Result<EmailResponse, NotifyError> {
        let body = transport::encode_send_email_json(&request).map_err(NotifyError::Encode)?;
        let url = self.connection.endpoint(&["send-email"]);

        let response = self
            .connection
            .execute(HttpMethod::Post, url, Some(body), ctx)
            .await?;

        let parsed = transport::decode_send_email_json_response(&response)
            .map_err(|err| NotifyError::Decode(Box::new(err)))?;
        debug!(
            success = parsed.success,
            recipients = request.recipients().len(),
            "email accepted"
        );
        Ok(parsed)
    }
}
