use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::email::{DEFAULT_EMAIL_BASE_URL, EmailClient};
use super::http::{Connection, HttpSettings, HttpTransport, parse_base_url};
use super::sms::{DEFAULT_SMS_BASE_URL, SmsClient};
use super::NotifyError;
use crate::domain::ApiKey;

#[derive(Clone, Default, Deserialize)]
/// Configuration for [`NotifyClient`].
///
/// Loading it (from the environment, a file, ...) is the caller's job; the
/// clients never read the environment themselves.
pub struct ClientConfig {
    /// Base URL applied to both the SMS and the Email client. Blank means "use the defaults".
    #[serde(default)]
    pub base_url: Option<String>,
    pub sms_api_key: String,
    pub email_api_key: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(sms_api_key: impl Into<String>, email_api_key: impl Into<String>) -> Self {
        Self {
            sms_api_key: sms_api_key.into(),
            email_api_key: email_api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    fn base_url_override(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("sms_api_key", &"***")
            .field("email_api_key", &"***")
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Clone)]
/// SMS and Email clients built from one [`ClientConfig`].
///
/// Both share a single HTTP connection pool.
pub struct NotifyClient {
    sms: SmsClient,
    email: EmailClient,
}

impl NotifyClient {
    pub fn new(config: ClientConfig) -> Result<Self, NotifyError> {
        let settings = HttpSettings {
            timeout: config.timeout_ms.map(Duration::from_millis),
            user_agent: config.user_agent.clone(),
        };
        let http = settings.build_transport()?;
        Self::with_transport(config, http)
    }

    fn with_transport(
        config: ClientConfig,
        http: Arc<dyn HttpTransport>,
    ) -> Result<Self, NotifyError> {
        let sms_api_key = ApiKey::new(config.sms_api_key.as_str())?;
        let email_api_key = ApiKey::new(config.email_api_key.as_str())?;

        let (sms_base, email_base) = match config.base_url_override() {
            Some(base) => {
                let base = parse_base_url(base)?;
                (base.clone(), base)
            }
            None => (
                parse_base_url(DEFAULT_SMS_BASE_URL)?,
                parse_base_url(DEFAULT_EMAIL_BASE_URL)?,
            ),
        };

        Ok(Self {
            sms: SmsClient::from_connection(Connection::new(sms_base, sms_api_key, http.clone())),
            email: EmailClient::from_connection(Connection::new(email_base, email_api_key, http)),
        })
    }

    pub fn sms(&self) -> &SmsClient {
        &self.sms
    }

    pub fn email(&self) -> &EmailClient {
        &self.email
    }
}
