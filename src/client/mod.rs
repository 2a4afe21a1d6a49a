//! Client layer: HTTP plumbing, per-call context, and the SMS/Email/aggregate clients.

mod email;
mod http;
mod notify;
mod sms;

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::ValidationError;

pub use email::{DEFAULT_EMAIL_BASE_URL, EmailClient, EmailClientBuilder};
pub use notify::{ClientConfig, NotifyClient};
pub use sms::{DEFAULT_SMS_BASE_URL, SmsClient, SmsClientBuilder};

/// Boxed error source carried by [`NotifyError::Transport`] and [`NotifyError::Decode`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`], [`EmailClient`] and [`NotifyClient`].
///
/// Every call makes exactly one attempt; none of these are retried internally.
pub enum NotifyError {
    /// HTTP client / transport failure (DNS, TLS, connection reset, client timeout).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The caller's [`CancellationToken`] fired before the response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The per-call deadline from [`RequestContext::with_timeout`] elapsed.
    #[error("request timed out after {after:?}")]
    TimedOut { after: Duration },

    /// The server answered with a status outside `200..=299`.
    ///
    /// `body` is the raw response text, not parsed.
    #[error("API error: {status_line} - {body}")]
    Api {
        status: u16,
        status_line: String,
        body: String,
    },

    /// A successful response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[source] BoxError),

    /// The request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors or builders rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl NotifyError {
    /// `true` for failures that happened before a response was received:
    /// [`Transport`](Self::Transport), [`Cancelled`](Self::Cancelled) and
    /// [`TimedOut`](Self::TimedOut).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Cancelled | Self::TimedOut { .. }
        )
    }

    /// HTTP status of an [`Api`](Self::Api) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn api(status: u16, body: String) -> Self {
        Self::Api {
            status,
            status_line: status_line(status),
            body,
        }
    }
}

fn status_line(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
/// Per-call cancellation and deadline.
///
/// The default context never cancels and has no deadline beyond the one
/// configured on the client builder.
pub struct RequestContext {
    cancellation: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the call when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Abort the call if it has not completed within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive `call` to completion unless the token fires or the deadline elapses first.
    /// In both cases `call` is dropped, which aborts the in-flight request.
    pub(crate) async fn run<T, F>(&self, call: F) -> Result<T, NotifyError>
    where
        F: Future<Output = Result<T, BoxError>>,
    {
        let timeout = self.timeout;
        let exchange = async move {
            match timeout {
                Some(after) => match tokio::time::timeout(after, call).await {
                    Ok(result) => result.map_err(NotifyError::Transport),
                    Err(_) => {
                        debug!(?after, "request timed out");
                        Err(NotifyError::TimedOut { after })
                    }
                },
                None => call.await.map_err(NotifyError::Transport),
            }
        };

        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("request cancelled");
                    Err(NotifyError::Cancelled)
                }
                result = exchange => result,
            },
            None => exchange.await,
        }
    }
}
