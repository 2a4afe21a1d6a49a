use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use super::{BoxError, NotifyError, RequestContext};
use crate::domain::{ApiKey, ValidationError};

const JSON_MEDIA_TYPE: &str = "application/json";

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub bearer_token: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let builder = match request.method {
                HttpMethod::Get => self.client.get(request.url),
                HttpMethod::Post => self.client.post(request.url),
            };
            let mut builder = builder
                .bearer_auth(&request.bearer_token)
                .header(ACCEPT, JSON_MEDIA_TYPE);
            if let Some(body) = request.body {
                builder = builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// HTTP client settings shared by the SMS and Email builders.
#[derive(Debug, Clone, Default)]
pub(crate) struct HttpSettings {
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpSettings {
    pub(crate) fn build_transport(&self) -> Result<Arc<dyn HttpTransport>, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| NotifyError::Transport(Box::new(err)))?;
        Ok(Arc::new(ReqwestTransport { client }))
    }
}

/// Parse a base URL and make sure endpoint paths can be appended to it.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "base_url" });
    }
    let url = Url::parse(trimmed).map_err(|err| ValidationError::InvalidBaseUrl {
        input: trimmed.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
            reason: "URL cannot carry path segments".to_owned(),
        });
    }
    Ok(url)
}

/// Base URL, bearer token and transport of one API client.
#[derive(Clone)]
pub(crate) struct Connection {
    base_url: Url,
    api_key: ApiKey,
    http: Arc<dyn HttpTransport>,
}

impl Connection {
    pub(crate) fn new(base_url: Url, api_key: ApiKey, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url,
            api_key,
            http,
        }
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL. Each segment is percent-encoded on its own,
    /// so ids containing `/` stay a single segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send one request and return the body of a 2xx response.
    pub(crate) async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        body: Option<String>,
        ctx: &RequestContext,
    ) -> Result<String, NotifyError> {
        debug!(%method, %url, "sending request");
        let request = HttpRequest {
            method,
            url,
            bearer_token: self.api_key.as_str().to_owned(),
            body,
        };

        let response = ctx.run(self.http.send(request)).await?;
        debug!(status = response.status, "received response");

        if !(200..=299).contains(&response.status) {
            warn!(status = response.status, "request failed with non-success HTTP status");
            return Err(NotifyError::api(response.status, response.body));
        }

        Ok(response.body)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}
