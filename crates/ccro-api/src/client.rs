// Archive locator HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, JSON bodies, and status
// classification. Resource endpoints (boxes, location profiles, auth,
// activity logs) are inherent methods implemented in separate files so
// this module stays focused on transport mechanics.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error body shape used by the backend: `{"message": "..."}` or `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Stateless client for the archive locator REST backend.
///
/// Every call is a single round trip: no retries, no caching, no session
/// object. The outcome is fully determined by the one response received.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (e.g. `http://localhost:3001/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    /// Parse `base_url` and build a client with default transport settings.
    pub fn from_url(base_url: &str) -> Result<Self, Error> {
        Self::new(Url::parse(base_url)?, &TransportConfig::default())
    }

    /// The backend base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Client(format!("base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request core ─────────────────────────────────────────────────

    /// Issue one request and decode the JSON response.
    ///
    /// `body`, when present, is sent as `application/json`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send(method, segments, query, body).await?;
        Self::handle_response(resp).await
    }

    /// Issue one request whose success body is irrelevant.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send(method, segments, &[], body).await?;
        Self::handle_empty(resp).await
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(segments)?;
        if query.is_empty() {
            debug!("{method} {url}");
        } else {
            debug!("{method} {url} params={query:?}");
        }

        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder.send().await.map_err(Error::Network)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, segments, &[], None).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        self.request::<T, ()>(Method::GET, segments, params, None)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::POST, segments, &[], Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        self.request(Method::PUT, segments, &[], Some(body)).await
    }

    pub(crate) async fn put_empty(&self, segments: &[&str]) -> Result<(), Error> {
        self.request_empty::<()>(Method::PUT, segments, None).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), Error> {
        self.request_empty::<()>(Method::DELETE, segments, None)
            .await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await.map_err(Error::Network)?;
        // An empty 2xx body decodes like `null`, so `Option<T>` endpoints
        // can answer with no content.
        let text = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(text).map_err(|e| {
            let snippet = preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {snippet:?})"),
                body: body.clone(),
            }
        })
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .or_else(|| {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| preview(trimmed))
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_owned()
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// First 200 characters of a response body, for error messages.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Ensure the base path ends with `/` so segment joins land under it.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
