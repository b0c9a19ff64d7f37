use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::error::{ApiError, ClientError};
use super::token::{TokenStore, resolve_bearer};

const NGROK_SKIP_WARNING: &str = "ngrok-skip-browser-warning";

/// Clinic API client. Cheap to clone; clones share the cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Build a client whose cookie store keeps the session across calls.
    pub fn new(base_url: Url, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sakhi-binding/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()?;
        Self::with_http_client(http, base_url, tokens)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fixed header set sent with every request.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(NGROK_SKIP_WARNING),
            HeaderValue::from_static("true"),
        );

        if let Some(token) = resolve_bearer(self.tokens.as_ref()) {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => warn!(error = %e, "stored token is not a valid header value; sending without it"),
            }
        }
        headers
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        Ok(self.http.request(method, url).headers(self.headers()))
    }

    /// Send the request and decode a JSON body, normalizing every failure.
    pub async fn fetch_json<T>(&self, req: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let resp = req.send().await?;
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_failure(status, &body);
            debug!(url = %url, status = %status, message = %err.message, "API request failed");
            return Err(err.into());
        }

        let json: Value = serde_json::from_slice(&body)?;
        ApiError::check_success(status, &json)?;
        Ok(serde_json::from_value(json)?)
    }

    pub(crate) async fn get_json<T>(&self, segments: &[&str]) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.fetch_json(self.request(Method::GET, segments)?).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(method, segments)?.body(serde_json::to_vec(body)?);
        self.fetch_json(req).await
    }

    pub(crate) async fn post_empty<T>(&self, segments: &[&str]) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.fetch_json(self.request(Method::POST, segments)?).await
    }
}
