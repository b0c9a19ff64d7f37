use crate::config::{Config, SAKHI_CHAT_PATH};
use crate::error::BindingError;
use crate::types::chat::ChatForward;
use crate::types::json::truthy_field;
use serde_json::Value;
use std::time::Duration;
use tracing::error;
use url::Url;

/// Stateless caller for the internal Sakhi chat backend.
pub struct SakhiBackendApi;

impl SakhiBackendApi {
    /// HTTP client for the relay. The configured timeout bounds each forward.
    pub fn build_client(cfg: &Config) -> Result<reqwest::Client, BindingError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("sakhi-binding/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.upstream_timeout());
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(builder.build()?)
    }

    pub fn chat_url(backend_url: &Url) -> Result<Url, BindingError> {
        Ok(backend_url.join(SAKHI_CHAT_PATH)?)
    }

    /// Forward one chat turn and relay the backend's JSON reply.
    ///
    /// A non-2xx answer becomes [`BindingError::Upstream`] carrying the
    /// backend's `detail`; a transport failure or timeout surfaces as
    /// [`BindingError::Reqwest`].
    pub async fn forward_chat(
        client: &reqwest::Client,
        backend_url: &Url,
        body: &ChatForward,
        timeout: Duration,
    ) -> Result<Value, BindingError> {
        let url = Self::chat_url(backend_url)?;
        let resp = client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "binding layer failed to reach chat backend"))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .inspect_err(|e| error!(error = %e, "failed to read chat backend response body"))?;
        let payload = parse_payload(&bytes);

        if !status.is_success() {
            error!(status = %status, "chat backend returned an error");
            let detail = truthy_field(&payload, "detail").cloned();
            return Err(BindingError::Upstream { status, detail });
        }
        Ok(payload)
    }
}

/// JSON when the body parses, the raw text otherwise.
fn parse_payload(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
