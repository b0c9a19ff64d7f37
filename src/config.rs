use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Message returned to the caller when the chat backend cannot be reached.
pub const BACKEND_UNREACHABLE: &str = "Binding Layer failed to connect to Backend";

/// Upstream path the chat proxy forwards to.
pub const SAKHI_CHAT_PATH: &str = "/sakhi/chat";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub listen_addr: String,
    pub backend_url: Url,
    pub upstream_timeout_secs: u64,
    pub database_url: String,
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            // The chat backend lives on the internal port 8100.
            backend_url: Url::parse("http://localhost:8100").expect("static url is valid"),
            upstream_timeout_secs: 15,
            database_url: "sqlite:sakhi.db".to_string(),
            loglevel: "info".to_string(),
            proxy: None,
        }
    }
}

impl Config {
    /// Defaults first, then `SAKHI_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("SAKHI_"))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid SAKHI_* configuration"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_binding_layer_ports() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
        assert_eq!(cfg.backend_url.as_str(), "http://localhost:8100/");
        assert_eq!(cfg.upstream_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SAKHI_BACKEND_URL", "http://10.0.0.7:9000");
            jail.set_env("SAKHI_UPSTREAM_TIMEOUT_SECS", "3");
            let cfg = Config::load()?;
            assert_eq!(cfg.backend_url.as_str(), "http://10.0.0.7:9000/");
            assert_eq!(cfg.upstream_timeout_secs, 3);
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }
}
