use crate::HassResult;

use std::env::var;
use url::Url;

pub const DEFAULT_CLIENT_ID: &str = "https://home-assistant.io/android";
pub const DEFAULT_REDIRECT_URI: &str = "homeassistant://auth-callback";
const USER_AGENT_STRING: &str = "HomeAssistant/Android";

/// Settings shared by the companion components
#[derive(Debug, Clone)]
pub struct CompanionConfig {
    pub server_url: Url,
    pub token: Option<String>,
    pub client_id: String,
    pub redirect_uri: String,
    pub device_model: String,
    pub app_version: String,
}

impl Default for CompanionConfig {
    fn default() -> CompanionConfig {
        CompanionConfig {
            server_url: Url::parse("http://localhost:8123").expect("static url is valid"),
            token: None,
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
            device_model: String::from("unknown"),
            app_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl CompanionConfig {
    /// Reads `HASS_URL`, `HASS_TOKEN` and `HASS_DEVICE_MODEL`, falling back to the defaults.
    pub fn from_env() -> HassResult<Self> {
        let mut config = CompanionConfig::default();
        if let Ok(url) = var("HASS_URL") {
            config.server_url = Url::parse(&url)?;
        }
        config.token = var("HASS_TOKEN").ok().filter(|t| !t.is_empty());
        if let Ok(model) = var("HASS_DEVICE_MODEL") {
            config.device_model = model;
        }
        Ok(config)
    }

    /// `ws[s]://host:port/api/websocket` for the configured server
    pub fn websocket_url(&self) -> HassResult<Url> {
        websocket_url(&self.server_url)
    }

    pub fn user_agent(&self) -> String {
        format!(
            "{} {} {}",
            USER_AGENT_STRING, self.device_model, self.app_version
        )
    }
}

pub(crate) fn websocket_url(server_url: &Url) -> HassResult<Url> {
    let protocol = if server_url.scheme() == "https" { "wss" } else { "ws" };
    let host = server_url
        .host_str()
        .ok_or_else(|| crate::HassError::Generic(format!("{} has no host", server_url)))?;
    let url = match server_url.port_or_known_default() {
        Some(port) => format!("{}://{}:{}/api/websocket", protocol, host, port),
        None => format!("{}://{}/api/websocket", protocol, host),
    };
    Ok(Url::parse(&url)?)
}
