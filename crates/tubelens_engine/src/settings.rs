use std::time::Duration;

use url::Url;

use crate::TransportError;

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:9000/ws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ConnectionSettings {
    /// Parses the endpoint, accepting only `ws` and `wss` URLs.
    pub fn endpoint_url(&self) -> Result<Url, TransportError> {
        let invalid = |message: String| TransportError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            message,
        };
        let url = Url::parse(self.endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }
}
