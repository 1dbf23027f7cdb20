use std::time::{Duration, Instant};

use async_trait::async_trait;
use maze_core::{MazeTransport, TransportError};
use maze_settings::MazeSettings;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&MazeSettings::default())
    }
}

impl From<&MazeSettings> for HttpConfig {
    fn from(settings: &MazeSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            request_timeout: settings.request_timeout(),
            connect_timeout: settings.connect_timeout(),
            user_agent: settings.user_agent.clone(),
        }
    }
}

/// Sends each query as `GET {endpoint}?{query}` and returns the body text.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    request_timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {e}", config.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "unsupported scheme: {}",
                endpoint.scheme()
            )));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url_for(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(query));
        url
    }

    fn map_error(&self, e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.request_timeout)
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl MazeTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(host = self.endpoint.host_str().unwrap_or_default()))]
    async fn send(&self, query: &str) -> Result<String, TransportError> {
        let start = Instant::now();
        let response = self
            .client
            .get(self.url_for(query))
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            // The status decides the error kind even if the body is unreadable.
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), elapsed_ms = start.elapsed().as_millis() as u64, "maze error response");
            return Err(TransportError::from_status(status.as_u16(), body));
        }

        let body = response.text().await.map_err(|e| self.map_error(&e))?;
        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "maze response"
        );
        Ok(body)
    }
}
