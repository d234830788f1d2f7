use crate::{FetchError, MetadataSource};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MoonrakerConfig {
    pub host: String,
    pub port: u16,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct MoonrakerClient {
    client: Client,
    url: String,
}

impl MoonrakerClient {
    pub fn new(cfg: MoonrakerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| FetchError::Connectivity(e.to_string()))?;
        Ok(Self {
            client,
            url: build_url(&cfg.host, cfg.port, &cfg.endpoint),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// `http://{host}:{port}{endpoint}`, adding the leading slash if the endpoint lacks one.
pub fn build_url(host: &str, port: u16, endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        format!("http://{}:{}{}", host, port, endpoint)
    } else {
        format!("http://{}:{}/{}", host, port, endpoint)
    }
}

#[async_trait::async_trait]
impl MetadataSource for MoonrakerClient {
    async fn fetch(&self) -> Result<Value, FetchError> {
        debug!(url = %self.url, "requesting gcode metadata");
        let resp = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Connectivity(transport_message(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        // Honours the Content-Type charset; undecodable bytes become U+FFFD.
        let body = resp
            .text_with_charset("utf-8")
            .await
            .map_err(|e| FetchError::Connectivity(transport_message(&e)))?;
        debug!(bytes = body.len(), "received metadata body");

        serde_json::from_str(&body).map_err(|e| FetchError::decode(&e, &body))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {}", err)
    } else {
        err.to_string()
    }
}
