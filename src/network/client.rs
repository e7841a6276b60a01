//! HTTP client wrapper - talks to the prediction backend and maps failures
//! onto the user-facing error taxonomy

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::constants::{
    cannot_connect_message, LOCATIONS_PATH, MSG_BACKEND_ERROR_STATUS, MSG_BACKEND_INVALID_DATA,
    MSG_ESTIMATE_FAILED, MSG_ESTIMATE_MALFORMED, PREDICT_PATH,
};
use crate::error::{EstimatorError, Result};
use crate::models::{EstimateResponse, FormInput, LocationsResponse, PriceEstimate};

/// Client for the two backend endpoints
#[derive(Clone, Debug)]
pub struct EstimatorClient {
    http: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
    estimate_timeout: Option<Duration>,
}

impl EstimatorClient {
    pub fn new(config: &Config) -> Self {
        EstimatorClient {
            http: create_client(),
            base_url: config.base_url().to_string(),
            probe_timeout: config.probe_timeout(),
            estimate_timeout: config.estimate_timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend and fetch the ordered locality list
    pub async fn fetch_locations(&self) -> Result<Vec<String>> {
        let url = format!("{}{}", self.base_url, LOCATIONS_PATH);
        let start = Instant::now();

        let resp = self
            .http
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(url = %url, timeout = ?self.probe_timeout, "Location probe timed out");
                } else {
                    tracing::warn!(url = %url, error = %e, "Location probe failed");
                }
                EstimatorError::Connectivity(cannot_connect_message(&self.base_url))
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Location probe returned error status");
            return Err(EstimatorError::Connectivity(MSG_BACKEND_ERROR_STATUS.to_string()));
        }

        let body = resp.text().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Error reading location body");
            EstimatorError::Connectivity(cannot_connect_message(&self.base_url))
        })?;

        let parsed: LocationsResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Malformed location body");
            EstimatorError::Connectivity(MSG_BACKEND_INVALID_DATA.to_string())
        })?;

        tracing::info!(
            count = parsed.locations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Locations loaded"
        );
        Ok(parsed.locations)
    }

    /// Submit the form and read back the estimated price
    pub async fn estimate(&self, input: &FormInput) -> Result<PriceEstimate> {
        let url = format!("{}{}", self.base_url, PREDICT_PATH);
        let start = Instant::now();

        let mut req_builder = self.http.post(&url).form(&input.form_fields()[..]);
        if let Some(timeout) = self.estimate_timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let resp = req_builder.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Estimate request failed");
            EstimatorError::Request(MSG_ESTIMATE_FAILED.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Estimate returned error status");
            return Err(EstimatorError::Request(MSG_ESTIMATE_FAILED.to_string()));
        }

        let body = resp.text().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Error reading estimate body");
            EstimatorError::Request(MSG_ESTIMATE_FAILED.to_string())
        })?;

        let price = serde_json::from_str::<EstimateResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.price_text())
            .ok_or_else(|| {
                tracing::warn!(url = %url, body = %body, "Estimate body has no usable price");
                EstimatorError::Request(MSG_ESTIMATE_MALFORMED.to_string())
            })?;

        tracing::info!(
            price = %price,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Estimate received"
        );
        Ok(PriceEstimate::new(price))
    }
}

/// Create an HTTP client; per-request timeouts are applied by the caller
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Minimal one-shot HTTP responder standing in for the backend

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// A request as seen by the responder
    #[derive(Debug, Clone)]
    pub struct Captured {
        pub method: String,
        pub path: String,
        pub content_type: String,
        pub body: String,
    }

    /// Canned reply for one route
    #[derive(Debug, Clone)]
    pub struct Reply {
        pub status: u16,
        pub body: String,
        pub delay_ms: u64,
    }

    impl Reply {
        pub fn json(status: u16, body: &str) -> Self {
            Reply { status, body: body.to_string(), delay_ms: 0 }
        }

        pub fn delayed(mut self, delay_ms: u64) -> Self {
            self.delay_ms = delay_ms;
            self
        }
    }

    /// Serve `routes` (path → reply) until the test ends; returns the base URL
    /// and a receiver of every request seen
    pub async fn spawn(routes: Vec<(&'static str, Reply)>) -> (String, mpsc::UnboundedReceiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                let routes = routes.clone();
                let seen_tx = seen_tx.clone();
                tokio::spawn(async move {
                    let Some(captured) = read_request(&mut socket).await else { return };
                    let reply = routes
                        .iter()
                        .find(|(path, _)| *path == captured.path)
                        .map(|(_, reply)| reply.clone())
                        .unwrap_or_else(|| Reply::json(404, "{}"));
                    let _ = seen_tx.send(captured);
                    if reply.delay_ms > 0 {
                        tokio::time::sleep(std::time::Duration::from_millis(reply.delay_ms)).await;
                    }
                    let response = format!(
                        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        reply.status,
                        reply.body.len(),
                        reply.body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{}", addr), seen_rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<Captured> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                return None;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let mut request_line = lines.next()?.split_whitespace();
        let method = request_line.next()?.to_string();
        let path = request_line.next()?.to_string();

        let mut content_length = 0usize;
        let mut content_type = String::new();
        for line in lines {
            if let Some((key, value)) = line.split_once(':') {
                match key.trim().to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap_or(0),
                    "content-type" => content_type = value.trim().to_string(),
                    _ => {}
                }
            }
        }

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.ok()?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        Some(Captured { method, path, content_type, body })
    }
}
