//! Outbound loopback client.

use reqwest::StatusCode;

use crate::error::Result;

/// Thin wrapper over `reqwest::Client` for the loopback step.
///
/// No retries, and no timeouts beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct LoopbackClient {
    inner: reqwest::Client,
}

impl LoopbackClient {
    pub fn new() -> Result<Self> {
        // Loopback traffic must not be routed through HTTP_PROXY.
        let inner = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self { inner })
    }

    /// GET `url` and discard the body.
    pub async fn get(&self, url: &str) -> Result<StatusCode> {
        let response = self.inner.get(url).send().await?;
        let status = response.status();
        let _ = response.bytes().await?;
        Ok(status)
    }
}
