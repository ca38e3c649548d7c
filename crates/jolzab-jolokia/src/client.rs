use crate::error::{JolokiaError, Result};
use crate::{JolokiaClient, ReadRequest, ReadResponse};
use async_trait::async_trait;
use std::time::Duration;

/// [`JolokiaClient`] over HTTP using the JSON batch protocol.
///
/// Every call is bounded by the configured timeout so a hung endpoint
/// cannot stall the scheduler.
pub struct HttpJolokiaClient {
    client: reqwest::Client,
}

impl HttpJolokiaClient {
    /// # Errors
    ///
    /// Returns [`JolokiaError`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JolokiaClient for HttpJolokiaClient {
    async fn execute(&self, endpoint: &str, requests: &[ReadRequest]) -> Result<Vec<ReadResponse>> {
        let response = self.client.post(endpoint).json(requests).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JolokiaError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<ReadResponse> = response.json().await?;
        Ok(results)
    }
}
