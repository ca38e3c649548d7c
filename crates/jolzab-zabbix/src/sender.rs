use crate::error::{Result, ZabbixError};
use crate::{protocol, MetricSink, SenderResponse, ZabbixMetric};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// [`MetricSink`] speaking the Zabbix sender protocol.
///
/// Opens one TCP connection per batch, the way `zabbix_sender` does.
/// Connect, write and read are each bounded by the configured timeout.
pub struct ZabbixSender {
    server: String,
    port: u16,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct SenderPayload<'a> {
    request: &'static str,
    data: &'a [ZabbixMetric],
    clock: i64,
}

impl ZabbixSender {
    pub fn new(server: impl Into<String>, port: u16, timeout_secs: u64) -> Self {
        Self {
            server: server.into(),
            port,
            timeout_secs,
        }
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T>
    where
        F: std::future::Future<Output = std::io::Result<T>>,
    {
        timeout(Duration::from_secs(self.timeout_secs), op)
            .await
            .map_err(|_| ZabbixError::Timeout {
                timeout_secs: self.timeout_secs,
            })?
            .map_err(ZabbixError::from)
    }
}

#[async_trait]
impl MetricSink for ZabbixSender {
    async fn send(&self, metrics: &[ZabbixMetric]) -> Result<SenderResponse> {
        let payload = SenderPayload {
            request: "sender data",
            data: metrics,
            clock: Utc::now().timestamp(),
        };
        let body = serde_json::to_vec(&payload)?;
        let frame = protocol::encode_frame(&body);

        let addr = format!("{}:{}", self.server, self.port);
        let mut stream = self.bounded(TcpStream::connect(&addr)).await?;
        self.bounded(stream.write_all(&frame)).await?;

        let mut header = [0u8; protocol::HEADER_LEN];
        self.bounded(stream.read_exact(&mut header)).await?;
        let body_len = protocol::parse_header(&header)?;
        let mut response_body = vec![0u8; body_len];
        self.bounded(stream.read_exact(&mut response_body)).await?;

        let response: SenderResponse = serde_json::from_slice(&response_body)?;
        if !response.is_success() {
            return Err(ZabbixError::Rejected {
                info: response.info,
            });
        }
        tracing::debug!(server = %addr, count = metrics.len(), info = %response.info, "Batch accepted");
        Ok(response)
    }
}
