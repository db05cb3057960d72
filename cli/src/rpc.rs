//! # JSON-RPC Submission
//!
//! [`HttpSubmitter`] delivers signed transactions to a LightPool node over
//! HTTP JSON-RPC 2.0.
//!
//! ```text
//! POST <base_url>/rpc
//! {"jsonrpc":"2.0","id":1,"method":"submitTransaction","params":[{"tx":"0x…"}]}
//! ```
//!
//! A JSON-RPC `error` object with an application code, or a server-defined
//! one in `-32099..=-32000`, means the node refused the transaction and
//! becomes [`SubmitError::Rejected`]. The rest of the reserved range
//! (parse error, invalid request, unknown method and the like) says the
//! call itself was wrong, so it becomes [`SubmitError::Transport`] along
//! with anything else that stops a well-formed answer from coming back:
//! connect failures, timeouts, non-2xx statuses and unparseable bodies.
//!
//! The submitter never retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lightpool_sdk::config::{SDK_VERSION, WIRE_VERSION};
use lightpool_sdk::submit::{Event, Receipt, SubmissionChannel, SubmitError};
use lightpool_sdk::transaction::SignedTransaction;
use lightpool_sdk::types::Digest;

/// Node RPC endpoint used when none is configured.
pub const DEFAULT_RPC_URL: &str = "http://localhost:26300";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SUBMIT_METHOD: &str = "submitTransaction";

/// Configuration for [`HttpSubmitter`].
#[derive(Debug, Clone)]
pub struct HttpSubmitterConfig {
    /// Node base URL, without the `/rpc` suffix.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl HttpSubmitterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for HttpSubmitterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: [SubmitParams<'a>; 1],
}

#[derive(Serialize)]
struct SubmitParams<'a> {
    tx: &'a str,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<SubmitResult>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    /// Reserved by JSON-RPC 2.0 and not left to the server to define.
    fn is_protocol_level(&self) -> bool {
        (-32768..=-32100).contains(&self.code)
    }
}

#[derive(Deserialize)]
struct SubmitResult {
    digest: Digest,
    receipt: RpcReceipt,
}

#[derive(Deserialize)]
struct RpcReceipt {
    status: ReceiptStatus,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ReceiptStatus {
    Success,
    Failure,
}

impl From<SubmitResult> for Receipt {
    fn from(result: SubmitResult) -> Self {
        Receipt {
            digest: result.digest,
            success: result.receipt.status == ReceiptStatus::Success,
            events: result.receipt.events,
            error: result.receipt.error,
        }
    }
}

// ---------------------------------------------------------------------------
// Submitter
// ---------------------------------------------------------------------------

/// `lightpool-sdk/<version> wire/<n>`, so node logs show which encoder
/// produced a rejected payload.
pub fn user_agent() -> String {
    format!("lightpool-sdk/{SDK_VERSION} wire/{WIRE_VERSION}")
}

/// HTTP JSON-RPC implementation of [`SubmissionChannel`].
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools
/// connections.
#[derive(Debug)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpSubmitter {
    pub fn new(config: HttpSubmitterConfig) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent())
            .build()
            .map_err(|e| SubmitError::Transport(format!("failed to build HTTP client: {e}")))?;

        let endpoint = format!("{}/rpc", config.base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionChannel for HttpSubmitter {
    async fn submit(&self, tx: &SignedTransaction) -> Result<Receipt, SubmitError> {
        let tx_hex = tx.to_hex();
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: SUBMIT_METHOD,
            params: [SubmitParams { tx: &tx_hex }],
        };

        debug!(endpoint = %self.endpoint, id = request.id, digest = %tx.digest(), "posting transaction");
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmitError::Transport(format!("{SUBMIT_METHOD}: request timed out"))
                } else {
                    SubmitError::Transport(format!("{SUBMIT_METHOD}: {e}"))
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "node answered with HTTP error");
            return Err(SubmitError::Transport(format!(
                "{SUBMIT_METHOD}: HTTP {status}: {body}"
            )));
        }

        let response: RpcResponse = resp.json().await.map_err(|e| {
            SubmitError::Transport(format!("{SUBMIT_METHOD}: response deserialization failed: {e}"))
        })?;

        match (response.result, response.error) {
            (_, Some(err)) if err.is_protocol_level() => {
                warn!(code = err.code, message = %err.message, "node refused the RPC call");
                Err(SubmitError::Transport(format!(
                    "{SUBMIT_METHOD}: {} (code {})",
                    err.message, err.code
                )))
            }
            (_, Some(err)) => Err(SubmitError::Rejected {
                digest: Some(*tx.digest()),
                reason: format!("{} (code {})", err.message, err.code),
            }),
            (Some(result), None) => Ok(result.into()),
            (None, None) => Err(SubmitError::Transport(format!(
                "{SUBMIT_METHOD}: response carried neither result nor error"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_rpc_once() {
        let a = HttpSubmitter::new(HttpSubmitterConfig::new("http://node:26300/")).unwrap();
        let b = HttpSubmitter::new(HttpSubmitterConfig::new("http://node:26300")).unwrap();
        assert_eq!(a.endpoint(), "http://node:26300/rpc");
        assert_eq!(a.endpoint(), b.endpoint());
    }

    #[test]
    fn request_shape() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: SUBMIT_METHOD,
            params: [SubmitParams { tx: "0xabcd" }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "submitTransaction",
                "params": [{"tx": "0xabcd"}],
            })
        );
    }

    #[test]
    fn protocol_codes_are_told_apart_from_rejections() {
        let code = |code| RpcError {
            code,
            message: String::new(),
        };
        for protocol in [-32700, -32600, -32601, -32602, -32603, -32768] {
            assert!(code(protocol).is_protocol_level(), "{protocol}");
        }
        for rejection in [-32000, -32099, -1, 0, 4001] {
            assert!(!code(rejection).is_protocol_level(), "{rejection}");
        }
    }

    #[test]
    fn user_agent_names_sdk_and_wire_versions() {
        assert_eq!(
            user_agent(),
            format!("lightpool-sdk/{} wire/1", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn failure_status_maps_to_unsuccessful_receipt() {
        let digest = Digest::of(b"tx");
        let result: SubmitResult = serde_json::from_value(serde_json::json!({
            "digest": digest.to_hex(),
            "receipt": {"status": "failure", "error": "market paused"},
        }))
        .unwrap();
        let receipt = Receipt::from(result);
        assert!(!receipt.success);
        assert_eq!(receipt.digest, digest);
        assert_eq!(receipt.error.as_deref(), Some("market paused"));
        assert!(receipt.events.is_empty());
    }

    #[test]
    fn default_config_points_at_local_node() {
        let config = HttpSubmitterConfig::default().with_timeout_secs(5);
        assert_eq!(config.base_url, DEFAULT_RPC_URL);
        assert_eq!(config.timeout_secs, 5);
    }
}
