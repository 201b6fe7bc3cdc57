//! Soroban JSON-RPC client

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use types::{ModuleError, RpcError};
use uuid::Uuid;

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// `getHealth` result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RpcHealth {
    pub status: String,
    #[serde(default)]
    pub latest_ledger: Option<u64>,
    #[serde(default)]
    pub oldest_ledger: Option<u64>,
    #[serde(default)]
    pub ledger_retention_window: Option<u64>,
}

impl RpcHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `getNetwork` result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub passphrase: String,
    #[serde(default)]
    pub protocol_version: Option<u32>,
    #[serde(default)]
    pub friendbot_url: Option<String>,
}

/// `getLatestLedger` result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedger {
    /// Ledger hash
    pub id: String,
    pub protocol_version: u32,
    pub sequence: u64,
}

/// HTTP client for a Soroban RPC node
#[derive(Debug, Clone)]
pub struct SorobanRpcClient {
    url: String,
    http_client: Client,
    request_timeout: Duration,
}

impl SorobanRpcClient {
    /// Create a new client
    pub fn new(url: impl Into<String>, request_timeout: Duration) -> Result<Self, ModuleError> {
        let http_client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("nestera-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ModuleError::Client(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http_client,
            request_timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get_health(&self) -> Result<RpcHealth, RpcError> {
        self.call("getHealth", None).await
    }

    pub async fn get_network(&self) -> Result<NetworkInfo, RpcError> {
        self.call("getNetwork", None).await
    }

    pub async fn get_latest_ledger(&self) -> Result<LatestLedger, RpcError> {
        self.call("getLatestLedger", None).await
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Option<Value>) -> Result<T, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.generate_request_id(),
            method,
            params,
        };

        tracing::debug!(rpc_url = %self.url, method, id = request.id, "Calling Soroban RPC");

        let response = timeout(
            self.request_timeout,
            self.http_client.post(&self.url).json(&request).send(),
        )
        .await
        .map_err(|_| RpcError::Transport {
            method: method.to_string(),
            message: format!("timed out after {}s", self.request_timeout.as_secs()),
        })?
        .map_err(|e| RpcError::Transport {
            method: method.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(RpcError::HttpStatus {
                method: method.to_string(),
                status: response.status().as_u16(),
            });
        }

        let raw_text = response.text().await.map_err(|e| RpcError::InvalidResponse {
            method: method.to_string(),
            message: format!("error reading response body: {}", e),
        })?;

        parse_response(method, &raw_text)
    }

    /// Generate a unique request ID
    fn generate_request_id(&self) -> u64 {
        let uuid = Uuid::new_v4();
        let bytes = uuid.as_bytes();
        u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

/// Unwrap a JSON-RPC envelope into its result
fn parse_response<T: DeserializeOwned>(method: &str, raw_text: &str) -> Result<T, RpcError> {
    let envelope: RpcResponse<T> =
        serde_json::from_str(raw_text).map_err(|e| RpcError::InvalidResponse {
            method: method.to_string(),
            message: format!("{} | raw: {}", e, raw_text),
        })?;

    match envelope {
        RpcResponse {
            error: Some(error), ..
        } => Err(RpcError::Remote {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        }),
        RpcResponse {
            result: Some(result),
            ..
        } => Ok(result),
        _ => Err(RpcError::InvalidResponse {
            method: method.to_string(),
            message: format!("neither result nor error present | raw: {}", raw_text),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn client(uri: String) -> SorobanRpcClient {
        SorobanRpcClient::new(uri, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_latest_ledger() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "getLatestLedger"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "id": "c73c5eac58a441d4eb733c35253ae85f783e018f7be5ef974258fed067aabb36",
                    "protocolVersion": 20,
                    "sequence": 2539605
                }
            })))
            .mount(&mock_server)
            .await;

        let ledger = client(mock_server.uri()).get_latest_ledger().await.unwrap();
        assert_eq!(ledger.sequence, 2539605);
        assert_eq!(ledger.protocol_version, 20);
    }

    #[tokio::test]
    async fn test_remote_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32601, "message": "method not found" }
            })))
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri()).get_network().await.unwrap_err();
        assert!(matches!(err, RpcError::Remote { code: -32601, .. }));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = client(mock_server.uri()).get_health().await.unwrap_err();
        assert!(matches!(err, RpcError::HttpStatus { status: 503, .. }));
    }

    #[test]
    fn test_parse_response_variants() {
        let health: RpcHealth = parse_response(
            "getHealth",
            r#"{"jsonrpc":"2.0","id":7,"result":{"status":"healthy","latestLedger":10,"oldestLedger":1,"ledgerRetentionWindow":10}}"#,
        )
        .unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.latest_ledger, Some(10));

        let err = parse_response::<RpcHealth>("getHealth", r#"{"jsonrpc":"2.0","id":7}"#).unwrap_err();
        assert!(matches!(err, RpcError::InvalidResponse { .. }));

        let err = parse_response::<RpcHealth>("getHealth", "not json").unwrap_err();
        assert!(matches!(err, RpcError::InvalidResponse { .. }));
    }
}
