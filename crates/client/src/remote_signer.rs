//! Remote permit signer that delegates signing to a signer-proxy service.
//!
//! The remote signer sends `eth_signTypedData_v4` JSON-RPC requests to a proxy service,
//! which handles the actual signing (typically via an HSM or secure enclave).

use alloy_primitives::{Address, Bytes, Signature};
use permit::{PermitSigner, SignerError, SigningPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A remote signer that delegates permit signing to a signer-proxy service.
///
/// The proxy receives the full EIP-712 document rather than the bare digest, so
/// it can display or policy-check what it is asked to sign.
///
/// # Example
///
/// ```ignore
/// let signer = RemoteSigner::new("http://localhost:9060", owner);
/// let permit = permit::build_permit(&request, &signer).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSigner {
    client: reqwest::Client,
    proxy_url: String,
    address: Address,
}

impl RemoteSigner {
    /// Creates a new remote signer.
    ///
    /// # Arguments
    /// * `proxy_url` - The URL of the signer-proxy service (e.g., "http://localhost:9060")
    /// * `address` - The Ethereum address of the signer
    pub fn new(proxy_url: impl Into<String>, address: Address) -> Self {
        Self::with_client(reqwest::Client::new(), proxy_url, address)
    }

    /// Creates a new remote signer with a custom HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        proxy_url: impl Into<String>,
        address: Address,
    ) -> Self {
        Self {
            client,
            proxy_url: proxy_url.into(),
            address,
        }
    }

    /// Returns the signer's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs an EIP-712 document via the remote signer-proxy.
    pub async fn sign_typed_data(&self, typed_data: &Value) -> Result<Signature, SignerError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_signTypedData_v4",
            params: (self.address, typed_data),
            id: 1,
        };

        debug!(proxy = %self.proxy_url, address = %self.address, "Requesting remote signature");

        let response = self
            .client
            .post(&self.proxy_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(SignerError::Transport(format!(
                "signer-proxy returned {status}: {body}"
            )));
        }

        let rpc_response: JsonRpcResponse<String> = response
            .json()
            .await
            .map_err(|e| SignerError::Malformed(e.to_string()))?;

        parse_response(rpc_response)
    }
}

impl PermitSigner for RemoteSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_permit(&self, payload: &SigningPayload) -> Result<Signature, SignerError> {
        self.sign_typed_data(&payload.typed_data).await
    }
}

fn parse_response(response: JsonRpcResponse<String>) -> Result<Signature, SignerError> {
    match response.result {
        Some(result) => {
            let bytes: Bytes = result
                .parse()
                .map_err(|e| SignerError::Malformed(format!("{e}")))?;
            Signature::from_raw(&bytes).map_err(|e| SignerError::Malformed(e.to_string()))
        }
        None => {
            let error = response.error.unwrap_or(JsonRpcError {
                code: -1,
                message: "unknown error".to_string(),
            });
            Err(SignerError::Rejected(format!(
                "JSON-RPC error {}: {}",
                error.code, error.message
            )))
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    const ADDRESS: Address = address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1");

    #[test]
    fn test_request_shape() {
        let typed_data = json!({ "primaryType": "Permit" });
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_signTypedData_v4",
            params: (ADDRESS, &typed_data),
            id: 1,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["method"], "eth_signTypedData_v4");
        assert_eq!(
            value["params"][0]
                .as_str()
                .map(str::to_lowercase)
                .as_deref(),
            Some("0x5cffa347b0ae99cc01e5c01714ca5658e54a23d1")
        );
        assert_eq!(value["params"][1]["primaryType"], "Permit");
    }

    #[test]
    fn test_parse_signature() {
        let mut raw = [0u8; 65];
        raw[31] = 7;
        raw[63] = 9;
        raw[64] = 28;
        let response: JsonRpcResponse<String> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": Bytes::copy_from_slice(&raw).to_string(),
        }))
        .unwrap();

        let signature = parse_response(response).unwrap();
        assert_eq!(signature.r(), U256::from(7));
        assert_eq!(signature.s(), U256::from(9));
        assert!(signature.v());
    }

    #[test]
    fn test_parse_short_signature() {
        let response: JsonRpcResponse<String> = serde_json::from_value(json!({
            "result": "0x1234",
        }))
        .unwrap();

        assert!(matches!(
            parse_response(response),
            Err(SignerError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rpc_error() {
        let response: JsonRpcResponse<String> = serde_json::from_value(json!({
            "error": { "code": -32000, "message": "policy denied" },
        }))
        .unwrap();

        let err = parse_response(response).unwrap_err();
        assert_eq!(
            err,
            SignerError::Rejected("JSON-RPC error -32000: policy denied".to_string())
        );
    }

    /// Serve a single HTTP exchange with a canned response, return the proxy url.
    async fn serve_once(status: &'static str, body: &str) -> String {
        let body = body.to_string();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Read the request head and its body before answering
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        url
    }

    fn request_complete(request: &[u8]) -> bool {
        let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        request.len() >= head_end + 4 + content_length
    }

    #[tokio::test]
    async fn test_proxy_error_status() {
        let url = serve_once("503 Service Unavailable", "hsm offline").await;
        let signer = RemoteSigner::new(url, ADDRESS);

        let err = signer.sign_typed_data(&json!({})).await.unwrap_err();
        match err {
            SignerError::Transport(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("hsm offline"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_proxy_invalid_body() {
        let url = serve_once("200 OK", "not json").await;
        let signer = RemoteSigner::new(url, ADDRESS);

        let err = signer.sign_typed_data(&json!({})).await.unwrap_err();
        assert!(matches!(err, SignerError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_proxy_signature() {
        let mut raw = [0u8; 65];
        raw[31] = 1;
        raw[63] = 2;
        raw[64] = 27;
        let body = format!(
            r#"{{"jsonrpc":"2.0","id":1,"result":"{}"}}"#,
            Bytes::copy_from_slice(&raw)
        );
        let url = serve_once("200 OK", &body).await;
        let signer = RemoteSigner::new(url, ADDRESS);

        let signature = signer.sign_typed_data(&json!({})).await.unwrap();
        assert_eq!(signature.r(), U256::from(1));
        assert_eq!(signature.s(), U256::from(2));
        assert!(!signature.v());
    }

    #[tokio::test]
    async fn test_unreachable_proxy() {
        let signer = RemoteSigner::new("http://127.0.0.1:1", ADDRESS);
        let err = signer.sign_typed_data(&json!({})).await.unwrap_err();
        assert!(matches!(err, SignerError::Transport(_)));
    }
}
