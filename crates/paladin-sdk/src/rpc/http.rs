//! JSON-RPC over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sol_tx::{Hash, Pubkey, Signature};
use tokio::time::{sleep, timeout};
use url::Url;

use super::{
    BlockhashConfirmation, Commitment, LatestBlockhash, RpcConnection, SendOptions,
    VoteAccountStatus,
};
use crate::config::SdkConfig;
use crate::error::{Result, SdkError};

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `{ "context": { "slot": .. }, "value": .. }`
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
    last_valid_block_height: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    err: Option<Value>,
    confirmation_status: Option<Commitment>,
}

#[derive(Debug, Deserialize)]
struct AccountValue {
    /// `[data, encoding]`
    data: (String, String),
}

/// [`RpcConnection`] backed by a cluster's JSON-RPC endpoint.
#[derive(Clone, Debug)]
pub struct HttpRpcClient {
    client: Client,
    endpoint: Url,
    commitment: Commitment,
    poll_interval: Duration,
    confirm_timeout: Duration,
    request_id: Arc<AtomicU64>,
}

impl HttpRpcClient {
    pub fn new(config: &SdkConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.rpc_url.clone(),
            commitment: config.commitment,
            poll_interval: config.poll_interval,
            confirm_timeout: config.confirm_timeout,
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn send_request<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_request_id(),
            method,
            params,
        };
        tracing::trace!(?request, "rpc request");

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        tracing::trace!(method, %body, "rpc response");

        let rpc_response: JsonRpcResponse<T> = serde_json::from_str(&body)
            .map_err(|e| SdkError::Serialization(format!("{method} response: {e}")))?;

        if let Some(error) = rpc_response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: format!("{method}: missing result"),
        })
    }

    /// Status of a single signature, `None` if the node has not seen it.
    async fn get_signature_status(&self, signature: &Signature) -> Result<Option<SignatureStatus>> {
        let params = json!([[signature.to_string()], { "searchTransactionHistory": false }]);
        let response: WithContext<Vec<Option<SignatureStatus>>> =
            self.send_request("getSignatureStatuses", params).await?;
        Ok(response.value.into_iter().next().flatten())
    }

    pub async fn get_block_height(&self, commitment: Commitment) -> Result<u64> {
        self.send_request("getBlockHeight", json!([{ "commitment": commitment }]))
            .await
    }
}

impl RpcConnection for HttpRpcClient {
    async fn get_latest_blockhash(&self, commitment: Commitment) -> Result<LatestBlockhash> {
        let response: WithContext<BlockhashValue> = self
            .send_request("getLatestBlockhash", json!([{ "commitment": commitment }]))
            .await?;
        let blockhash: Hash = response.value.blockhash.parse()?;

        Ok(LatestBlockhash {
            blockhash,
            last_valid_block_height: response.value.last_valid_block_height,
        })
    }

    async fn send_raw_transaction(
        &self,
        wire_transaction: &[u8],
        options: SendOptions,
    ) -> Result<Signature> {
        let encoded = general_purpose::STANDARD.encode(wire_transaction);
        let preflight = options.preflight_commitment.unwrap_or(self.commitment);
        let params = json!([encoded, {
            "encoding": "base64",
            "skipPreflight": options.skip_preflight,
            "preflightCommitment": preflight,
        }]);

        let signature: String = self.send_request("sendTransaction", params).await?;
        tracing::info!(%signature, skip_preflight = options.skip_preflight, "transaction submitted");
        Ok(signature.parse()?)
    }

    async fn confirm_transaction(
        &self,
        strategy: BlockhashConfirmation,
        commitment: Commitment,
    ) -> Result<()> {
        let signature = strategy.signature;

        let poll = async {
            loop {
                if let Some(status) = self.get_signature_status(&signature).await? {
                    if let Some(err) = status.err {
                        tracing::warn!(%signature, %err, "transaction failed");
                        return Err(SdkError::TransactionFailed {
                            signature,
                            reason: err.to_string(),
                        });
                    }
                    if status.confirmation_status.is_some_and(|reached| reached >= commitment) {
                        tracing::debug!(%signature, %commitment, "transaction confirmed");
                        return Ok(());
                    }
                }

                let height = self.get_block_height(commitment).await?;
                if height > strategy.last_valid_block_height {
                    tracing::warn!(%signature, height, "blockhash expired");
                    return Err(SdkError::BlockhashExpired(signature));
                }

                sleep(self.poll_interval).await;
            }
        };

        match timeout(self.confirm_timeout, poll).await {
            Ok(result) => result,
            Err(_) => Err(SdkError::Timeout(self.confirm_timeout)),
        }
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: u64) -> Result<u64> {
        self.send_request(
            "getMinimumBalanceForRentExemption",
            json!([data_len, { "commitment": self.commitment }]),
        )
        .await
    }

    async fn get_vote_accounts(&self) -> Result<VoteAccountStatus> {
        self.send_request("getVoteAccounts", json!([{ "commitment": self.commitment }]))
            .await
    }

    async fn get_account_data(&self, pubkey: &Pubkey) -> Result<Option<Vec<u8>>> {
        let params = json!([pubkey.to_string(), {
            "encoding": "base64",
            "commitment": self.commitment,
        }]);
        let response: WithContext<Option<AccountValue>> =
            self.send_request("getAccountInfo", params).await?;

        let Some(account) = response.value else {
            return Ok(None);
        };
        let (data, encoding) = account.data;
        if encoding != "base64" {
            return Err(SdkError::Serialization(format!(
                "getAccountInfo returned {encoding} data, expected base64"
            )));
        }
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| SdkError::Serialization(format!("account {pubkey} data: {e}")))?;
        Ok(Some(bytes))
    }
}
