//! JSON-RPC balance reader
//!
//! Reads ERC-20 balances with a raw `eth_call` of `balanceOf(address)`
//! against each chain's configured RPC endpoint. No signing and no gas
//! estimation happen here; a read is a single stateless POST.

use async_trait::async_trait;
use filler_types::{ChainBalanceReader, FillerConfig, ReadError, U256};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// 4-byte selector of `balanceOf(address)`
const BALANCE_OF_SELECTOR: &str = "70a08231";

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
	jsonrpc: &'a str,
	id: u64,
	method: &'a str,
	params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
	result: Option<String>,
	error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
	message: String,
}

/// Production [`ChainBalanceReader`] speaking JSON-RPC over HTTP
#[derive(Debug, Clone)]
pub struct JsonRpcBalanceReader {
	client: Client,
	endpoints: HashMap<u64, Url>,
}

impl JsonRpcBalanceReader {
	pub fn new(client: Client, config: &FillerConfig) -> Self {
		let endpoints = config
			.chains
			.iter()
			.map(|(chain_id, endpoint)| (*chain_id, endpoint.rpc_url.clone()))
			.collect();
		Self { client, endpoints }
	}

	/// ABI-encode the `balanceOf(owner)` calldata
	fn balance_of_calldata(chain_id: u64, owner: &str) -> Result<String, ReadError> {
		let raw = owner.strip_prefix("0x").unwrap_or(owner);
		let bytes = hex::decode(raw).map_err(|_| ReadError::InvalidResponse {
			chain_id,
			reason: format!("owner address is not valid hex: {}", owner),
		})?;
		if bytes.len() != 20 {
			return Err(ReadError::InvalidResponse {
				chain_id,
				reason: format!("owner address must be 20 bytes, got {}", bytes.len()),
			});
		}
		Ok(format!(
			"0x{}{:0>64}",
			BALANCE_OF_SELECTOR,
			hex::encode(bytes)
		))
	}

	/// Decode the hex-encoded uint256 return value into a decimal string.
	///
	/// Values above u128::MAX are rejected rather than truncated; no real
	/// token balance comes close, and a larger value signals a broken RPC.
	fn decode_balance(chain_id: u64, result: &str) -> Result<U256, ReadError> {
		let raw = result.strip_prefix("0x").unwrap_or(result);
		let significant = raw.trim_start_matches('0');
		if significant.is_empty() {
			return Ok(U256::zero());
		}
		if significant.len() > 32 {
			return Err(ReadError::InvalidResponse {
				chain_id,
				reason: format!("balance exceeds 128 bits: 0x{}", significant),
			});
		}
		let value = u128::from_str_radix(significant, 16).map_err(|_| {
			ReadError::InvalidResponse {
				chain_id,
				reason: format!("balance is not valid hex: {}", result),
			}
		})?;
		Ok(U256::from(value))
	}
}

#[async_trait]
impl ChainBalanceReader for JsonRpcBalanceReader {
	async fn read_balance(
		&self,
		chain_id: u64,
		token_address: &str,
		owner: &str,
	) -> Result<U256, ReadError> {
		let endpoint = self
			.endpoints
			.get(&chain_id)
			.ok_or(ReadError::MissingEndpoint { chain_id })?;

		let request = JsonRpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method: "eth_call",
			params: json!([
				{ "to": token_address, "data": Self::balance_of_calldata(chain_id, owner)? },
				"latest"
			]),
		};

		debug!(chain_id, token_address, "reading balance via eth_call");

		let response: JsonRpcResponse = self
			.client
			.post(endpoint.clone())
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if let Some(error) = response.error {
			return Err(ReadError::RpcResponse {
				chain_id,
				message: error.message,
			});
		}

		match response.result {
			Some(result) => Self::decode_balance(chain_id, &result),
			None => Err(ReadError::InvalidResponse {
				chain_id,
				reason: "response carried neither result nor error".to_string(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn calldata_pads_owner_to_32_bytes() {
		let data = JsonRpcBalanceReader::balance_of_calldata(
			1,
			"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
		)
		.unwrap();
		assert_eq!(data.len(), 2 + 8 + 64);
		assert!(data.starts_with("0x70a08231000000000000000000000000"));
		assert!(data.ends_with("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
	}

	#[test]
	fn calldata_rejects_short_addresses() {
		assert!(JsonRpcBalanceReader::balance_of_calldata(1, "0x1234").is_err());
	}

	#[test]
	fn decodes_zero_and_nonzero_balances() {
		let zero = format!("0x{}", "0".repeat(64));
		assert!(JsonRpcBalanceReader::decode_balance(1, &zero)
			.unwrap()
			.is_zero());

		let one_ether = format!("0x{:064x}", 1_000_000_000_000_000_000u128);
		assert_eq!(
			JsonRpcBalanceReader::decode_balance(1, &one_ether).unwrap(),
			U256::from("1000000000000000000")
		);
	}

	#[test]
	fn rejects_oversized_balances() {
		let oversized = format!("0x{}", "f".repeat(64));
		assert!(JsonRpcBalanceReader::decode_balance(1, &oversized).is_err());
	}
}
