// Gas endpoint - current gas price from the chain's JSON-RPC
//
// GET /api/gas issues one `eth_gasPrice` call per request and answers with
// the wei value plus its gwei rendering. Nothing is cached.

use super::{ApiError, ServerState};
use crate::gas::GasReading;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Decimals between wei and gwei
const GWEI_DECIMALS: u32 = 9;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Handler for GET /api/gas
pub async fn get_gas(State(state): State<Arc<ServerState>>) -> Result<impl IntoResponse, ApiError> {
    let wei = fetch_gas_price(&state.client, &state.rpc_url).await?;

    let reading = GasReading {
        chain: state.chain.clone(),
        gas_price_wei: wei.to_string(),
        gas_price_gwei: format_units(wei, GWEI_DECIMALS),
        fetched_at: chrono::Utc::now().timestamp_millis(),
    };
    tracing::debug!("Served gas price {} gwei", reading.gas_price_gwei);

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(reading)))
}

/// Ask the RPC node for the current gas price in wei
pub async fn fetch_gas_price(client: &reqwest::Client, rpc_url: &str) -> Result<u128, ApiError> {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_gasPrice",
        "params": [],
    });

    let response = client
        .post(rpc_url)
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Upstream(format!("RPC returned {}", status)));
    }

    let rpc: RpcResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Upstream(format!("Malformed RPC response: {}", e)))?;

    if let Some(err) = rpc.error {
        return Err(ApiError::Upstream(format!(
            "RPC error {}: {}",
            err.code, err.message
        )));
    }

    let quantity = rpc
        .result
        .ok_or_else(|| ApiError::Upstream("RPC response without result".to_string()))?;
    parse_quantity(&quantity).ok_or_else(|| ApiError::Upstream(format!("Bad quantity {:?}", quantity)))
}

/// Parse a JSON-RPC hex quantity ("0x1a")
fn parse_quantity(s: &str) -> Option<u128> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Render an integer amount with `decimals` implied decimal places
///
/// Trailing fractional zeros are trimmed, and so is the point when nothing
/// is left after it: `format_units(12_000_000, 9) == "0.012"`.
pub fn format_units(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(0, 9), "0");
        assert_eq!(format_units(1_000_000_000, 9), "1");
        assert_eq!(format_units(12_000_000, 9), "0.012");
        assert_eq!(format_units(1, 9), "0.000000001");
        assert_eq!(format_units(1_500_000_000, 9), "1.5");
        assert_eq!(format_units(123_456_789_012, 9), "123.456789012");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0"), Some(0));
        assert_eq!(parse_quantity("0xb71b00"), Some(12_000_000));
        assert_eq!(parse_quantity("0XFF"), Some(255));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("12"), None);
        assert_eq!(parse_quantity("0xzz"), None);
    }
}
