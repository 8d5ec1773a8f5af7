//! Wire format of the metric endpoint

use serde::{Deserialize, Serialize};

/// One gas price reading as returned by `GET /api/gas`
///
/// The same type is produced by the server side, so both halves agree on the
/// JSON shape: `{ chain, gasPriceWei, gasPriceGwei, fetchedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasReading {
    /// Chain identifier, e.g. "base"
    pub chain: String,
    /// Integer gas price in wei, as a decimal string
    pub gas_price_wei: String,
    /// Gas price in gwei, as a decimal string
    pub gas_price_gwei: String,
    /// Server-side computation time (ms since epoch)
    pub fetched_at: i64,
}

impl GasReading {
    /// Gas price in gwei as a float
    ///
    /// Unparseable strings become NaN, which the history drops and the
    /// presentation layer renders as "no data".
    pub fn gwei(&self) -> f64 {
        self.gas_price_gwei.trim().parse().unwrap_or(f64::NAN)
    }

    /// Chain name with the first letter upper-cased ("base" -> "Base")
    pub fn chain_title(&self) -> String {
        let mut chars = self.chain.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_json() {
        let json = r#"{"chain":"base","gasPriceWei":"5000000","gasPriceGwei":"0.005","fetchedAt":1700000000000}"#;
        let reading: GasReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.chain, "base");
        assert_eq!(reading.gas_price_wei, "5000000");
        assert_eq!(reading.fetched_at, 1_700_000_000_000);
        assert!((reading.gwei() - 0.005).abs() < 1e-12);
    }

    #[test]
    fn garbage_gwei_is_nan() {
        let reading = GasReading {
            chain: "base".to_string(),
            gas_price_wei: "0".to_string(),
            gas_price_gwei: "not-a-number".to_string(),
            fetched_at: 0,
        };
        assert!(reading.gwei().is_nan());
    }

    #[test]
    fn chain_title_capitalizes() {
        let reading = GasReading {
            chain: "base".to_string(),
            gas_price_wei: "1".to_string(),
            gas_price_gwei: "1".to_string(),
            fetched_at: 0,
        };
        assert_eq!(reading.chain_title(), "Base");
    }
}
