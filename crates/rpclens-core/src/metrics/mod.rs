pub mod io;

use serde::{Deserialize, Deserializer, Serialize};

/// One attempted transaction as recorded by the load-testing tool.
///
/// Producers write additional keys (sequence number, tx hash, submit and
/// confirm timestamps); those are ignored here. Numeric fields accept any
/// finite, non-negative JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MeasurementRecord {
    pub success: bool,
    /// Submit-to-confirm latency. `None` when the transaction failed before
    /// it could be timed.
    #[serde(
        default,
        deserialize_with = "optional_non_negative",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency_ms: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_non_negative",
        skip_serializing_if = "Option::is_none"
    )]
    pub gas_used: Option<f64>,
    /// Payload size in bytes.
    #[serde(alias = "data_size_bytes", deserialize_with = "non_negative")]
    pub data_size: f64,
    /// Free-text failure description. May be absent even on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn check_non_negative<E: serde::de::Error>(value: f64) -> Result<f64, E> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(E::custom(format!(
            "expected a non-negative number, found {value}"
        )))
    }
}

fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    check_non_negative(f64::deserialize(deserializer)?)
}

fn optional_non_negative<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(check_non_negative::<D::Error>)
        .transpose()
}

impl MeasurementRecord {
    /// Whether the error text looks like provider-side throttling.
    pub fn is_rate_limited(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|e| e.contains("429") || e.to_lowercase().contains("rate"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_with(error: &str) -> MeasurementRecord {
        MeasurementRecord {
            success: false,
            latency_ms: None,
            gas_used: None,
            data_size: 0.0,
            error: Some(error.to_string()),
        }
    }

    #[test]
    fn deserializes_producer_output_with_extra_keys() {
        let json = r#"{
            "sequence": 4,
            "tx_hash": "0x00",
            "submit_time_ms": 1700000000000,
            "confirm_time_ms": null,
            "latency_ms": null,
            "gas_used": 21000,
            "success": false,
            "error": "timeout",
            "data_size": 2048
        }"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("should parse");
        assert!(!record.success);
        assert_eq!(record.latency_ms, None);
        assert_eq!(record.gas_used, Some(21000.0));
        assert_eq!(record.data_size, 2048.0);
        assert_eq!(record.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn data_size_bytes_alias_is_accepted() {
        let json = r#"{"success": true, "latency_ms": 120, "data_size_bytes": 512}"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("should parse");
        assert_eq!(record.data_size, 512.0);
        assert_eq!(record.error, None);
    }

    #[test]
    fn missing_success_is_rejected() {
        let json = r#"{"latency_ms": 120, "data_size": 512}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
    }

    #[test]
    fn missing_data_size_is_rejected() {
        let json = r#"{"success": true, "latency_ms": 120}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
    }

    #[test]
    fn negative_latency_is_rejected() {
        let json = r#"{"success": true, "latency_ms": -5, "data_size": 1}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(json).is_err());
    }

    #[test]
    fn fractional_values_are_accepted() {
        let json = r#"{"success": true, "latency_ms": 512.5, "gas_used": 21000.0, "data_size": 99.5}"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("should parse");
        assert_eq!(record.latency_ms, Some(512.5));
        assert_eq!(record.gas_used, Some(21000.0));
        assert_eq!(record.data_size, 99.5);
    }

    #[test]
    fn gas_beyond_u64_is_accepted() {
        let json = r#"{"success": true, "gas_used": 340282366920938463463374607431768211455, "data_size": 1}"#;
        let record: MeasurementRecord = serde_json::from_str(json).expect("should parse");
        assert!(record.gas_used.is_some_and(|g| g > u64::MAX as f64));
    }

    #[test]
    fn negative_gas_and_data_size_are_rejected() {
        let gas = r#"{"success": true, "gas_used": -0.5, "data_size": 1}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(gas).is_err());
        let data = r#"{"success": true, "data_size": -1}"#;
        assert!(serde_json::from_str::<MeasurementRecord>(data).is_err());
    }

    #[test]
    fn rate_limit_detection() {
        assert!(failed_with("HTTP 429 Too Many Requests").is_rate_limited());
        assert!(failed_with("Rate Limited").is_rate_limited());
        assert!(failed_with("request rate exceeded").is_rate_limited());
        assert!(!failed_with("timeout").is_rate_limited());
    }

    #[test]
    fn record_without_error_is_not_rate_limited() {
        let record = MeasurementRecord {
            success: true,
            latency_ms: Some(100.0),
            gas_used: None,
            data_size: 10.0,
            error: None,
        };
        assert!(!record.is_rate_limited());
    }
}
