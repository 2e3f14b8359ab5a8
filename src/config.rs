use std::path::PathBuf;
use tracing::warn;

use crate::usage::{AggregationOptions, MissingMetricPolicy, DEFAULT_CUTOFF_FRACTION};

/// Runtime configuration, read from `USAGEBOARD_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    /// When set, documents are fetched over HTTP instead of from `data_dir`
    pub data_url: Option<String>,
    pub palette_file: Option<PathBuf>,
    pub aggregation: AggregationOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            data_dir: PathBuf::from("data"),
            data_url: None,
            palette_file: None,
            aggregation: AggregationOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup; unparseable values fall
    /// back to defaults with a warning
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let cutoff_fraction = match var("USAGEBOARD_CUTOFF") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid USAGEBOARD_CUTOFF, using default");
                DEFAULT_CUTOFF_FRACTION
            }),
            None => DEFAULT_CUTOFF_FRACTION,
        };

        let missing_metric = match var("USAGEBOARD_MISSING_METRIC") {
            Some(raw) => parse_missing_metric(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Invalid USAGEBOARD_MISSING_METRIC, using skip");
                MissingMetricPolicy::Skip
            }),
            None => MissingMetricPolicy::default(),
        };

        Self {
            bind_addr: var("USAGEBOARD_BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_dir: var("USAGEBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            data_url: var("USAGEBOARD_DATA_URL"),
            palette_file: var("USAGEBOARD_PALETTE_FILE").map(PathBuf::from),
            aggregation: AggregationOptions {
                cutoff_fraction,
                missing_metric,
            },
        }
    }
}

/// `skip`, or a number to substitute for missing metrics
fn parse_missing_metric(raw: &str) -> Option<MissingMetricPolicy> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("skip") {
        return Some(MissingMetricPolicy::Skip);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(MissingMetricPolicy::Neutral)
}
