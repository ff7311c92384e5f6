use std::fmt;

use serde::Deserialize;

/// Column names every measurements file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["num_txns", "elapsed_ms", "num_keys", "verified"];

/// One row as it appears in the measurements CSV, before coercion.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawRecord {
    pub num_txns: u64,
    pub elapsed_ms: f64,
    pub num_keys: u64,
    /// Kept as text; `metrics::parse_verified` decides what counts as true.
    #[serde(default)]
    pub verified: String,
}

/// Rows in file order.
pub type Table = Vec<RawRecord>;

/// A record with its throughput attached and `verified` coerced to a bool.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub num_txns: u64,
    pub elapsed_ms: f64,
    pub num_keys: u64,
    pub verified: bool,
    /// Transactions per second.
    pub throughput: f64,
}

impl Measurement {
    /// Chart coordinate for this row: `(num_keys, throughput)`.
    pub fn point(&self) -> (f64, f64) {
        (self.num_keys as f64, self.throughput)
    }
}

/// Y-axis scaling of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    Linear,
    Logarithmic,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::Linear, Scale::Logarithmic];

    pub fn is_log(self) -> bool {
        matches!(self, Scale::Logarithmic)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Linear => f.write_str("linear"),
            Scale::Logarithmic => f.write_str("log"),
        }
    }
}
