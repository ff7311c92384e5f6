use thiserror::Error;

use crate::types::{Measurement, RawRecord};

/// Errors raised while deriving per-row metrics. Rows are numbered from 1,
/// not counting the header.
#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("row {row}: elapsed_ms must be a positive number, got {value}")]
    InvalidElapsed { row: usize, value: f64 },
    #[error("row {row}: cannot interpret verified value '{value}' as a boolean")]
    InvalidVerified { row: usize, value: String },
}

/// Transactions per second for `num_txns` completed in `elapsed_ms`.
pub fn throughput(num_txns: u64, elapsed_ms: f64) -> f64 {
    num_txns as f64 * 1000.0 / elapsed_ms
}

/// Coerces a `verified` cell to a bool.
///
/// Accepts `true`/`false` (also `t`/`f`, `yes`/`no`) in any case, and numbers,
/// where anything non-zero is true. An empty cell is false. Returns `None` for
/// anything else.
pub fn parse_verified(raw: &str) -> Option<bool> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(false);
    }

    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" => return Some(true),
        "false" | "f" | "no" => return Some(false),
        _ => {}
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|number| !number.is_nan())
        .map(|number| number != 0.0)
}

/// Attaches throughput to every row and normalizes `verified`.
pub fn compute(table: &[RawRecord]) -> Result<Vec<Measurement>, MetricError> {
    table
        .iter()
        .enumerate()
        .map(|(idx, record)| measure(idx + 1, record))
        .collect()
}

fn measure(row: usize, record: &RawRecord) -> Result<Measurement, MetricError> {
    if !(record.elapsed_ms.is_finite() && record.elapsed_ms > 0.0) {
        return Err(MetricError::InvalidElapsed {
            row,
            value: record.elapsed_ms,
        });
    }

    let verified =
        parse_verified(&record.verified).ok_or_else(|| MetricError::InvalidVerified {
            row,
            value: record.verified.clone(),
        })?;

    Ok(Measurement {
        num_txns: record.num_txns,
        elapsed_ms: record.elapsed_ms,
        num_keys: record.num_keys,
        verified,
        throughput: throughput(record.num_txns, record.elapsed_ms),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(num_txns: u64, elapsed_ms: f64, num_keys: u64, verified: &str) -> RawRecord {
        RawRecord {
            num_txns,
            elapsed_ms,
            num_keys,
            verified: verified.to_string(),
        }
    }

    #[test]
    fn throughput_is_transactions_per_second() {
        assert_eq!(throughput(100, 50.0), 2000.0);
        assert_eq!(throughput(200, 100.0), 2000.0);
        assert!((throughput(9999, 12345.0) - 809.963_547_995_1).abs() < 1e-6);
    }

    #[test]
    fn verified_coercion() {
        for truthy in ["True", "true", "TRUE", "t", "Yes", "1", "2", "-1", "0.5", " true "] {
            assert_eq!(parse_verified(truthy), Some(true), "{truthy}");
        }
        for falsy in ["False", "false", "F", "no", "0", "0.0", "", "  "] {
            assert_eq!(parse_verified(falsy), Some(false), "{falsy:?}");
        }
        assert_eq!(parse_verified("maybe"), None);
        assert_eq!(parse_verified("NaN"), None);
    }

    #[test]
    fn compute_attaches_throughput() {
        let rows = vec![record(100, 50.0, 10, "True"), record(200, 100.0, 20, "False")];
        let measured = compute(&rows).unwrap();

        let throughputs: Vec<f64> = measured.iter().map(|m| m.throughput).collect();
        assert_eq!(throughputs, vec![2000.0, 2000.0]);
        assert!(measured[0].verified);
        assert!(!measured[1].verified);
        assert_eq!(measured[1].point(), (20.0, 2000.0));
    }

    #[test]
    fn zero_elapsed_is_rejected() {
        let rows = vec![record(100, 50.0, 10, "True"), record(10, 0.0, 20, "True")];
        assert_eq!(
            compute(&rows),
            Err(MetricError::InvalidElapsed { row: 2, value: 0.0 })
        );
    }

    #[test]
    fn unknown_verified_text_is_rejected() {
        let rows = vec![record(100, 50.0, 10, "sometimes")];
        assert_eq!(
            compute(&rows),
            Err(MetricError::InvalidVerified {
                row: 1,
                value: "sometimes".into()
            })
        );
    }
}
