//! Usage snapshots and warning levels
//!
//! A [`Usage`] snapshot mirrors the backend's point-in-time measurement of
//! consumption against entitlements. Limits come over the wire as signed
//! integers where `-1` means unlimited, so percentage math guards against
//! non-positive limits rather than dividing by the sentinel.

use serde::{Deserialize, Serialize};

/// A point-in-time usage snapshot fetched from the billing status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Chat queries used this billing period
    #[serde(default)]
    pub queries_used: i64,

    /// Query limit for the period (`-1` = unlimited)
    #[serde(default)]
    pub queries_limit: i64,

    /// Document storage used, in bytes
    #[serde(default)]
    pub storage_used: i64,

    /// Storage limit in bytes (`-1` = unlimited)
    #[serde(default)]
    pub storage_limit: i64,
}

impl Usage {
    /// Percent of the query quota consumed.
    ///
    /// Returns `0.0` when the limit is zero, negative, or unlimited.
    pub fn percent_queries_used(&self) -> f64 {
        percent(self.queries_used, self.queries_limit)
    }

    /// Percent of the storage quota consumed.
    ///
    /// Returns `0.0` when the limit is zero, negative, or unlimited.
    pub fn percent_storage_used(&self) -> f64 {
        percent(self.storage_used, self.storage_limit)
    }

    /// The higher of the two consumption percentages.
    pub fn max_percent_used(&self) -> f64 {
        self.percent_queries_used().max(self.percent_storage_used())
    }

    /// Derive the warning level for this snapshot.
    pub fn warning_level(&self) -> UsageWarning {
        UsageWarning::from_percent(self.max_percent_used())
    }
}

fn percent(used: i64, limit: i64) -> f64 {
    if limit <= 0 {
        return 0.0;
    }
    used as f64 / limit as f64 * 100.0
}

/// Severity derived from usage percentages.
///
/// Drives which alert banner, if any, is shown and whether upgrade CTAs are
/// emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageWarning {
    /// Below 75% on both axes
    None,
    /// At or above 75%
    Moderate,
    /// At or above 90%
    High,
    /// At or above 100%
    Critical,
}

impl UsageWarning {
    /// Map a consumption percentage onto a warning level.
    ///
    /// Thresholds at 75/90/100 partition the domain; below 75 is `None`.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            UsageWarning::Critical
        } else if percent >= 90.0 {
            UsageWarning::High
        } else if percent >= 75.0 {
            UsageWarning::Moderate
        } else {
            UsageWarning::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(queries_used: i64, queries_limit: i64, storage_used: i64, storage_limit: i64) -> Usage {
        Usage {
            queries_used,
            queries_limit,
            storage_used,
            storage_limit,
        }
    }

    #[test]
    fn test_percent_math() {
        let usage = snapshot(50, 100, 0, 100);
        assert_eq!(usage.percent_queries_used(), 50.0);
        assert_eq!(usage.percent_storage_used(), 0.0);
        assert_eq!(usage.max_percent_used(), 50.0);
    }

    #[test]
    fn test_unlimited_sentinel_never_divides() {
        let usage = snapshot(1_000_000, -1, 5, 0);
        assert_eq!(usage.percent_queries_used(), 0.0);
        assert_eq!(usage.percent_storage_used(), 0.0);
        assert_eq!(usage.warning_level(), UsageWarning::None);
    }

    #[test]
    fn test_warning_thresholds() {
        assert_eq!(UsageWarning::from_percent(0.0), UsageWarning::None);
        assert_eq!(UsageWarning::from_percent(74.9), UsageWarning::None);
        assert_eq!(UsageWarning::from_percent(75.0), UsageWarning::Moderate);
        assert_eq!(UsageWarning::from_percent(89.9), UsageWarning::Moderate);
        assert_eq!(UsageWarning::from_percent(90.0), UsageWarning::High);
        assert_eq!(UsageWarning::from_percent(99.9), UsageWarning::High);
        assert_eq!(UsageWarning::from_percent(100.0), UsageWarning::Critical);
        assert_eq!(UsageWarning::from_percent(140.0), UsageWarning::Critical);
    }

    #[test]
    fn test_warning_is_monotonic_in_percent() {
        let mut last = UsageWarning::None;
        for tenth in 0..1200 {
            let level = UsageWarning::from_percent(tenth as f64 / 10.0);
            assert!(level >= last, "warning level regressed at {}", tenth);
            last = level;
        }
    }

    #[test]
    fn test_single_axis_exhaustion_is_critical() {
        let usage = snapshot(100, 100, 0, 100);
        assert_eq!(usage.percent_queries_used(), 100.0);
        assert_eq!(usage.percent_storage_used(), 0.0);
        assert_eq!(usage.warning_level(), UsageWarning::Critical);
    }

    #[test]
    fn test_wire_decoding_is_lenient() {
        let usage: Usage = serde_json::from_str("{}").unwrap();
        assert_eq!(usage.queries_used, 0);
        assert_eq!(usage.warning_level(), UsageWarning::None);

        let usage: Usage =
            serde_json::from_str(r#"{"queriesUsed":95,"queriesLimit":100}"#).unwrap();
        assert_eq!(usage.warning_level(), UsageWarning::High);
    }
}
