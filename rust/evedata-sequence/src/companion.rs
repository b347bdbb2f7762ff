//! Bookkeeping recorded alongside averaged and interval-detector measurements.
//!
//! These vectors run parallel to the owning series' position references and
//! are carried through joins untouched.

use serde::{Deserialize, Serialize};

/// Average/limit bookkeeping of an averaged channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageData {
    /// Maximum allowed attempts for limit measurements.
    #[serde(default)]
    pub max_attempts: Vec<i32>,
    /// Used attempts for limit measurements.
    #[serde(default)]
    pub attempts: Vec<i32>,
    /// Used measurement count.
    #[serde(default)]
    pub count: Vec<i32>,
    /// Preset count of measurements.
    #[serde(default)]
    pub max_count: Vec<i32>,
    /// Preset limit.
    #[serde(default)]
    pub limit: Vec<f64>,
    /// Preset allowed maximum deviation.
    #[serde(default)]
    pub max_deviation: Vec<f64>,
}

impl AverageData {
    /// Lengths of the non-empty vectors; all must agree with the series length.
    pub(crate) fn lengths(&self) -> impl Iterator<Item = usize> {
        [
            self.max_attempts.len(),
            self.attempts.len(),
            self.count.len(),
            self.max_count.len(),
            self.limit.len(),
            self.max_deviation.len(),
        ]
        .into_iter()
        .filter(|&len| len != 0)
    }
}

/// Standard-deviation bookkeeping of an interval detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StdDeviationData {
    /// Count of measurements per position reference.
    #[serde(default)]
    pub count: Vec<f64>,
    /// Standard deviation per position reference.
    #[serde(default)]
    pub deviation: Vec<f64>,
}

impl StdDeviationData {
    pub(crate) fn lengths(&self) -> impl Iterator<Item = usize> {
        [self.count.len(), self.deviation.len()]
            .into_iter()
            .filter(|&len| len != 0)
    }
}
