//! Leverage segmentation of daily trader rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Leverage bucket for one joined row, derived from its mean daily leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeverageSegment {
    /// Mean leverage strictly above the threshold.
    #[serde(rename = "High Leverage")]
    High,
    /// Mean leverage at or below the threshold.
    #[serde(rename = "Low Leverage")]
    Low,
}

impl LeverageSegment {
    /// Both segments, in display order.
    pub const ALL: [Self; 2] = [Self::High, Self::Low];

    /// Classifies a leverage value. The comparison is strict, so a value
    /// equal to the threshold is `Low`.
    #[must_use]
    pub fn classify(leverage: f64, threshold: f64) -> Self {
        if leverage > threshold {
            Self::High
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High Leverage",
            Self::Low => "Low Leverage",
        }
    }
}

impl fmt::Display for LeverageSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
