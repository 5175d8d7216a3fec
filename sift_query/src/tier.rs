// Copyright 2025 the Sift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Price tier bucketing.

use core::fmt;

use sift_core::Value;

/// Boundaries between price tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceThresholds {
    /// Prices below this are [`PriceTier::Low`].
    pub low: f64,
    /// Prices below this (and not low) are [`PriceTier::Medium`].
    pub high: f64,
}

impl PriceThresholds {
    /// Creates thresholds; `low` should not exceed `high`.
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Default for PriceThresholds {
    fn default() -> Self {
        Self::new(10.0, 100.0)
    }
}

/// A closed set of price buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceTier {
    /// Below `low`.
    Low,
    /// At least `low`, below `high`.
    Medium,
    /// At least `high`.
    High,
}

impl PriceTier {
    /// Buckets a price.
    pub fn classify(price: f64, thresholds: PriceThresholds) -> Self {
        if price < thresholds.low {
            Self::Low
        } else if price < thresholds.high {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PriceTier> for Value {
    fn from(tier: PriceTier) -> Self {
        Self::from(tier.name())
    }
}
