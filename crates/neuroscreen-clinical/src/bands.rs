//! Severity bands and threshold tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a band in its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BandTier {
    /// Value missing; sorts below every graded tier
    NoData,
    /// 1-based position of the matched band, overflow band last
    Graded(u8),
}

/// Human-readable interpretation of one metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBand {
    pub text: String,
    pub tier: BandTier,
}

impl SeverityBand {
    pub fn no_data(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tier: BandTier::NoData,
        }
    }

    pub fn graded(text: impl Into<String>, tier: u8) -> Self {
        Self {
            text: text.into(),
            tier: BandTier::Graded(tier),
        }
    }

    pub fn has_data(&self) -> bool {
        self.tier != BandTier::NoData
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// How a value is compared against band limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// First band with `value < limit`
    Ascending,
    /// First band with `value >= limit`
    Descending,
}

/// One row of a threshold table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub limit: f64,
    pub label: String,
}

impl Threshold {
    pub fn new(limit: f64, label: impl Into<String>) -> Self {
        Self {
            limit,
            label: label.into(),
        }
    }
}

/// Fixed threshold table for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub direction: Direction,
    pub bands: Vec<Threshold>,

    /// Label for values past the last band
    pub overflow_label: String,

    /// Label for a missing value
    pub no_data_label: String,
}

impl ThresholdTable {
    pub fn ascending(bands: Vec<Threshold>, overflow_label: &str) -> Self {
        Self {
            direction: Direction::Ascending,
            bands,
            overflow_label: overflow_label.to_string(),
            no_data_label: "No data".to_string(),
        }
    }

    pub fn descending(bands: Vec<Threshold>, overflow_label: &str) -> Self {
        Self {
            direction: Direction::Descending,
            ..Self::ascending(bands, overflow_label)
        }
    }

    /// Map a value onto its band.
    ///
    /// `None` and non-finite values map to the no-data band.
    pub fn classify(&self, value: Option<f64>) -> SeverityBand {
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => return SeverityBand::no_data(&self.no_data_label),
        };

        let matched = self.bands.iter().position(|band| match self.direction {
            Direction::Ascending => value < band.limit,
            Direction::Descending => value >= band.limit,
        });

        match matched {
            Some(i) => SeverityBand::graded(&self.bands[i].label, tier(i)),
            None => SeverityBand::graded(&self.overflow_label, tier(self.bands.len())),
        }
    }

    /// Limits must be strictly increasing (ascending) or strictly
    /// decreasing (descending) for the first-match rule to be meaningful
    pub fn is_ordered(&self) -> bool {
        self.bands.windows(2).all(|w| match self.direction {
            Direction::Ascending => w[0].limit < w[1].limit,
            Direction::Descending => w[0].limit > w[1].limit,
        })
    }

    /// Number of graded tiers, overflow included
    pub fn tier_count(&self) -> usize {
        self.bands.len() + 1
    }
}

fn tier(index: usize) -> u8 {
    u8::try_from(index + 1).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending() -> ThresholdTable {
        ThresholdTable::ascending(
            vec![Threshold::new(1.0, "low"), Threshold::new(2.0, "mid")],
            "high",
        )
    }

    #[test]
    fn test_ascending_half_open() {
        let table = ascending();
        assert_eq!(table.classify(Some(0.5)), SeverityBand::graded("low", 1));
        assert_eq!(table.classify(Some(1.0)), SeverityBand::graded("mid", 2));
        assert_eq!(table.classify(Some(1.999)), SeverityBand::graded("mid", 2));
        assert_eq!(table.classify(Some(2.0)), SeverityBand::graded("high", 3));
        assert_eq!(table.classify(Some(-3.0)), SeverityBand::graded("low", 1));
    }

    #[test]
    fn test_descending_inclusive_lower() {
        let table = ThresholdTable::descending(
            vec![Threshold::new(10.0, "good"), Threshold::new(0.0, "poor")],
            "invalid",
        );
        assert_eq!(table.classify(Some(10.0)), SeverityBand::graded("good", 1));
        assert_eq!(table.classify(Some(9.0)), SeverityBand::graded("poor", 2));
        assert_eq!(table.classify(Some(0.0)), SeverityBand::graded("poor", 2));
        assert_eq!(table.classify(Some(-1.0)), SeverityBand::graded("invalid", 3));
    }

    #[test]
    fn test_missing_is_no_data_not_lowest_band() {
        let table = ascending();
        let band = table.classify(None);
        assert_eq!(band, SeverityBand::no_data("No data"));
        assert!(!band.has_data());
        assert_ne!(band, table.classify(Some(0.0)));
        assert_eq!(table.classify(Some(f64::NAN)).tier, BandTier::NoData);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(BandTier::NoData < BandTier::Graded(1));
        assert!(BandTier::Graded(1) < BandTier::Graded(4));
    }

    #[test]
    fn test_is_ordered() {
        assert!(ascending().is_ordered());
        let bad = ThresholdTable::ascending(
            vec![Threshold::new(2.0, "a"), Threshold::new(1.0, "b")],
            "c",
        );
        assert!(!bad.is_ordered());
        assert_eq!(ascending().tier_count(), 3);
    }
}
