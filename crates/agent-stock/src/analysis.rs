//! Threshold-based price classification
//!
//! Two independent ladders are applied to the price: one for the analysis
//! label and risk tier (200 / 50), one for the recommendation (100 / 20).
//! Lower bounds are inclusive, so a price sitting exactly on a threshold
//! belongs to the higher band.

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const HIGH_VALUE_FLOOR: f64 = 200.0;
const MID_RANGE_FLOOR: f64 = 50.0;
const HOLD_FLOOR: f64 = 100.0;
const BUY_FLOOR: f64 = 20.0;

/// A price as returned by the provider together with its numeric value
///
/// The provider text is kept verbatim for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    raw: String,
    value: f64,
}

impl Price {
    /// Parse a decimal price string
    pub fn parse(raw: &str) -> Result<Self> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| StockError::InvalidPrice(raw.to_string()))?;

        if !value.is_finite() {
            return Err(StockError::InvalidPrice(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            value,
        })
    }

    /// The price text as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The numeric value
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl FromStr for Price {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Qualitative label for the price level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisLabel {
    HighValue,
    MidRange,
    LowerPriced,
}

impl AnalysisLabel {
    /// Label for a price on the 200 / 50 ladder
    pub fn for_price(price: f64) -> Self {
        if price >= HIGH_VALUE_FLOOR {
            Self::HighValue
        } else if price >= MID_RANGE_FLOOR {
            Self::MidRange
        } else {
            Self::LowerPriced
        }
    }

    /// Commentary shown under ANALYSIS
    pub fn commentary(self) -> &'static str {
        match self {
            Self::HighValue => "High-value stock, consider market conditions before investing.",
            Self::MidRange => "Mid-range stock, good for diversified portfolio.",
            Self::LowerPriced => "Lower-priced stock, potential growth opportunity.",
        }
    }
}

/// Recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    HoldMonitor,
    Research,
}

impl Recommendation {
    /// Recommendation for a price on the 100 / 20 ladder
    pub fn for_price(price: f64) -> Self {
        if price >= HOLD_FLOOR {
            Self::HoldMonitor
        } else if price >= BUY_FLOOR {
            Self::Buy
        } else {
            Self::Research
        }
    }

    /// Short label, e.g. `HOLD/MONITOR`
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::HoldMonitor => "HOLD/MONITOR",
            Self::Research => "RESEARCH",
        }
    }

    /// Line shown under INVESTMENT GRADE
    pub fn grade(self) -> &'static str {
        match self {
            Self::Buy => "🟢 BUY - Good entry point",
            Self::HoldMonitor => "🟡 HOLD/MONITOR - Watch for opportunities",
            Self::Research => "🔍 RESEARCH - Requires further analysis",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Lower,
}

impl RiskTier {
    /// Risk tier for a price on the 200 / 50 ladder
    pub fn for_price(price: f64) -> Self {
        match AnalysisLabel::for_price(price) {
            AnalysisLabel::HighValue => Self::High,
            AnalysisLabel::MidRange => Self::Medium,
            AnalysisLabel::LowerPriced => Self::Lower,
        }
    }

    /// Short label, e.g. `MEDIUM`
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Lower => "LOWER",
        }
    }

    /// Line shown under RISK ASSESSMENT
    pub fn assessment(self) -> &'static str {
        match self {
            Self::High => "HIGH - Premium stock, higher volatility expected",
            Self::Medium => "MEDIUM - Moderate risk/reward profile",
            Self::Lower => "LOWER - Higher growth potential but increased risk",
        }
    }
}

/// Classification of a single price observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    pub symbol: String,
    /// Price exactly as the provider returned it
    pub price: String,
    /// ISO-8601 time the price was observed
    pub timestamp: String,
    pub analysis_label: AnalysisLabel,
    pub recommendation: Recommendation,
    pub risk_tier: RiskTier,
}

/// Classify a price
pub fn classify(symbol: &str, price: &Price, timestamp: &str) -> StockReport {
    let value = price.value();
    StockReport {
        symbol: symbol.to_string(),
        price: price.as_str().to_string(),
        timestamp: timestamp.to_string(),
        analysis_label: AnalysisLabel::for_price(value),
        recommendation: Recommendation::for_price(value),
        risk_tier: RiskTier::for_price(value),
    }
}
