use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-page rates in currency units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RateCard {
    pub color_single: f64,
    pub color_double: f64,
    pub bw_single: f64,
    pub bw_double: f64,
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            color_single: COLOR_SINGLE_RATE,
            color_double: COLOR_DOUBLE_RATE,
            bw_single: BW_SINGLE_RATE,
            bw_double: BW_DOUBLE_RATE,
        }
    }
}

impl RateCard {
    pub fn color_rate(&self, duplex: bool) -> f64 {
        if duplex {
            self.color_double
        } else {
            self.color_single
        }
    }

    pub fn bw_rate(&self, duplex: bool) -> f64 {
        if duplex { self.bw_double } else { self.bw_single }
    }

    /// Load a rate card from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let rates: RateCard = serde_json::from_slice(&bytes)
            .map_err(|e| QuoteError::Config(format!("Failed to parse rate card: {}", e)))?;
        rates.validate()?;
        Ok(rates)
    }

    /// Save the rate card to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QuoteError::Config(format!("Failed to serialize rate card: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Rates must be finite and non-negative so prices never go below zero
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("color_single", self.color_single),
            ("color_double", self.color_double),
            ("bw_single", self.bw_single),
            ("bw_double", self.bw_double),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(QuoteError::Config(format!(
                    "Rate {} must be a non-negative number, got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}
