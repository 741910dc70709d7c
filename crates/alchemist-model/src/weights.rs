//! Prioritization weights exported alongside the rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Upper bound for every weight slider.
pub const MAX_WEIGHT: u8 = 10;

/// Relative importance of scheduling objectives, each in `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizationWeights {
    pub priority: u8,
    pub fairness: u8,
    pub load: u8,
}

impl Default for PrioritizationWeights {
    fn default() -> Self {
        Self {
            priority: 5,
            fairness: 5,
            load: 5,
        }
    }
}

impl PrioritizationWeights {
    pub fn new(priority: u8, fairness: u8, load: u8) -> Result<Self> {
        let weights = Self {
            priority,
            fairness,
            load,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("priority", self.priority),
            ("fairness", self.fairness),
            ("load", self.load),
        ] {
            if value > MAX_WEIGHT {
                return Err(ModelError::WeightOutOfRange { name, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_priority(mut self, value: u8) -> Self {
        self.priority = value;
        self
    }

    #[must_use]
    pub fn with_fairness(mut self, value: u8) -> Self {
        self.fairness = value;
        self
    }

    #[must_use]
    pub fn with_load(mut self, value: u8) -> Self {
        self.load = value;
        self
    }
}

/// Named weight configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightPreset {
    MaximizeFulfillment,
    FairDistribution,
    MinimizeWorkload,
}

impl WeightPreset {
    pub fn weights(&self) -> PrioritizationWeights {
        match self {
            WeightPreset::MaximizeFulfillment => PrioritizationWeights {
                priority: 10,
                fairness: 2,
                load: 1,
            },
            WeightPreset::FairDistribution => PrioritizationWeights {
                priority: 5,
                fairness: 10,
                load: 5,
            },
            WeightPreset::MinimizeWorkload => PrioritizationWeights {
                priority: 2,
                fairness: 2,
                load: 10,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightPreset::MaximizeFulfillment => "maximize-fulfillment",
            WeightPreset::FairDistribution => "fair-distribution",
            WeightPreset::MinimizeWorkload => "minimize-workload",
        }
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightPreset {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "maximize-fulfillment" | "fulfillment" => Ok(WeightPreset::MaximizeFulfillment),
            "fair-distribution" | "fair" => Ok(WeightPreset::FairDistribution),
            "minimize-workload" | "load" => Ok(WeightPreset::MinimizeWorkload),
            _ => Err(ModelError::UnknownPreset(s.to_string())),
        }
    }
}
