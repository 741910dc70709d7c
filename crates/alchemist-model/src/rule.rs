//! Scheduling rules.
//!
//! Rules use the `{"type": ..., "config": {...}}` JSON shape both for input
//! (manual forms, suggestion output, rule files) and for export.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::weights::PrioritizationWeights;

/// Tasks that must run together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoRunConfig {
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRestrictionConfig {
    pub group: String,
    pub min_common_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadLimitConfig {
    pub group: String,
    pub max_slots_per_phase: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseWindowConfig {
    pub task: String,
    pub allowed_phases: Vec<u32>,
}

/// A scheduling rule. Closed set; every consumer matches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum Rule {
    CoRun(CoRunConfig),
    SlotRestriction(SlotRestrictionConfig),
    LoadLimit(LoadLimitConfig),
    PhaseWindow(PhaseWindowConfig),
}

impl Rule {
    pub fn co_run<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::CoRun(CoRunConfig {
            tasks: tasks.into_iter().map(Into::into).collect(),
        })
    }

    /// The `type` tag used in JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            Rule::CoRun(_) => "coRun",
            Rule::SlotRestriction(_) => "slotRestriction",
            Rule::LoadLimit(_) => "loadLimit",
            Rule::PhaseWindow(_) => "phaseWindow",
        }
    }

    /// Parses a single rule from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::CoRun(config) => write!(f, "coRun [{}]", config.tasks.join(", ")),
            Rule::SlotRestriction(config) => write!(
                f,
                "slotRestriction group={} minCommonSlots={}",
                config.group, config.min_common_slots
            ),
            Rule::LoadLimit(config) => write!(
                f,
                "loadLimit group={} maxSlotsPerPhase={}",
                config.group, config.max_slots_per_phase
            ),
            Rule::PhaseWindow(config) => {
                let phases: Vec<String> =
                    config.allowed_phases.iter().map(u32::to_string).collect();
                write!(f, "phaseWindow task={} phases=[{}]", config.task, phases.join(", "))
            }
        }
    }
}

const WEIGHTS_TYPE: &str = "weights";

/// Contents of an exported `rules.json`: the rules followed by an optional
/// `{"type": "weights", ...}` entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesDocument {
    pub rules: Vec<Rule>,
    pub weights: Option<PrioritizationWeights>,
}

impl RulesDocument {
    pub fn new(rules: Vec<Rule>, weights: Option<PrioritizationWeights>) -> Self {
        Self { rules, weights }
    }

    /// Parses a rules document. A bare rule object is accepted as a one-rule
    /// document.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(_) => vec![value],
            _ => return Err(ModelError::RulesNotArray),
        };
        let mut document = RulesDocument::default();
        for entry in entries {
            if entry.get("type").and_then(Value::as_str) == Some(WEIGHTS_TYPE) {
                let config = entry.get("config").cloned().unwrap_or(Value::Null);
                let weights: PrioritizationWeights = serde_json::from_value(config)?;
                weights.validate()?;
                document.weights = Some(weights);
                continue;
            }
            document.rules.push(serde_json::from_value(entry)?);
        }
        Ok(document)
    }

    /// JSON array form, weights entry last.
    pub fn to_json_value(&self) -> Result<Value> {
        let mut entries = Vec::with_capacity(self.rules.len() + 1);
        for rule in &self.rules {
            entries.push(serde_json::to_value(rule)?);
        }
        if let Some(weights) = &self.weights {
            entries.push(serde_json::json!({
                "type": WEIGHTS_TYPE,
                "config": weights,
            }));
        }
        Ok(Value::Array(entries))
    }
}
