//! Entity kinds handled by the workbook.
//!
//! Three of them are tables uploaded by the user (clients, workers, tasks);
//! the fourth (rules) only ever carries rule-set level validation errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Entity a table or a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Clients,
    Workers,
    Tasks,
    Rules,
}

const CLIENT_REQUIRED: &[&str] = &[
    "ClientID",
    "PriorityLevel",
    "RequestedTaskIDs",
    "GroupTag",
    "AttributesJSON",
];
const WORKER_REQUIRED: &[&str] = &["WorkerID", "AvailableSlots", "Skills", "MaxLoadPerPhase"];
const TASK_REQUIRED: &[&str] = &[
    "TaskID",
    "Duration",
    "PreferredPhases",
    "RequiredSkills",
    "MaxConcurrent",
];

const CLIENT_FIELDS: &[&str] = &[
    "ClientID",
    "ClientName",
    "PriorityLevel",
    "RequestedTaskIDs",
    "GroupTag",
    "AttributesJSON",
];
const WORKER_FIELDS: &[&str] = &[
    "WorkerID",
    "WorkerName",
    "Skills",
    "AvailableSlots",
    "MaxLoadPerPhase",
    "WorkerGroup",
    "QualificationLevel",
];
const TASK_FIELDS: &[&str] = &[
    "TaskID",
    "TaskName",
    "Category",
    "Duration",
    "RequiredSkills",
    "PreferredPhases",
    "MaxConcurrent",
];

impl Entity {
    /// The three table entities, in display order.
    pub const TABLES: [Entity; 3] = [Entity::Clients, Entity::Workers, Entity::Tasks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Clients => "clients",
            Entity::Workers => "workers",
            Entity::Tasks => "tasks",
            Entity::Rules => "rules",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Entity::Clients => "Clients",
            Entity::Workers => "Workers",
            Entity::Tasks => "Tasks",
            Entity::Rules => "Rules",
        }
    }

    /// Primary key column, if the entity is a table.
    pub fn id_field(&self) -> Option<&'static str> {
        match self {
            Entity::Clients => Some("ClientID"),
            Entity::Workers => Some("WorkerID"),
            Entity::Tasks => Some("TaskID"),
            Entity::Rules => None,
        }
    }

    /// Columns that must be present in an uploaded table.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Clients => CLIENT_REQUIRED,
            Entity::Workers => WORKER_REQUIRED,
            Entity::Tasks => TASK_REQUIRED,
            Entity::Rules => &[],
        }
    }

    /// Every canonical column the entity knows about, required or not.
    pub fn known_fields(&self) -> &'static [&'static str] {
        match self {
            Entity::Clients => CLIENT_FIELDS,
            Entity::Workers => WORKER_FIELDS,
            Entity::Tasks => TASK_FIELDS,
            Entity::Rules => &[],
        }
    }

    pub fn is_table(&self) -> bool {
        !matches!(self, Entity::Rules)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = ModelError;

    /// Accepts singular and plural forms, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clients" | "client" => Ok(Entity::Clients),
            "workers" | "worker" => Ok(Entity::Workers),
            "tasks" | "task" => Ok(Entity::Tasks),
            "rules" | "rule" => Ok(Entity::Rules),
            _ => Err(ModelError::UnknownEntity(s.to_string())),
        }
    }
}
