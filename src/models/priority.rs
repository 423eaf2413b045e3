//! Ticket priorities resolved from helpdesk metadata.
//!
//! The `priority` ticket field maps each label straight to its code, e.g.
//! `{"Low": 1, "Medium": 2}`.

use std::fmt;

use serde_json::Value;

use super::common::{normalize_id, Numeric};
use super::ticket_field::{choice_entries, TicketField};
use crate::error::FreshdeskError;

/// Priorities known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityName {
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
    /// Urgent
    Urgent,
}

impl PriorityName {
    /// Every known priority, lowest first.
    pub const ALL: [PriorityName; 4] = [
        PriorityName::Low,
        PriorityName::Medium,
        PriorityName::High,
        PriorityName::Urgent,
    ];

    /// The choice key Freshdesk uses for this priority.
    pub fn label(self) -> &'static str {
        match self {
            PriorityName::Low => "Low",
            PriorityName::Medium => "Medium",
            PriorityName::High => "High",
            PriorityName::Urgent => "Urgent",
        }
    }

    /// Looks a priority up by its choice key (case-sensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.label() == label)
    }
}

impl fmt::Display for PriorityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priority codes configured on a helpdesk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPriority {
    low: Option<u64>,
    medium: Option<u64>,
    high: Option<u64>,
    urgent: Option<u64>,
}

impl TicketPriority {
    /// Parses the `priority` ticket field.
    pub fn parse(field: &TicketField) -> Self {
        match &field.choices {
            Some(choices) => Self::parse_choices(choices),
            None => Self::default(),
        }
    }

    /// Parses a choices payload mapping labels to codes.
    ///
    /// Keys that are not known priorities are ignored. A known priority whose
    /// value is not a positive number stays unset.
    pub fn parse_choices(choices: &Value) -> Self {
        let mut priorities = Self::default();

        for (key, code) in choice_entries(choices) {
            if let Some(name) = PriorityName::from_label(&key) {
                if let Err(e) = priorities.set(name, code) {
                    tracing::debug!(priority = %name, error = %e, "Skipping priority choice");
                }
            }
        }

        priorities
    }

    fn slot(&self, name: PriorityName) -> Option<u64> {
        match name {
            PriorityName::Low => self.low,
            PriorityName::Medium => self.medium,
            PriorityName::High => self.high,
            PriorityName::Urgent => self.urgent,
        }
    }

    fn slot_mut(&mut self, name: PriorityName) -> &mut Option<u64> {
        match name {
            PriorityName::Low => &mut self.low,
            PriorityName::Medium => &mut self.medium,
            PriorityName::High => &mut self.high,
            PriorityName::Urgent => &mut self.urgent,
        }
    }

    /// Returns the code for `name`.
    pub fn get(&self, name: PriorityName) -> Result<u64, FreshdeskError> {
        self.slot(name).ok_or(FreshdeskError::FieldNotSet {
            kind: "priority",
            name: name.label(),
        })
    }

    /// Assigns the code for `name`.
    pub fn set(&mut self, name: PriorityName, code: impl Numeric) -> Result<(), FreshdeskError> {
        *self.slot_mut(name) = Some(normalize_id(code, "Invalid priority")?);
        Ok(())
    }

    /// Returns true if the helpdesk defines `name`.
    pub fn is_set(&self, name: PriorityName) -> bool {
        self.slot(name).is_some()
    }

    /// All defined priorities with their codes, lowest first.
    pub fn defined(&self) -> Vec<(PriorityName, u64)> {
        PriorityName::ALL
            .into_iter()
            .filter_map(|name| self.slot(name).map(|code| (name, code)))
            .collect()
    }

    /// Code of the Low priority.
    pub fn low(&self) -> Result<u64, FreshdeskError> {
        self.get(PriorityName::Low)
    }

    /// Code of the Medium priority.
    pub fn medium(&self) -> Result<u64, FreshdeskError> {
        self.get(PriorityName::Medium)
    }

    /// Code of the High priority.
    pub fn high(&self) -> Result<u64, FreshdeskError> {
        self.get(PriorityName::High)
    }

    /// Code of the Urgent priority.
    pub fn urgent(&self) -> Result<u64, FreshdeskError> {
        self.get(PriorityName::Urgent)
    }
}
