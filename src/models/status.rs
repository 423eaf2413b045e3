//! Ticket statuses resolved from helpdesk metadata.
//!
//! Freshdesk lets every helpdesk renumber its statuses, so the codes for
//! Open, Pending, ... are read from the `status` ticket field. Its choices map
//! each numeric code to a list of labels, e.g. `{"2": ["Open", "Being
//! Processed"]}`.

use std::fmt;

use serde_json::Value;

use super::common::{normalize_id, Numeric};
use super::ticket_field::{choice_entries, TicketField};
use crate::error::FreshdeskError;

/// Statuses known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusName {
    /// Open
    Open,
    /// Pending
    Pending,
    /// Resolved
    Resolved,
    /// Closed
    Closed,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
}

impl StatusName {
    /// Every known status, in display order.
    pub const ALL: [StatusName; 6] = [
        StatusName::Open,
        StatusName::Pending,
        StatusName::Resolved,
        StatusName::Closed,
        StatusName::Approved,
        StatusName::Rejected,
    ];

    /// The label Freshdesk uses for this status in the status field choices.
    pub fn label(self) -> &'static str {
        match self {
            StatusName::Open => "Open",
            StatusName::Pending => "Pending",
            StatusName::Resolved => "Resolved",
            StatusName::Closed => "Closed",
            StatusName::Approved => "Approved",
            StatusName::Rejected => "Rejected",
        }
    }

    /// Looks a status up by its Freshdesk label (case-sensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.label() == label)
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status codes configured on a helpdesk.
///
/// A status missing from the metadata stays unset, and reading it returns
/// `FreshdeskError::FieldNotSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketStatus {
    open: Option<u64>,
    pending: Option<u64>,
    resolved: Option<u64>,
    closed: Option<u64>,
    approved: Option<u64>,
    rejected: Option<u64>,
}

impl TicketStatus {
    /// Parses the `status` ticket field.
    pub fn parse(field: &TicketField) -> Self {
        match &field.choices {
            Some(choices) => Self::parse_choices(choices),
            None => Self::default(),
        }
    }

    /// Parses a choices payload mapping codes to label lists.
    ///
    /// A code is assigned to every known status whose label appears in its
    /// list. Labels that are not known statuses are ignored, and so are
    /// codes that are not positive numbers, which leaves that status unset.
    pub fn parse_choices(choices: &Value) -> Self {
        let mut statuses = Self::default();

        for (code, labels) in choice_entries(choices) {
            let Some(labels) = labels.as_array() else {
                continue;
            };
            for name in StatusName::ALL {
                if labels.iter().any(|label| label.as_str() == Some(name.label())) {
                    if let Err(e) = statuses.set(name, code.as_str()) {
                        tracing::debug!(status = %name, code = %code, error = %e, "Skipping status choice");
                    }
                }
            }
        }

        statuses
    }

    fn slot(&self, name: StatusName) -> Option<u64> {
        match name {
            StatusName::Open => self.open,
            StatusName::Pending => self.pending,
            StatusName::Resolved => self.resolved,
            StatusName::Closed => self.closed,
            StatusName::Approved => self.approved,
            StatusName::Rejected => self.rejected,
        }
    }

    fn slot_mut(&mut self, name: StatusName) -> &mut Option<u64> {
        match name {
            StatusName::Open => &mut self.open,
            StatusName::Pending => &mut self.pending,
            StatusName::Resolved => &mut self.resolved,
            StatusName::Closed => &mut self.closed,
            StatusName::Approved => &mut self.approved,
            StatusName::Rejected => &mut self.rejected,
        }
    }

    /// Returns the code for `name`.
    pub fn get(&self, name: StatusName) -> Result<u64, FreshdeskError> {
        self.slot(name).ok_or(FreshdeskError::FieldNotSet {
            kind: "status",
            name: name.label(),
        })
    }

    /// Assigns the code for `name`.
    pub fn set(&mut self, name: StatusName, code: impl Numeric) -> Result<(), FreshdeskError> {
        let message = format!("Invalid {} status", name.label().to_lowercase());
        *self.slot_mut(name) = Some(normalize_id(code, &message)?);
        Ok(())
    }

    /// Returns true if the helpdesk defines `name`.
    pub fn is_set(&self, name: StatusName) -> bool {
        self.slot(name).is_some()
    }

    /// All defined statuses with their codes, in display order.
    pub fn defined(&self) -> Vec<(StatusName, u64)> {
        StatusName::ALL
            .into_iter()
            .filter_map(|name| self.slot(name).map(|code| (name, code)))
            .collect()
    }

    /// Code of the Open status.
    pub fn open(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Open)
    }

    /// Code of the Pending status.
    pub fn pending(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Pending)
    }

    /// Code of the Resolved status.
    pub fn resolved(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Resolved)
    }

    /// Code of the Closed status.
    pub fn closed(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Closed)
    }

    /// Code of the Approved status.
    pub fn approved(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Approved)
    }

    /// Code of the Rejected status.
    pub fn rejected(&self) -> Result<u64, FreshdeskError> {
        self.get(StatusName::Rejected)
    }
}
