//! Change tracking for ticket updates.
//!
//! A `ChangeSet` remembers the latest value written to each tracked ticket
//! property so that `PUT /tickets/{id}` only carries modified fields.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::common::is_truthy;

/// Ticket properties whose modifications are sent on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TicketProperty {
    /// `subject`
    Subject,
    /// `status`
    Status,
    /// `priority`
    Priority,
    /// `description`
    Description,
    /// `description_html`
    DescriptionHtml,
    /// `requester_id`
    RequesterId,
    /// `custom_fields`
    CustomFields,
}

impl TicketProperty {
    /// The JSON key used by the Freshdesk API for this property.
    pub fn wire_name(self) -> &'static str {
        match self {
            TicketProperty::Subject => "subject",
            TicketProperty::Status => "status",
            TicketProperty::Priority => "priority",
            TicketProperty::Description => "description",
            TicketProperty::DescriptionHtml => "description_html",
            TicketProperty::RequesterId => "requester_id",
            TicketProperty::CustomFields => "custom_fields",
        }
    }
}

/// Property name → new value, for every property modified since the last
/// time the set was taken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: BTreeMap<TicketProperty, Value>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `next` for `property` unless it equals `previous`.
    pub fn add_change(&mut self, property: TicketProperty, previous: Option<Value>, next: Value) {
        if previous.as_ref() != Some(&next) {
            self.changes.insert(property, next);
        }
    }

    /// Records `next` for `property` unconditionally.
    pub fn add_change_always(&mut self, property: TicketProperty, next: Value) {
        self.changes.insert(property, next);
    }

    /// Returns the recorded value for `property`, if any.
    pub fn get(&self, property: TicketProperty) -> Option<&Value> {
        self.changes.get(&property)
    }

    /// Returns true if `property` has a recorded change.
    pub fn contains(&self, property: TicketProperty) -> bool {
        self.changes.contains_key(&property)
    }

    /// Number of changed properties.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Wire-shaped snapshot of the changes, or `None` when there are none.
    ///
    /// Only truthy values are emitted, matching the ticket's `to_json`.
    pub fn snapshot(&self) -> Option<Value> {
        if self.changes.is_empty() {
            return None;
        }

        let mut json = Map::new();
        for (property, value) in &self.changes {
            if is_truthy(value) {
                json.insert(property.wire_name().to_string(), value.clone());
            }
        }
        Some(Value::Object(json))
    }

    /// Snapshots the changes and clears the set.
    pub fn take(&mut self) -> Option<Value> {
        let snapshot = self.snapshot();
        self.changes.clear();
        snapshot
    }

    /// Forgets all recorded changes.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
