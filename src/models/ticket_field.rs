//! Ticket field metadata returned by `GET /ticket_fields`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::deserialize_optional_id;

/// Name of the built-in status field.
pub const STATUS_FIELD_NAME: &str = "status";

/// Name of the built-in priority field.
pub const PRIORITY_FIELD_NAME: &str = "priority";

/// Definition of a ticket field as configured on the helpdesk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketField {
    /// Field id.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<u64>,

    /// Field name (e.g. "status", "priority", "cf_team").
    #[serde(default)]
    pub name: String,

    /// Label shown to agents.
    #[serde(default)]
    pub label: Option<String>,

    /// Field description.
    #[serde(default)]
    pub description: Option<String>,

    /// Field type (e.g. "default_status", "custom_dropdown").
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,

    /// Display position.
    #[serde(default)]
    pub position: Option<u32>,

    /// Whether agents must fill the field.
    #[serde(default)]
    pub required_for_agents: Option<bool>,

    /// Allowed values. Shape depends on the field: a mapping from code to
    /// labels for status, a mapping from label to code for priority, or a
    /// plain list for custom dropdowns.
    #[serde(default)]
    pub choices: Option<Value>,
}

impl TicketField {
    /// Returns `(key, value)` pairs of the choices, see [`choice_entries`].
    pub fn choice_entries(&self) -> Vec<(String, &Value)> {
        self.choices.as_ref().map(choice_entries).unwrap_or_default()
    }
}

/// Flattens a choices payload into `(key, value)` pairs.
///
/// Objects yield their own keys in document order; lists yield their indices
/// as keys. Anything else has no entries.
pub fn choice_entries(choices: &Value) -> Vec<(String, &Value)> {
    match choices {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Finds a field by name.
pub fn find_field<'a>(fields: &'a [TicketField], name: &str) -> Option<&'a TicketField> {
    fields.iter().find(|field| field.name == name)
}
