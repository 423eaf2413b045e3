//! Ticket models for the Freshdesk API.
//!
//! Tickets track every modification made through their setters in a
//! [`ChangeSet`], which `FreshdeskClient::update_ticket` turns into a minimal
//! `PUT` payload.

use serde::Serialize;
use serde_json::{Map, Value};

use super::changes::{ChangeSet, TicketProperty};
use super::common::{normalize_id, present, require_text, text_from_value, Numeric};
use super::Contact;
use crate::error::FreshdeskError;

/// A helpdesk ticket.
///
/// `status` and `priority` are the numeric codes configured on the helpdesk;
/// look them up with `find_ticket_statuses` / `find_ticket_priorities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    requester_id: Option<u64>,

    subject: String,

    status: u64,

    priority: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description_html: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    custom_fields: Option<Map<String, Value>>,

    #[serde(skip)]
    requester: Option<Contact>,

    #[serde(skip)]
    changes: ChangeSet,
}

impl Ticket {
    /// Creates a ticket. The new ticket has no recorded changes.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the subject is blank or a code
    /// is not a positive number.
    pub fn new(
        subject: impl Into<String>,
        status: impl Numeric,
        priority: impl Numeric,
    ) -> Result<Self, FreshdeskError> {
        Ok(Self {
            id: None,
            requester_id: None,
            subject: require_text(subject, "Invalid ticket subject")?,
            status: normalize_id(status, "Invalid ticket Status")?,
            priority: normalize_id(priority, "Invalid ticket Priority")?,
            description: None,
            description_html: None,
            custom_fields: None,
            requester: None,
            changes: ChangeSet::new(),
        })
    }

    /// Server-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Ticket subject.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Status code.
    pub fn status(&self) -> u64 {
        self.status
    }

    /// Priority code.
    pub fn priority(&self) -> u64 {
        self.priority
    }

    /// Plain text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// HTML description.
    pub fn description_html(&self) -> Option<&str> {
        self.description_html.as_deref()
    }

    /// Id of the contact who raised the ticket.
    pub fn requester_id(&self) -> Option<u64> {
        self.requester_id
    }

    /// The requester contact, when one was assigned locally.
    pub fn requester(&self) -> Option<&Contact> {
        self.requester.as_ref()
    }

    /// Custom field values keyed by field name.
    pub fn custom_fields(&self) -> Option<&Map<String, Value>> {
        self.custom_fields.as_ref()
    }

    /// Modifications recorded since the change set was last taken.
    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Sets the id. Ids are assigned by the server and are not tracked.
    pub fn set_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.id = Some(normalize_id(value, "Invalid id")?);
        Ok(())
    }

    /// Sets the subject.
    pub fn set_subject(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        let value = require_text(value, "Invalid ticket subject")?;
        self.changes.add_change(
            TicketProperty::Subject,
            Some(Value::from(self.subject.as_str())),
            Value::from(value.as_str()),
        );
        self.subject = value;
        Ok(())
    }

    /// Sets the status code.
    pub fn set_status(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        let value = normalize_id(value, "Invalid ticket Status")?;
        self.changes.add_change(
            TicketProperty::Status,
            Some(Value::from(self.status)),
            Value::from(value),
        );
        self.status = value;
        Ok(())
    }

    /// Sets the priority code.
    pub fn set_priority(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        let value = normalize_id(value, "Invalid ticket Priority")?;
        self.changes.add_change(
            TicketProperty::Priority,
            Some(Value::from(self.priority)),
            Value::from(value),
        );
        self.priority = value;
        Ok(())
    }

    /// Sets the plain text description.
    pub fn set_description(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        let value = require_text(value, "Invalid ticket description")?;
        self.changes.add_change(
            TicketProperty::Description,
            self.description.as_deref().map(Value::from),
            Value::from(value.as_str()),
        );
        self.description = Some(value);
        Ok(())
    }

    /// Sets the HTML description.
    pub fn set_description_html(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        let value = require_text(value, "Invalid ticket DescriptionHtml")?;
        self.changes.add_change(
            TicketProperty::DescriptionHtml,
            self.description_html.as_deref().map(Value::from),
            Value::from(value.as_str()),
        );
        self.description_html = Some(value);
        Ok(())
    }

    /// Sets the requester id.
    pub fn set_requester_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        let value = normalize_id(value, "Invalid ticket RequesterId")?;
        self.changes.add_change(
            TicketProperty::RequesterId,
            self.requester_id.map(Value::from),
            Value::from(value),
        );
        self.requester_id = Some(value);
        Ok(())
    }

    /// Assigns the requester. A contact that already has an id also sets
    /// `requester_id`.
    pub fn set_requester(&mut self, contact: Contact) -> Result<(), FreshdeskError> {
        if let Some(id) = contact.id() {
            self.set_requester_id(id)?;
        }
        self.requester = Some(contact);
        Ok(())
    }

    /// Replaces the custom fields. Always recorded as a change.
    pub fn set_custom_fields(&mut self, fields: Map<String, Value>) {
        self.changes
            .add_change_always(TicketProperty::CustomFields, Value::Object(fields.clone()));
        self.custom_fields = Some(fields);
    }

    /// Builder form of [`set_description`](Self::set_description).
    pub fn with_description(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_description(value)?;
        Ok(self)
    }

    /// Builder form of [`set_description_html`](Self::set_description_html).
    pub fn with_description_html(
        mut self,
        value: impl Into<String>,
    ) -> Result<Self, FreshdeskError> {
        self.set_description_html(value)?;
        Ok(self)
    }

    /// Builder form of [`set_requester_id`](Self::set_requester_id).
    pub fn with_requester_id(mut self, value: impl Numeric) -> Result<Self, FreshdeskError> {
        self.set_requester_id(value)?;
        Ok(self)
    }

    /// Builder form of [`set_requester`](Self::set_requester).
    pub fn with_requester(mut self, contact: Contact) -> Result<Self, FreshdeskError> {
        self.set_requester(contact)?;
        Ok(self)
    }

    /// A ticket needs a description (plain or HTML) and a requester id.
    pub fn is_valid(&self) -> bool {
        let has_description = self.description.is_some() || self.description_html.is_some();
        has_description && self.requester_id.is_some()
    }

    /// Wire representation; unset fields are omitted.
    pub fn to_json(&self) -> Result<Value, FreshdeskError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Wire-shaped diff of modified fields, or `None` when nothing changed.
    ///
    /// Reading does not clear the diff.
    pub fn remote_changes(&self) -> Option<Value> {
        self.changes.snapshot()
    }

    /// Like [`remote_changes`](Self::remote_changes), but clears the diff.
    pub fn take_remote_changes(&mut self) -> Option<Value> {
        self.changes.take()
    }

    /// Forgets the recorded changes, e.g. once the helpdesk accepted them.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    /// Rebuilds a ticket from an API payload. `null` yields `None`.
    ///
    /// Recognized fields are assigned when present; unknown fields are
    /// ignored. The returned ticket mirrors remote state, so its change set
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if a recognized field holds an
    /// invalid value, or if subject, status or priority is missing.
    pub fn from_json(raw: &Value) -> Result<Option<Self>, FreshdeskError> {
        if raw.is_null() {
            return Ok(None);
        }
        if !raw.is_object() {
            return Err(FreshdeskError::validation("ticket payload must be an object"));
        }

        let subject = raw
            .get("subject")
            .and_then(text_from_value)
            .ok_or_else(|| FreshdeskError::validation("Invalid ticket subject"))?;
        let status = raw.get("status").unwrap_or(&Value::Null);
        let priority = raw.get("priority").unwrap_or(&Value::Null);

        let mut ticket = Ticket::new(subject, status, priority)?;

        if let Some(description) = present(raw, "description") {
            let text = text_from_value(description)
                .ok_or_else(|| FreshdeskError::validation("Invalid ticket description"))?;
            ticket.set_description(text)?;
        }

        if let Some(html) = present(raw, "description_html") {
            let text = text_from_value(html)
                .ok_or_else(|| FreshdeskError::validation("Invalid ticket DescriptionHtml"))?;
            ticket.set_description_html(text)?;
        }

        if let Some(requester_id) = present(raw, "requester_id") {
            ticket.set_requester_id(requester_id)?;
        }

        if let Some(id) = present(raw, "id") {
            ticket.set_id(id)?;
        }

        if let Some(custom_fields) = present(raw, "custom_fields") {
            let fields = custom_fields
                .as_object()
                .cloned()
                .ok_or_else(|| FreshdeskError::validation("Invalid ticket custom_fields"))?;
            ticket.set_custom_fields(fields);
        }

        ticket.changes.clear();
        Ok(Some(ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_ticket() -> Ticket {
        Ticket::new("Printer on fire", 2, 1).unwrap()
    }

    #[test]
    fn test_new_ticket_has_no_changes() {
        let ticket = sample_ticket();
        assert!(ticket.changes().is_empty());
        assert_eq!(ticket.remote_changes(), None);
    }

    #[test]
    fn test_new_rejects_invalid_values() {
        assert!(Ticket::new("", 2, 1).is_err());
        assert!(Ticket::new("Subject", 0, 1).is_err());
        assert!(Ticket::new("Subject", 2, "high").is_err());
    }

    #[test]
    fn test_codes_normalized_from_strings() {
        let ticket = Ticket::new("Subject", "3", "4").unwrap();
        assert_eq!(ticket.status(), 3);
        assert_eq!(ticket.priority(), 4);
    }

    #[test]
    fn test_setting_same_value_twice_records_once() {
        let mut ticket = sample_ticket();
        ticket.set_status(5).unwrap();
        ticket.set_status(5).unwrap();
        ticket.set_description("Smoke everywhere").unwrap();
        ticket.set_description("Smoke everywhere").unwrap();

        assert_eq!(ticket.changes().len(), 2);
        assert_eq!(
            ticket.remote_changes(),
            Some(json!({"status": 5, "description": "Smoke everywhere"}))
        );
    }

    #[test]
    fn test_setting_current_value_records_nothing() {
        let mut ticket = sample_ticket();
        ticket.set_status(2).unwrap();
        ticket.set_priority("1").unwrap();
        ticket.set_subject("Printer on fire").unwrap();
        assert_eq!(ticket.remote_changes(), None);
    }

    #[test]
    fn test_different_value_overwrites_change() {
        let mut ticket = sample_ticket();
        ticket.set_priority(3).unwrap();
        ticket.set_priority(4).unwrap();
        assert_eq!(ticket.remote_changes(), Some(json!({"priority": 4})));
    }

    #[test]
    fn test_remote_changes_is_repeatable_until_taken() {
        let mut ticket = sample_ticket();
        ticket.set_subject("Printer still on fire").unwrap();
        let first = ticket.remote_changes();
        assert_eq!(ticket.remote_changes(), first);
        assert_eq!(ticket.take_remote_changes(), first);
        assert_eq!(ticket.remote_changes(), None);
    }

    #[test]
    fn test_custom_fields_always_recorded() {
        let mut ticket = sample_ticket();
        let mut fields = Map::new();
        fields.insert("cf_team".to_string(), json!("ops"));
        ticket.set_custom_fields(fields.clone());
        ticket.take_remote_changes();

        ticket.set_custom_fields(fields);
        assert_eq!(
            ticket.remote_changes(),
            Some(json!({"custom_fields": {"cf_team": "ops"}}))
        );
    }

    #[test]
    fn test_invalid_setter_leaves_state_untouched() {
        let mut ticket = sample_ticket();
        assert!(ticket.set_status("pending").is_err());
        assert!(ticket.set_description("  ").is_err());
        assert_eq!(ticket.status(), 2);
        assert_eq!(ticket.description(), None);
        assert!(ticket.changes().is_empty());
    }

    #[test]
    fn test_requester_with_id_sets_requester_id() {
        let mut contact = Contact::new("Jane Roe").unwrap();
        contact.set_id(77).unwrap();
        let ticket = sample_ticket().with_requester(contact).unwrap();
        assert_eq!(ticket.requester_id(), Some(77));
        assert_eq!(ticket.requester().map(Contact::name), Some("Jane Roe"));
    }

    #[test]
    fn test_requester_without_id_keeps_requester_id_unset() {
        let contact = Contact::new("Jane Roe").unwrap();
        let ticket = sample_ticket().with_requester(contact).unwrap();
        assert_eq!(ticket.requester_id(), None);
        assert!(ticket.requester().is_some());
    }

    #[test]
    fn test_validity_needs_description_and_requester() {
        let ticket = sample_ticket();
        assert!(!ticket.is_valid());

        let ticket = ticket.with_description_html("<b>help</b>").unwrap();
        assert!(!ticket.is_valid());

        let ticket = ticket.with_requester_id(9).unwrap();
        assert!(ticket.is_valid());
    }

    #[test]
    fn test_to_json_omits_unset_fields() {
        let ticket = sample_ticket().with_description("Smoke").unwrap();
        assert_eq!(
            ticket.to_json().unwrap(),
            json!({"subject": "Printer on fire", "status": 2, "priority": 1, "description": "Smoke"})
        );
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut fields = Map::new();
        fields.insert("cf_floor".to_string(), json!(3));
        let mut ticket = sample_ticket()
            .with_description("Smoke")
            .unwrap()
            .with_description_html("<p>Smoke</p>")
            .unwrap()
            .with_requester_id(9)
            .unwrap();
        ticket.set_id(1001).unwrap();
        ticket.set_custom_fields(fields.clone());

        let copy = Ticket::from_json(&ticket.to_json().unwrap()).unwrap().unwrap();
        assert_eq!(copy.id(), Some(1001));
        assert_eq!(copy.subject(), "Printer on fire");
        assert_eq!(copy.status(), 2);
        assert_eq!(copy.priority(), 1);
        assert_eq!(copy.description(), Some("Smoke"));
        assert_eq!(copy.description_html(), Some("<p>Smoke</p>"));
        assert_eq!(copy.requester_id(), Some(9));
        assert_eq!(copy.custom_fields(), Some(&fields));
        assert!(copy.changes().is_empty());
    }

    #[test]
    fn test_from_json_skips_unknown_and_null_fields() {
        let raw = json!({
            "id": "55",
            "subject": "Login broken",
            "status": 2,
            "priority": "3",
            "description": null,
            "description_text": "ignored",
            "requester_id": 12,
            "cc_emails": []
        });
        let ticket = Ticket::from_json(&raw).unwrap().unwrap();
        assert_eq!(ticket.id(), Some(55));
        assert_eq!(ticket.priority(), 3);
        assert_eq!(ticket.description(), None);
        assert_eq!(ticket.requester_id(), Some(12));
    }

    #[test]
    fn test_from_json_null_is_none() {
        assert!(Ticket::from_json(&Value::Null).unwrap().is_none());
    }

    #[test]
    fn test_from_json_requires_core_fields() {
        assert!(Ticket::from_json(&json!({"status": 2, "priority": 1})).is_err());
        assert!(Ticket::from_json(&json!({"subject": "x", "priority": 1})).is_err());
    }
}
