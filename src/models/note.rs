//! Note models for the Freshdesk API.
//!
//! Notes are comments added to a ticket. They are private (agents only) by
//! default and can notify extra email addresses.

use serde::Serialize;
use serde_json::Value;

use super::common::{normalize_id, present, require_text, text_from_value, Numeric};
use crate::error::FreshdeskError;

/// A note attached to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,

    #[serde(skip)]
    ticket_id: u64,

    private: bool,

    notify_emails: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    body_html: Option<String>,
}

impl Note {
    /// Creates a private note for the given ticket.
    pub fn new(ticket_id: impl Numeric) -> Result<Self, FreshdeskError> {
        Ok(Self {
            id: None,
            ticket_id: normalize_id(ticket_id, "Invalid note ticketId")?,
            private: true,
            notify_emails: Vec::new(),
            body: None,
            body_html: None,
        })
    }

    /// Server-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Ticket the note belongs to.
    pub fn ticket_id(&self) -> u64 {
        self.ticket_id
    }

    /// Plain text body.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// HTML body.
    pub fn body_html(&self) -> Option<&str> {
        self.body_html.as_deref()
    }

    /// Whether only agents can see the note.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Addresses notified when the note is created, in insertion order.
    pub fn notify_emails(&self) -> &[String] {
        &self.notify_emails
    }

    /// Sets the id from a number or numeric string.
    pub fn set_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.id = Some(normalize_id(value, "Invalid note id")?);
        Ok(())
    }

    /// Moves the note to another ticket.
    pub fn set_ticket_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.ticket_id = normalize_id(value, "Invalid note ticketId")?;
        Ok(())
    }

    /// Sets the plain text body.
    pub fn set_body(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.body = Some(require_text(value, "Invalid note body")?);
        Ok(())
    }

    /// Sets the HTML body.
    pub fn set_body_html(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.body_html = Some(require_text(value, "Invalid note bodyhtml")?);
        Ok(())
    }

    /// Sets visibility.
    pub fn set_private(&mut self, private: bool) {
        self.private = private;
    }

    /// Replaces the notification list. An empty list leaves the current one in place.
    pub fn set_notify_emails(&mut self, emails: Vec<String>) -> Result<(), FreshdeskError> {
        if emails.is_empty() {
            return Ok(());
        }
        if emails.iter().any(|email| email.trim().is_empty()) {
            return Err(FreshdeskError::validation("Provide array of emails to notify"));
        }
        self.notify_emails = emails;
        Ok(())
    }

    /// Makes the note visible to agents only.
    pub fn make_private(&mut self) {
        self.private = true;
    }

    /// Makes the note visible to the requester.
    pub fn make_public(&mut self) {
        self.private = false;
    }

    /// Appends an address to the notification list.
    pub fn notify_by_email(&mut self, email: impl Into<String>) -> Result<(), FreshdeskError> {
        let email = require_text(email, "Provide array of emails to notify")?;
        self.notify_emails.push(email);
        Ok(())
    }

    /// Builder form of [`set_body`](Self::set_body).
    pub fn with_body(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_body(value)?;
        Ok(self)
    }

    /// Builder form of [`set_body_html`](Self::set_body_html).
    pub fn with_body_html(mut self, value: impl Into<String>) -> Result<Self, FreshdeskError> {
        self.set_body_html(value)?;
        Ok(self)
    }

    /// A note needs a body (plain or HTML).
    pub fn is_valid(&self) -> bool {
        self.body.is_some() || self.body_html.is_some()
    }

    /// Wire representation; unset bodies and id are omitted.
    pub fn to_json(&self) -> Result<Value, FreshdeskError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Builds a note from an API payload. `null` yields `None`.
    pub fn from_json(raw: &Value) -> Result<Option<Self>, FreshdeskError> {
        if raw.is_null() {
            return Ok(None);
        }

        let ticket_id = raw.get("ticket_id").unwrap_or(&Value::Null);
        let mut note = Note::new(ticket_id)?;

        if let Some(id) = present(raw, "id") {
            note.set_id(id)?;
        }
        if let Some(body) = present(raw, "body").and_then(text_from_value) {
            note.set_body(body)?;
        }
        if let Some(html) = present(raw, "body_html").and_then(text_from_value) {
            note.set_body_html(html)?;
        }
        if let Some(private) = raw.get("private").and_then(Value::as_bool) {
            note.set_private(private);
        }
        if let Some(emails) = raw.get("notify_emails").and_then(Value::as_array) {
            let emails = emails
                .iter()
                .filter_map(|e| e.as_str().map(str::to_string))
                .collect();
            note.set_notify_emails(emails)?;
        }

        Ok(Some(note))
    }
}
