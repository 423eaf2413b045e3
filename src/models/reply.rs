//! Ticket reply models for the Freshdesk API.

use serde::Serialize;
use serde_json::Value;

use super::common::{normalize_id, present, require_text, text_from_value, Numeric};
use super::Ticket;
use crate::error::FreshdeskError;

/// A public reply sent to the requester of a ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,

    #[serde(skip)]
    ticket_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    body_html: Option<String>,
}

impl TicketReply {
    /// Creates a reply to the ticket with the given id.
    pub fn new(ticket_id: impl Numeric) -> Result<Self, FreshdeskError> {
        Ok(Self {
            id: None,
            ticket_id: normalize_id(ticket_id, "Invalid TicketReply ticketId")?,
            body: None,
            body_html: None,
        })
    }

    /// Creates a reply to an existing ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the ticket has no id yet.
    pub fn for_ticket(ticket: &Ticket) -> Result<Self, FreshdeskError> {
        let id = ticket
            .id()
            .ok_or_else(|| FreshdeskError::validation("Invalid TicketReply ticketId"))?;
        Self::new(id)
    }

    /// Server-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Ticket being replied to.
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

    /// Sets the id from a number or numeric string.
    pub fn set_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.id = Some(normalize_id(value, "Invalid TicketReply id")?);
        Ok(())
    }

    /// Points the reply at another ticket id.
    pub fn set_ticket_id(&mut self, value: impl Numeric) -> Result<(), FreshdeskError> {
        self.ticket_id = normalize_id(value, "Invalid TicketReply ticketId")?;
        Ok(())
    }

    /// Points the reply at `ticket`, which must already have an id.
    pub fn set_ticket(&mut self, ticket: &Ticket) -> Result<(), FreshdeskError> {
        let id = ticket
            .id()
            .ok_or_else(|| FreshdeskError::validation("Invalid TicketReply ticketId"))?;
        self.ticket_id = id;
        Ok(())
    }

    /// Sets the plain text body.
    pub fn set_body(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.body = Some(require_text(value, "Invalid TicketReply body")?);
        Ok(())
    }

    /// Sets the HTML body.
    pub fn set_body_html(&mut self, value: impl Into<String>) -> Result<(), FreshdeskError> {
        self.body_html = Some(require_text(value, "Invalid TicketReply bodyhtml")?);
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

    /// A reply needs a body (plain or HTML).
    pub fn is_valid(&self) -> bool {
        self.body.is_some() || self.body_html.is_some()
    }

    /// Wire representation; unset fields are omitted.
    pub fn to_json(&self) -> Result<Value, FreshdeskError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Builds a reply from an API payload. `null` yields `None`.
    pub fn from_json(raw: &Value) -> Result<Option<Self>, FreshdeskError> {
        if raw.is_null() {
            return Ok(None);
        }

        let ticket_id = raw.get("ticket_id").unwrap_or(&Value::Null);
        let mut reply = TicketReply::new(ticket_id)?;

        if let Some(id) = present(raw, "id") {
            reply.set_id(id)?;
        }
        if let Some(body) = present(raw, "body").and_then(text_from_value) {
            reply.set_body(body)?;
        }
        if let Some(html) = present(raw, "body_html").and_then(text_from_value) {
            reply.set_body_html(html)?;
        }

        Ok(Some(reply))
    }
}
