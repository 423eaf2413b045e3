//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace
//! from string fields. This should be called before processing input.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Trims every entry and drops the blank ones.
fn trim_list(list: &Option<Vec<String>>) -> Option<Vec<String>> {
    list.as_ref().map(|items| {
        items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    })
}

/// Input parameters for the find_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindTicketInput {
    /// The numeric ID of the ticket to retrieve.
    pub ticket_id: String,
}

impl FindTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id.trim().to_string(),
        }
    }
}

/// Input parameters for the find_contact tool.
///
/// Provide either an email or a contact ID.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindContactInput {
    /// Email address of the contact.
    #[serde(default)]
    pub email: Option<String>,

    /// Numeric ID of the contact.
    #[serde(default)]
    pub contact_id: Option<String>,
}

impl FindContactInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            email: trim_option(&self.email),
            contact_id: trim_option(&self.contact_id),
        }
    }

    /// Returns true if at least one lookup key is present.
    pub fn has_lookup(&self) -> bool {
        self.email.is_some() || self.contact_id.is_some()
    }
}

/// Input parameters for the create_contact tool.
///
/// Name is required, plus at least one of email, phone or twitter_id.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateContactInput {
    /// Full name of the contact.
    pub name: String,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(default)]
    pub twitter_id: Option<String>,
}

impl CreateContactInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: trim_option(&self.email),
            phone: trim_option(&self.phone),
            mobile: trim_option(&self.mobile),
            twitter_id: trim_option(&self.twitter_id),
        }
    }
}

// ============================================================================
// Ticket inputs
// ============================================================================

/// Input parameters for the create_ticket tool.
///
/// Subject and a description are required, plus a requester given by ID or
/// email. Status defaults to Open and priority to Low.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket subject (required, max 250 characters).
    pub subject: String,

    /// Plain text description.
    #[serde(default)]
    pub description: Option<String>,

    /// HTML description, used instead of the plain text one when given.
    #[serde(default)]
    pub description_html: Option<String>,

    /// ID of the requesting contact.
    #[serde(default)]
    pub requester_id: Option<String>,

    /// Email of the requesting contact (looked up when no ID is given).
    #[serde(default)]
    pub requester_email: Option<String>,

    /// Status name ('Open', 'Pending', 'Resolved', 'Closed') or numeric code.
    #[serde(default)]
    pub status: Option<String>,

    /// Priority name ('Low', 'Medium', 'High', 'Urgent') or numeric code.
    #[serde(default)]
    pub priority: Option<String>,
}

impl CreateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            subject: self.subject.trim().to_string(),
            description: trim_option(&self.description),
            description_html: trim_option(&self.description_html),
            requester_id: trim_option(&self.requester_id),
            requester_email: trim_option(&self.requester_email),
            status: trim_option(&self.status),
            priority: trim_option(&self.priority),
        }
    }
}

/// Input parameters for the update_ticket tool.
///
/// Ticket ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// The numeric ID of the ticket to update.
    pub ticket_id: String,

    /// New subject (max 250 characters).
    #[serde(default)]
    pub subject: Option<String>,

    /// New plain text description.
    #[serde(default)]
    pub description: Option<String>,

    /// New status name or numeric code.
    #[serde(default)]
    pub status: Option<String>,

    /// New priority name or numeric code.
    #[serde(default)]
    pub priority: Option<String>,
}

impl UpdateTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id.trim().to_string(),
            subject: trim_option(&self.subject),
            description: trim_option(&self.description),
            status: trim_option(&self.status),
            priority: trim_option(&self.priority),
        }
    }

    /// Returns true if any field besides the ticket ID is set.
    pub fn has_updates(&self) -> bool {
        self.subject.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.priority.is_some()
    }
}

/// Input parameters for the reply_to_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReplyToTicketInput {
    /// The numeric ID of the ticket to reply to.
    pub ticket_id: String,

    /// Reply text sent to the requester (HTML allowed).
    pub body: String,
}

impl ReplyToTicketInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id.trim().to_string(),
            body: self.body.trim().to_string(),
        }
    }
}

/// Input parameters for the add_note tool.
///
/// Notes are private unless `private` is false.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddNoteInput {
    /// The numeric ID of the ticket.
    pub ticket_id: String,

    /// Note text (HTML allowed).
    pub body: String,

    /// Whether only agents can see the note (default: true).
    #[serde(default)]
    pub private: Option<bool>,

    /// Agent email addresses to notify about the note.
    #[serde(default)]
    pub notify_emails: Option<Vec<String>>,
}

impl AddNoteInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            ticket_id: self.ticket_id.trim().to_string(),
            body: self.body.trim().to_string(),
            private: self.private,
            notify_emails: trim_list(&self.notify_emails),
        }
    }
}
