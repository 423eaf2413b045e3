//! MCP server implementation for the Freshdesk client.
//!
//! This module defines the `FreshdeskServer` struct that implements the MCP
//! `ServerHandler` trait, exposing helpdesk operations as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::error::FreshdeskError;
use crate::freshdesk_client::FreshdeskClient;
use crate::models::{
    normalize_id, Contact, Note, PriorityName, StatusName, Ticket, TicketPriority, TicketReply,
    TicketStatus,
};
use crate::tools::{
    AddNoteInput, CreateContactInput, CreateTicketInput, FindContactInput, FindTicketInput,
    ReplyToTicketInput, UpdateTicketInput,
};

/// Maximum subject length accepted by Freshdesk.
const MAX_SUBJECT_LENGTH: usize = 255;

/// The Freshdesk MCP server.
///
/// This server exposes Freshdesk helpdesk operations as MCP tools.
#[derive(Clone)]
pub struct FreshdeskServer {
    /// Freshdesk client for API operations.
    client: FreshdeskClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FreshdeskServer {
    /// Creates a new server instance.
    pub fn new(client: FreshdeskClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    #[tool(description = "Test connectivity to the Freshdesk MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    /// Get a single ticket by ID.
    #[tool(description = "Get a Freshdesk ticket by its numeric ID. Returns subject, status, priority, requester and description.")]
    async fn find_ticket(
        &self,
        Parameters(input): Parameters<FindTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = %input.ticket_id, "find_ticket tool called");

        let ticket_id = normalize_id(input.ticket_id.as_str(), "ticket_id must be a positive number")
            .map_err(|e| e.to_string())?;

        let ticket = self
            .client
            .find_ticket_by_id(ticket_id)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, ticket_id, "Failed to find ticket");
                format!("Failed to find ticket {}: {}", ticket_id, sanitized)
            })?
            .ok_or_else(|| format!("Ticket #{} not found.", ticket_id))?;

        let labels = self.code_labels().await;
        Ok(format_ticket_details(
            &ticket,
            &labels,
            &self.client.ticket_web_url(ticket_id),
        ))
    }

    /// Look up a contact by email or ID.
    #[tool(description = "Find a Freshdesk contact by email address or numeric contact ID. Returns the contact's ID, name and channels.")]
    async fn find_contact(
        &self,
        Parameters(input): Parameters<FindContactInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(?input, "find_contact tool called");

        if !input.has_lookup() {
            return Err("Either email or contact_id must be provided.".to_string());
        }

        let result = match (&input.contact_id, &input.email) {
            (Some(id), _) => self.client.find_contact_by_id(id.as_str()).await,
            (None, Some(email)) => self.client.find_contact_by_email(email).await,
            (None, None) => Ok(None),
        };

        let contact = result.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to find contact");
            format!("Failed to find contact: {}", sanitized)
        })?;

        match contact {
            Some(contact) => Ok(format_contact(&contact)),
            None => Ok("No contact found.".to_string()),
        }
    }

    /// Create a contact.
    #[tool(description = "Create a Freshdesk contact. Name is required, plus at least one of email, phone or twitter_id.")]
    async fn create_contact(
        &self,
        Parameters(input): Parameters<CreateContactInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(name = %input.name, "create_contact tool called");

        let contact = build_contact(&input).map_err(|e| e.to_string())?;

        let created = self
            .client
            .create_contact(&contact)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, "Failed to create contact");
                format!("Failed to create contact: {}", sanitized)
            })?;

        match created {
            Some(contact) => Ok(format!("Successfully created contact.\n\n{}", format_contact(&contact))),
            None => Ok("Contact submitted; Freshdesk returned no details.".to_string()),
        }
    }

    // ========================================================================
    // Ticket tools
    // ========================================================================

    /// Create a new ticket.
    #[tool(description = "Create a Freshdesk ticket. Subject and description are required, plus requester_id or requester_email. Status defaults to Open, priority to Low.")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(subject = %input.subject, "create_ticket tool called");

        validate_subject(&input.subject)?;
        if input.description.is_none() && input.description_html.is_none() {
            return Err("A description or description_html is required.".to_string());
        }

        let requester_id = self.resolve_requester(&input).await?;
        let status = self
            .resolve_status(input.status.as_deref().unwrap_or(StatusName::Open.label()))
            .await?;
        let priority = self
            .resolve_priority(input.priority.as_deref().unwrap_or(PriorityName::Low.label()))
            .await?;

        let ticket = build_ticket(&input, status, priority, requester_id).map_err(|e| e.to_string())?;

        let created = self
            .client
            .create_ticket(&ticket)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, "Failed to create ticket");
                format!("Failed to create ticket: {}", sanitized)
            })?;

        match created {
            Some(ticket) => {
                let labels = self.code_labels().await;
                Ok(format_create_result(&ticket, &labels))
            }
            None => Ok("Ticket submitted; Freshdesk returned no details.".to_string()),
        }
    }

    /// Update subject, description, status or priority of a ticket.
    #[tool(description = "Update a Freshdesk ticket's subject, description, status or priority. Only changed fields are sent. Ticket ID is required.")]
    async fn update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = %input.ticket_id, "update_ticket tool called");

        if !input.has_updates() {
            return Err(
                "At least one field must be provided for update (subject, description, status, or priority).".to_string()
            );
        }
        if let Some(ref subject) = input.subject {
            validate_subject(subject)?;
        }

        let ticket_id = normalize_id(input.ticket_id.as_str(), "ticket_id must be a positive number")
            .map_err(|e| e.to_string())?;

        let mut ticket = self
            .client
            .find_ticket_by_id(ticket_id)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, ticket_id, "Failed to load ticket for update");
                format!("Failed to load ticket {}: {}", ticket_id, sanitized)
            })?
            .ok_or_else(|| format!("Ticket #{} not found.", ticket_id))?;

        if let Some(subject) = input.subject {
            ticket.set_subject(subject).map_err(|e| e.to_string())?;
        }
        if let Some(description) = input.description {
            ticket.set_description(description).map_err(|e| e.to_string())?;
        }
        if let Some(status) = input.status {
            let code = self.resolve_status(&status).await?;
            ticket.set_status(code).map_err(|e| e.to_string())?;
        }
        if let Some(priority) = input.priority {
            let code = self.resolve_priority(&priority).await?;
            ticket.set_priority(code).map_err(|e| e.to_string())?;
        }

        let changed = ticket.changes().len();
        let updated = self
            .client
            .update_ticket(&mut ticket)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, ticket_id, "Failed to update ticket");
                format!("Failed to update ticket {}: {}", ticket_id, sanitized)
            })?;

        match updated {
            Some(ticket) => {
                let labels = self.code_labels().await;
                Ok(format_update_result(&ticket, &labels, changed))
            }
            None => Ok(format!("Ticket #{} updated.", ticket_id)),
        }
    }

    /// Reply to the requester of a ticket.
    #[tool(description = "Send a public reply to the requester of a Freshdesk ticket. Ticket ID and body are required.")]
    async fn reply_to_ticket(
        &self,
        Parameters(input): Parameters<ReplyToTicketInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = %input.ticket_id, "reply_to_ticket tool called");

        if input.body.is_empty() {
            return Err("Reply body is required and cannot be empty.".to_string());
        }

        let reply = TicketReply::new(input.ticket_id.as_str())
            .and_then(|reply| reply.with_body(input.body.as_str()))
            .map_err(|e| e.to_string())?;

        let sent = self
            .client
            .reply_to_ticket(&reply)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, ticket_id = reply.ticket_id(), "Failed to reply to ticket");
                format!("Failed to reply to ticket {}: {}", reply.ticket_id(), sanitized)
            })?;

        Ok(format_reply_result(reply.ticket_id(), sent.as_ref()))
    }

    /// Add a note to a ticket.
    #[tool(description = "Add a note to a Freshdesk ticket. Notes are private (agents only) unless private is false. Ticket ID and body are required.")]
    async fn add_note(
        &self,
        Parameters(input): Parameters<AddNoteInput>,
    ) -> Result<String, String> {
        let input = input.sanitize();
        tracing::debug!(ticket_id = %input.ticket_id, "add_note tool called");

        if input.body.is_empty() {
            return Err("Note body is required and cannot be empty.".to_string());
        }

        let note = build_note(&input).map_err(|e| e.to_string())?;

        let created = self
            .client
            .create_note(&note)
            .await
            .map_err(|e| {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(error = %sanitized, ticket_id = note.ticket_id(), "Failed to add note");
                format!("Failed to add note to ticket {}: {}", note.ticket_id(), sanitized)
            })?;

        Ok(format_add_note_result(created.as_ref().unwrap_or(&note)))
    }

    /// List the helpdesk's ticket statuses.
    #[tool(description = "List the ticket statuses configured on the helpdesk with their numeric codes.")]
    async fn list_ticket_statuses(&self) -> Result<String, String> {
        tracing::debug!("list_ticket_statuses tool called");

        let statuses = self.client.find_ticket_statuses().await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to list ticket statuses");
            format!("Failed to list ticket statuses: {}", sanitized)
        })?;

        Ok(format_code_list("status", &status_labels(&statuses)))
    }

    /// List the helpdesk's ticket priorities.
    #[tool(description = "List the ticket priorities configured on the helpdesk with their numeric codes.")]
    async fn list_ticket_priorities(&self) -> Result<String, String> {
        tracing::debug!("list_ticket_priorities tool called");

        let priorities = self.client.find_ticket_priorities().await.map_err(|e| {
            let sanitized = self.sanitize_error(&e);
            tracing::error!(error = %sanitized, "Failed to list ticket priorities");
            format!("Failed to list ticket priorities: {}", sanitized)
        })?;

        Ok(format_code_list("priority", &priority_labels(&priorities)))
    }

    /// Resolves a status name (or numeric code) against the helpdesk metadata.
    async fn resolve_status(&self, value: &str) -> Result<u64, String> {
        if let Ok(code) = normalize_id(value, "") {
            return Ok(code);
        }
        let name = parse_status_name(value).ok_or_else(|| {
            format!(
                "Unknown status '{}'. Expected one of: {}.",
                value,
                StatusName::ALL.map(StatusName::label).join(", ")
            )
        })?;
        let statuses = self
            .client
            .find_ticket_statuses()
            .await
            .map_err(|e| format!("Failed to load ticket statuses: {}", self.sanitize_error(&e)))?;
        statuses.get(name).map_err(|e| e.to_string())
    }

    /// Resolves a priority name (or numeric code) against the helpdesk metadata.
    async fn resolve_priority(&self, value: &str) -> Result<u64, String> {
        if let Ok(code) = normalize_id(value, "") {
            return Ok(code);
        }
        let name = parse_priority_name(value).ok_or_else(|| {
            format!(
                "Unknown priority '{}'. Expected one of: {}.",
                value,
                PriorityName::ALL.map(PriorityName::label).join(", ")
            )
        })?;
        let priorities = self
            .client
            .find_ticket_priorities()
            .await
            .map_err(|e| format!("Failed to load ticket priorities: {}", self.sanitize_error(&e)))?;
        priorities.get(name).map_err(|e| e.to_string())
    }

    /// Picks the requester id, looking the contact up by email when needed.
    async fn resolve_requester(&self, input: &CreateTicketInput) -> Result<u64, String> {
        if let Some(ref id) = input.requester_id {
            return normalize_id(id.as_str(), "requester_id must be a positive number")
                .map_err(|e| e.to_string());
        }

        let email = input
            .requester_email
            .as_deref()
            .ok_or_else(|| "Either requester_id or requester_email must be provided.".to_string())?;

        let contact = self
            .client
            .find_contact_by_email(email)
            .await
            .map_err(|e| format!("Failed to look up requester: {}", self.sanitize_error(&e)))?
            .ok_or_else(|| format!("No contact found with email {}.", email))?;

        contact
            .id()
            .ok_or_else(|| format!("Contact {} has no id.", email))
    }

    /// Best-effort code labels for display. Metadata failures fall back to raw codes.
    async fn code_labels(&self) -> CodeLabels {
        let statuses = match self.client.find_ticket_statuses().await {
            Ok(statuses) => status_labels(&statuses),
            Err(e) => {
                tracing::warn!(error = %self.sanitize_error(&e), "Could not load status labels");
                Vec::new()
            }
        };
        let priorities = match self.client.find_ticket_priorities().await {
            Ok(priorities) => priority_labels(&priorities),
            Err(e) => {
                tracing::warn!(error = %self.sanitize_error(&e), "Could not load priority labels");
                Vec::new()
            }
        };
        CodeLabels {
            statuses,
            priorities,
        }
    }

    /// Sanitizes an error message to remove any API key.
    fn sanitize_error(&self, error: &FreshdeskError) -> String {
        error.sanitized_display(self.client.api_key_for_sanitization())
    }
}

#[tool_handler]
impl ServerHandler for FreshdeskServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Provides access to a Freshdesk helpdesk. \
                 Use find_ticket and find_contact to look things up, \
                 list_ticket_statuses and list_ticket_priorities to see the helpdesk's codes. \
                 Create tickets with create_ticket, change them with update_ticket, \
                 answer the requester with reply_to_ticket and leave internal notes with add_note. \
                 Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Input conversion helpers
// ============================================================================

fn validate_subject(subject: &str) -> Result<(), String> {
    if subject.is_empty() {
        return Err("Subject is required and cannot be empty.".to_string());
    }
    let length = subject.chars().count();
    if length > MAX_SUBJECT_LENGTH {
        return Err(format!(
            "Subject exceeds maximum length of {} characters (got {} characters).",
            MAX_SUBJECT_LENGTH, length
        ));
    }
    Ok(())
}

/// Matches a status name case-insensitively.
fn parse_status_name(value: &str) -> Option<StatusName> {
    StatusName::ALL
        .into_iter()
        .find(|name| name.label().eq_ignore_ascii_case(value))
}

/// Matches a priority name case-insensitively.
fn parse_priority_name(value: &str) -> Option<PriorityName> {
    PriorityName::ALL
        .into_iter()
        .find(|name| name.label().eq_ignore_ascii_case(value))
}

fn build_contact(input: &CreateContactInput) -> Result<Contact, FreshdeskError> {
    let mut contact = Contact::new(input.name.as_str())?;
    if let Some(ref email) = input.email {
        contact.set_email(email.as_str())?;
    }
    if let Some(ref phone) = input.phone {
        contact.set_phone(phone.as_str())?;
    }
    if let Some(ref mobile) = input.mobile {
        contact.set_mobile(mobile.as_str())?;
    }
    if let Some(ref twitter_id) = input.twitter_id {
        contact.set_twitter_id(twitter_id.as_str())?;
    }
    if !contact.is_valid() {
        return Err(FreshdeskError::validation(
            "A contact needs at least one of email, phone or twitter_id",
        ));
    }
    Ok(contact)
}

fn build_ticket(
    input: &CreateTicketInput,
    status: u64,
    priority: u64,
    requester_id: u64,
) -> Result<Ticket, FreshdeskError> {
    let mut ticket = Ticket::new(input.subject.as_str(), status, priority)?;
    if let Some(ref description) = input.description {
        ticket.set_description(description.as_str())?;
    }
    if let Some(ref html) = input.description_html {
        ticket.set_description_html(html.as_str())?;
    }
    ticket.set_requester_id(requester_id)?;
    Ok(ticket)
}

fn build_note(input: &AddNoteInput) -> Result<Note, FreshdeskError> {
    let mut note = Note::new(input.ticket_id.as_str())?.with_body(input.body.as_str())?;
    if input.private == Some(false) {
        note.make_public();
    }
    if let Some(ref emails) = input.notify_emails {
        note.set_notify_emails(emails.clone())?;
    }
    Ok(note)
}

// ============================================================================
// Response formatting helpers
// ============================================================================

/// Maximum length for description fields before truncation.
const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Status and priority names keyed by code, for display.
#[derive(Debug, Default)]
struct CodeLabels {
    statuses: Vec<(&'static str, u64)>,
    priorities: Vec<(&'static str, u64)>,
}

impl CodeLabels {
    fn status(&self, code: u64) -> String {
        describe_code(&self.statuses, code)
    }

    fn priority(&self, code: u64) -> String {
        describe_code(&self.priorities, code)
    }
}

fn status_labels(statuses: &TicketStatus) -> Vec<(&'static str, u64)> {
    statuses
        .defined()
        .into_iter()
        .map(|(name, code)| (name.label(), code))
        .collect()
}

fn priority_labels(priorities: &TicketPriority) -> Vec<(&'static str, u64)> {
    priorities
        .defined()
        .into_iter()
        .map(|(name, code)| (name.label(), code))
        .collect()
}

/// "Open (2)" when the code is known, otherwise just the code.
fn describe_code(labels: &[(&'static str, u64)], code: u64) -> String {
    let names: Vec<&str> = labels
        .iter()
        .filter(|(_, c)| *c == code)
        .map(|(name, _)| *name)
        .collect();
    if names.is_empty() {
        code.to_string()
    } else {
        format!("{} ({})", names.join("/"), code)
    }
}

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }
    let mut end = max_length.saturating_sub(15);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if let Some(space_pos) = text[..end].rfind(char::is_whitespace) {
        end = space_pos;
    }
    format!("{}... [truncated]", &text[..end])
}

/// Formats full ticket details as human-readable text.
fn format_ticket_details(ticket: &Ticket, labels: &CodeLabels, web_url: &str) -> String {
    let mut output = String::new();

    match ticket.id() {
        Some(id) => output.push_str(&format!("Ticket #{}: {}\n", id, ticket.subject())),
        None => output.push_str(&format!("Ticket: {}\n", ticket.subject())),
    }
    output.push_str(&"=".repeat(60));
    output.push('\n');

    output.push_str(&format!("\nStatus: {}\n", labels.status(ticket.status())));
    output.push_str(&format!("Priority: {}\n", labels.priority(ticket.priority())));

    if let Some(requester_id) = ticket.requester_id() {
        output.push_str(&format!("Requester ID: {}\n", requester_id));
    }

    if let Some(custom_fields) = ticket.custom_fields() {
        let set: Vec<_> = custom_fields.iter().filter(|(_, v)| !v.is_null()).collect();
        if !set.is_empty() {
            output.push_str("\n--- Custom Fields ---\n");
            for (key, value) in set {
                output.push_str(&format!("{}: {}\n", key, value));
            }
        }
    }

    let description = ticket.description().or(ticket.description_html());
    if let Some(description) = description {
        output.push_str("\n--- Description ---\n");
        output.push_str(&truncate_text(description, MAX_DESCRIPTION_LENGTH));
        output.push('\n');
    }

    output.push_str(&format!("\nView in Freshdesk: {}\n", web_url));

    output
}

/// Formats a contact as human-readable text.
fn format_contact(contact: &Contact) -> String {
    let mut output = String::new();

    match contact.id() {
        Some(id) => output.push_str(&format!("Contact #{}: {}\n", id, contact.name())),
        None => output.push_str(&format!("Contact: {}\n", contact.name())),
    }
    if let Some(email) = contact.email() {
        output.push_str(&format!("  Email: {}\n", email));
    }
    if let Some(phone) = contact.phone() {
        output.push_str(&format!("  Phone: {}\n", phone));
    }
    if let Some(mobile) = contact.mobile() {
        output.push_str(&format!("  Mobile: {}\n", mobile));
    }
    if let Some(twitter_id) = contact.twitter_id() {
        output.push_str(&format!("  Twitter: {}\n", twitter_id));
    }

    output
}

/// Formats a list of named codes.
fn format_code_list(kind: &str, labels: &[(&'static str, u64)]) -> String {
    if labels.is_empty() {
        return format!("No known {} values are configured on this helpdesk.", kind);
    }

    let mut output = format!("Ticket {} codes:\n\n", kind);
    for (name, code) in labels {
        output.push_str(&format!("  {} = {}\n", name, code));
    }
    output
}

/// Formats the result of a create ticket operation.
fn format_create_result(ticket: &Ticket, labels: &CodeLabels) -> String {
    let mut output = String::new();

    let id = ticket
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
    output.push_str(&format!(
        "Successfully created ticket #{}: {}\n\n",
        id,
        ticket.subject()
    ));
    output.push_str(&format!("Status: {}\n", labels.status(ticket.status())));
    output.push_str(&format!("Priority: {}\n", labels.priority(ticket.priority())));
    if let Some(requester_id) = ticket.requester_id() {
        output.push_str(&format!("Requester ID: {}\n", requester_id));
    }

    output.push_str("\nNext steps:\n");
    output.push_str(&format!(
        "  - View details: use find_ticket with ticket_id=\"{}\"\n",
        id
    ));
    output.push_str(&format!(
        "  - Add notes: use add_note with ticket_id=\"{}\"\n",
        id
    ));

    output
}

/// Formats the result of an update ticket operation.
fn format_update_result(ticket: &Ticket, labels: &CodeLabels, changed: usize) -> String {
    let mut output = String::new();

    let id = ticket
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
    if changed == 0 {
        output.push_str(&format!(
            "Ticket #{} already had these values; nothing was sent.\n\n",
            id
        ));
    } else {
        output.push_str(&format!(
            "Successfully updated ticket #{}: {}\n\n",
            id,
            ticket.subject()
        ));
    }

    output.push_str("Current state:\n");
    output.push_str(&format!("  Subject: {}\n", ticket.subject()));
    output.push_str(&format!("  Status: {}\n", labels.status(ticket.status())));
    output.push_str(&format!("  Priority: {}\n", labels.priority(ticket.priority())));

    output
}

/// Formats the result of a reply operation.
fn format_reply_result(ticket_id: u64, reply: Option<&TicketReply>) -> String {
    match reply.and_then(TicketReply::id) {
        Some(reply_id) => format!(
            "Successfully sent reply #{} on ticket #{}.\n",
            reply_id, ticket_id
        ),
        None => format!("Successfully sent reply on ticket #{}.\n", ticket_id),
    }
}

/// Formats the result of an add note operation.
fn format_add_note_result(note: &Note) -> String {
    let mut output = String::new();

    match note.id() {
        Some(id) => output.push_str(&format!(
            "Successfully added note #{} to ticket #{}.\n\n",
            id,
            note.ticket_id()
        )),
        None => output.push_str(&format!(
            "Successfully added note to ticket #{}.\n\n",
            note.ticket_id()
        )),
    }

    let visibility = if note.is_private() {
        "Private (agents only)"
    } else {
        "Public"
    };
    output.push_str(&format!("Visibility: {}\n", visibility));

    if !note.notify_emails().is_empty() {
        output.push_str(&format!("Notified: {}\n", note.notify_emails().join(", ")));
    }

    output
}
