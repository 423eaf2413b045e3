//! HTTP client for the Freshdesk v2 REST API.
//!
//! This module provides the `FreshdeskClient` struct for making authenticated
//! requests to a Freshdesk helpdesk and turning the responses into models.
//!
//! # Response handling
//!
//! - A 404, or a success with an empty body, is "no result" (`Ok(None)`).
//! - 401/403 map to `FreshdeskError::Authentication`.
//! - Every other non-2xx status is `FreshdeskError::HttpStatus`.
//!
//! Requests are never retried.
//!
//! # Security
//!
//! The API key is never logged. All error messages are sanitized before logging.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::FreshdeskError;
use crate::models::{
    find_field, normalize_id, Contact, Note, Numeric, Ticket, TicketField, TicketPriority,
    TicketReply, TicketStatus, PRIORITY_FIELD_NAME, STATUS_FIELD_NAME,
};

/// Maximum length for HTTP error response bodies.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Builds the `Authorization` header value for an API key.
///
/// Freshdesk takes the key as the Basic auth username with a dummy `X`
/// password.
pub fn auth_token(api_key: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:X", api_key)))
}

/// Path of a single ticket, or of the ticket collection.
///
/// The collection path keeps its trailing slash, so single tickets live
/// under `/tickets//{id}`. Freshdesk accepts both forms.
pub fn ticket_path(ticket_id: Option<u64>) -> String {
    match ticket_id {
        Some(id) => format!("/tickets//{}", id),
        None => "/tickets/".to_string(),
    }
}

/// Path of a single contact, or of the contact collection.
pub fn contact_path(contact_id: Option<u64>) -> String {
    match contact_id {
        Some(id) => format!("/contacts/{}", id),
        None => "/contacts".to_string(),
    }
}

/// Path of the ticket field metadata, optionally narrowed to one field type.
pub fn ticket_fields_path(field_type: Option<&str>) -> String {
    match field_type {
        Some(kind) => format!("/ticket_fields/{}", urlencoding::encode(kind)),
        None => "/ticket_fields".to_string(),
    }
}

/// Path for posting a note on a ticket.
pub fn notes_path(ticket_id: u64) -> String {
    format!("/tickets/{}/notes", ticket_id)
}

/// Path for posting a reply on a ticket.
pub fn reply_path(ticket_id: u64) -> String {
    format!("/tickets/{}/reply", ticket_id)
}

/// Filter for [`FreshdeskClient::find_contacts`].
///
/// With an id the lookup targets `/contacts/{id}`; every other criterion is
/// sent as a query parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactQuery {
    id: Option<u64>,
    params: Vec<(String, String)>,
}

impl ContactQuery {
    /// An empty query (lists all contacts).
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a single contact by id.
    pub fn by_id(id: impl Numeric) -> Result<Self, FreshdeskError> {
        Ok(Self {
            id: Some(normalize_id(id, "No contact id provided")?),
            params: Vec::new(),
        })
    }

    /// Filters contacts by email.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self::new().with_param("email", email)
    }

    /// Adds an arbitrary filter, e.g. `("phone", "555-0100")`.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Filters by mobile number.
    pub fn with_mobile(self, mobile: impl Into<String>) -> Self {
        self.with_param("mobile", mobile)
    }

    /// Filters by phone number.
    pub fn with_phone(self, phone: impl Into<String>) -> Self {
        self.with_param("phone", phone)
    }

    /// Filters by company id.
    pub fn with_company_id(self, company_id: u64) -> Self {
        self.with_param("company_id", company_id.to_string())
    }

    /// Filters by contact state ("verified", "unverified", "blocked", "deleted").
    pub fn with_state(self, state: impl Into<String>) -> Self {
        self.with_param("state", state)
    }

    /// Only contacts updated since the given ISO 8601 timestamp.
    pub fn with_updated_since(self, timestamp: impl Into<String>) -> Self {
        self.with_param("_updated_since", timestamp)
    }

    /// The contact id, if the query targets a single contact.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Query parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// HTTP client for a Freshdesk helpdesk.
///
/// Cloning is cheap. Clones share the HTTP connection pool and the ticket
/// field cache; clients built separately with [`FreshdeskClient::new`] do
/// not share anything.
///
/// # Example
///
/// ```ignore
/// let config = Config::new("acme", api_key)?;
/// let client = FreshdeskClient::new(&config)?;
///
/// let statuses = client.find_ticket_statuses().await?;
/// let mut ticket = client.find_ticket_by_id(42).await?.expect("ticket exists");
/// ticket.set_status(statuses.resolved()?)?;
/// client.update_ticket(&mut ticket).await?;
/// ```
#[derive(Clone)]
pub struct FreshdeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// API root, e.g. `https://acme.freshdesk.com/api/v2`.
    base_url: String,

    /// API key, kept only for sanitizing error text.
    /// SECURITY: Never log this value!
    api_key: String,

    /// Precomputed `Authorization` header value.
    auth_token: String,

    /// Configured request timeout, used to report timeouts.
    timeout: Option<Duration>,

    /// Ticket field metadata, fetched at most once per client.
    ticket_fields: Arc<Mutex<Option<Vec<TicketField>>>>,
}

impl std::fmt::Debug for FreshdeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshdeskClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FreshdeskClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, FreshdeskError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FreshdeskError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
            auth_token: auth_token(config.api_key()),
            timeout: config.timeout,
            ticket_fields: Arc::new(Mutex::new(None)),
        })
    }

    /// Creates a client for `https://{helpdesk_name}.freshdesk.com`.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if either value is blank.
    pub fn with_credentials(
        helpdesk_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, FreshdeskError> {
        Self::new(&Config::new(helpdesk_name, api_key)?)
    }

    /// The API root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The `Authorization` header value sent with every request.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    /// Web URL of a ticket in the agent portal.
    pub fn ticket_web_url(&self, ticket_id: u64) -> String {
        let web_base = self.base_url.trim_end_matches("/api/v2");
        format!("{}/a/tickets/{}", web_base, ticket_id)
    }

    /// Tests connectivity to the helpdesk.
    ///
    /// Fetches the ticket field metadata, which also primes the cache.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::ConnectionTest` with details about the failure.
    pub async fn test_connection(&self) -> Result<(), FreshdeskError> {
        tracing::debug!("Testing connection to Freshdesk");

        match self.find_ticket_fields(None).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(FreshdeskError::Authentication { .. }) => Err(FreshdeskError::connection_test(
                "Authentication failed - verify FRESHDESK_API_KEY is correct",
            )),
            Err(FreshdeskError::Timeout { duration, .. }) => {
                Err(FreshdeskError::connection_test(format!(
                    "Connection timed out after {:?} - verify FRESHDESK_HELPDESK_NAME is correct and the helpdesk is reachable",
                    duration
                )))
            }
            Err(FreshdeskError::Http(e)) => {
                let message = FreshdeskError::sanitize_message(&e.to_string(), &self.api_key);
                Err(FreshdeskError::connection_test(format!(
                    "HTTP error: {} - verify FRESHDESK_HELPDESK_NAME is correct",
                    message
                )))
            }
            Err(e) => Err(FreshdeskError::connection_test(
                e.sanitized_display(&self.api_key),
            )),
        }
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    /// Finds contacts matching `query`.
    ///
    /// Returns an empty list when nothing matches.
    pub async fn find_contacts(&self, query: &ContactQuery) -> Result<Vec<Contact>, FreshdeskError> {
        let path = contact_path(query.id());
        let body = self.get(&path, query.params()).await?;

        match body {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => {
                let mut contacts = Vec::with_capacity(items.len());
                for item in &items {
                    if let Some(contact) = Contact::from_json(item)? {
                        contacts.push(contact);
                    }
                }
                Ok(contacts)
            }
            Some(single) => Ok(Contact::from_json(&single)?.into_iter().collect()),
        }
    }

    /// Finds the first contact with the given email.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if `email` is blank.
    pub async fn find_contact_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Contact>, FreshdeskError> {
        if email.trim().is_empty() {
            return Err(FreshdeskError::validation("No contact email provided"));
        }

        let contacts = self.find_contacts(&ContactQuery::by_email(email)).await?;
        Ok(contacts.into_iter().next())
    }

    /// Finds a contact by id.
    pub async fn find_contact_by_id(
        &self,
        contact_id: impl Numeric,
    ) -> Result<Option<Contact>, FreshdeskError> {
        let contacts = self.find_contacts(&ContactQuery::by_id(contact_id)?).await?;
        Ok(contacts.into_iter().next())
    }

    /// Creates a contact and returns it as stored by the helpdesk.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::InvalidModel` without sending anything if the
    /// contact has no email, phone or twitter id.
    pub async fn create_contact(&self, contact: &Contact) -> Result<Option<Contact>, FreshdeskError> {
        if !contact.is_valid() {
            return Err(FreshdeskError::invalid_model("contact"));
        }

        let body = self.post(&contact_path(None), contact.to_json()?).await?;
        Self::parse_optional(body, Contact::from_json)
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    /// Finds a ticket by id.
    pub async fn find_ticket_by_id(
        &self,
        ticket_id: impl Numeric,
    ) -> Result<Option<Ticket>, FreshdeskError> {
        let ticket_id = normalize_id(ticket_id, "No ticket id provided")?;

        let body = self.get(&ticket_path(Some(ticket_id)), &[]).await?;
        Self::parse_optional(body, Ticket::from_json)
    }

    /// Creates a ticket and returns it as stored by the helpdesk.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::InvalidModel` without sending anything if the
    /// ticket lacks a description or requester.
    pub async fn create_ticket(&self, ticket: &Ticket) -> Result<Option<Ticket>, FreshdeskError> {
        if !ticket.is_valid() {
            return Err(FreshdeskError::invalid_model("ticket"));
        }

        let body = self.post(&ticket_path(None), ticket.to_json()?).await?;
        Self::parse_optional(body, Ticket::from_json)
    }

    /// Sends the pending changes of `ticket` and returns the updated ticket.
    ///
    /// When nothing changed, no request is made and a copy of `ticket` is
    /// returned. The change set is cleared only once the helpdesk accepted
    /// the update, so a failed call can be retried with the same ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::InvalidModel` if the ticket fails validation,
    /// or `FreshdeskError::Validation` if it has changes but no id.
    pub async fn update_ticket(&self, ticket: &mut Ticket) -> Result<Option<Ticket>, FreshdeskError> {
        if !ticket.is_valid() {
            return Err(FreshdeskError::invalid_model("ticket"));
        }

        let Some(changes) = ticket.remote_changes() else {
            tracing::debug!(ticket_id = ?ticket.id(), "No ticket changes to send");
            return Ok(Some(ticket.clone()));
        };
        let ticket_id = ticket
            .id()
            .ok_or_else(|| FreshdeskError::validation("Cant update a ticket without an id"))?;

        let body = self.put(&ticket_path(Some(ticket_id)), changes).await?;
        let updated = Self::parse_optional(body, Ticket::from_json)?;
        ticket.clear_changes();
        Ok(updated)
    }

    /// Posts a reply to the requester of a ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::InvalidModel` if the reply has no body.
    pub async fn reply_to_ticket(
        &self,
        reply: &TicketReply,
    ) -> Result<Option<TicketReply>, FreshdeskError> {
        if !reply.is_valid() {
            return Err(FreshdeskError::invalid_model("ticket reply"));
        }

        let body = self.post(&reply_path(reply.ticket_id()), reply.to_json()?).await?;
        let body = body.map(|raw| with_ticket_id(raw, reply.ticket_id()));
        Self::parse_optional(body, TicketReply::from_json)
    }

    /// Adds a note to a ticket.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::InvalidModel` if the note has no body.
    pub async fn create_note(&self, note: &Note) -> Result<Option<Note>, FreshdeskError> {
        if !note.is_valid() {
            return Err(FreshdeskError::invalid_model("note"));
        }

        let body = self.post(&notes_path(note.ticket_id()), note.to_json()?).await?;
        let body = body.map(|raw| with_ticket_id(raw, note.ticket_id()));
        Self::parse_optional(body, Note::from_json)
    }

    // ========================================================================
    // Ticket field metadata
    // ========================================================================

    /// Fetches ticket field definitions, optionally narrowed to one type.
    ///
    /// Always hits the API. The unfiltered list replaces the cached metadata
    /// used by [`find_ticket_statuses`](Self::find_ticket_statuses) and
    /// [`find_ticket_priorities`](Self::find_ticket_priorities).
    pub async fn find_ticket_fields(
        &self,
        field_type: Option<&str>,
    ) -> Result<Vec<TicketField>, FreshdeskError> {
        let field_type = field_type.map(str::trim).filter(|kind| !kind.is_empty());
        let fields = self.fetch_ticket_fields(field_type).await?;

        if field_type.is_none() {
            *self.ticket_fields.lock().await = Some(fields.clone());
        }

        Ok(fields)
    }

    /// Resolves the helpdesk's status codes.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::MissingTicketField` if the metadata has no
    /// status field.
    pub async fn find_ticket_statuses(&self) -> Result<TicketStatus, FreshdeskError> {
        let fields = self.cached_ticket_fields().await?;
        let field = find_field(&fields, STATUS_FIELD_NAME).ok_or_else(|| {
            FreshdeskError::MissingTicketField {
                name: STATUS_FIELD_NAME.to_string(),
            }
        })?;
        Ok(TicketStatus::parse(field))
    }

    /// Resolves the helpdesk's priority codes.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::MissingTicketField` if the metadata has no
    /// priority field.
    pub async fn find_ticket_priorities(&self) -> Result<TicketPriority, FreshdeskError> {
        let fields = self.cached_ticket_fields().await?;
        let field = find_field(&fields, PRIORITY_FIELD_NAME).ok_or_else(|| {
            FreshdeskError::MissingTicketField {
                name: PRIORITY_FIELD_NAME.to_string(),
            }
        })?;
        Ok(TicketPriority::parse(field))
    }

    /// Returns the cached metadata, fetching it first if absent.
    ///
    /// The lock is held across the fetch, so concurrent callers wait for a
    /// single request instead of issuing their own.
    async fn cached_ticket_fields(&self) -> Result<Vec<TicketField>, FreshdeskError> {
        let mut cache = self.ticket_fields.lock().await;
        if let Some(fields) = cache.as_ref() {
            return Ok(fields.clone());
        }

        tracing::debug!("Ticket field metadata not cached, fetching");
        let fields = self.fetch_ticket_fields(None).await?;
        *cache = Some(fields.clone());
        Ok(fields)
    }

    async fn fetch_ticket_fields(
        &self,
        field_type: Option<&str>,
    ) -> Result<Vec<TicketField>, FreshdeskError> {
        let body = self.get(&ticket_fields_path(field_type), &[]).await?;

        match body {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(FreshdeskError::from))
                .collect(),
            Some(single) => Ok(vec![serde_json::from_value(single)?]),
        }
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn parse_optional<T>(
        body: Option<Value>,
        parse: impl FnOnce(&Value) -> Result<Option<T>, FreshdeskError>,
    ) -> Result<Option<T>, FreshdeskError> {
        match body {
            Some(raw) => parse(&raw),
            None => Ok(None),
        }
    }

    /// Makes a GET request to the Freshdesk API.
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Option<Value>, FreshdeskError> {
        self.request_inner(Method::GET, path, query, None).await
    }

    /// Makes a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Option<Value>, FreshdeskError> {
        self.request_inner(Method::POST, path, &[], Some(body)).await
    }

    /// Makes a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>, FreshdeskError> {
        self.request_inner(Method::PUT, path, &[], Some(body)).await
    }

    /// Makes a single request to the Freshdesk API.
    ///
    /// Returns `None` for a 404 or an empty success body.
    async fn request_inner(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Option<Value>, FreshdeskError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Freshdesk API request"
        );

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", &self.auth_token)
            .header("Accept", "application/json");

        if !query.is_empty() {
            req = req.query(query);
        }

        if let Some(data) = body {
            tracing::trace!(body = %data, "Freshdesk API request body");
            req = req.json(&data);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return FreshdeskError::timeout(
                    self.timeout.unwrap_or_default(),
                    format!("{} {}", method, path),
                );
            }
            FreshdeskError::Http(e)
        })?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path = %path, "Freshdesk returned 404, treating as no result");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let text = response.text().await.map_err(FreshdeskError::Http)?;

        tracing::trace!(body = %text, "Freshdesk API response");

        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Converts a non-success response into a `FreshdeskError`.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        response: reqwest::Response,
    ) -> FreshdeskError {
        let body = response.text().await.unwrap_or_default();
        let body = FreshdeskError::sanitize_message(&body, &self.api_key);
        let body = truncate_body(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::warn!(status = %status, "Freshdesk rejected the API key");
                FreshdeskError::Authentication { status, body }
            }
            _ => FreshdeskError::HttpStatus { status, body },
        }
    }
}

/// Fills in `ticket_id` on reply and note payloads that omit it.
fn with_ticket_id(mut raw: Value, ticket_id: u64) -> Value {
    if let Value::Object(map) = &mut raw {
        map.entry("ticket_id").or_insert(Value::from(ticket_id));
    }
    raw
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> FreshdeskClient {
        let config = Config::new("acme", "k1")
            .unwrap()
            .with_base_url(server.uri())
            .unwrap();
        FreshdeskClient::new(&config).unwrap()
    }

    fn ticket_fields_payload() -> Value {
        json!([
            {"id": 1, "name": "requester", "type": "default_requester"},
            {
                "id": 2,
                "name": "status",
                "type": "default_status",
                "choices": {
                    "2": ["Open", "Being Processed"],
                    "3": ["Pending", "Awaiting your Reply"],
                    "4": ["Resolved", "This ticket has been Resolved"],
                    "5": ["Closed", "This ticket has been Closed"]
                }
            },
            {
                "id": 3,
                "name": "priority",
                "type": "default_priority",
                "choices": {"Low": 1, "Medium": 2, "High": 3, "Urgent": 4}
            }
        ])
    }

    fn ticket_payload(id: u64) -> Value {
        json!({
            "id": id,
            "subject": "Printer on fire",
            "status": 2,
            "priority": 1,
            "description": "<div>Smoke</div>",
            "description_text": "Smoke",
            "requester_id": 5001,
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_auth_token() {
        assert_eq!(auth_token("k1"), "Basic azE6WA==");
    }

    #[test]
    fn test_paths() {
        assert_eq!(ticket_path(Some(42)), "/tickets//42");
        assert_eq!(ticket_path(None), "/tickets/");
        assert_eq!(contact_path(Some(7)), "/contacts/7");
        assert_eq!(contact_path(None), "/contacts");
        assert_eq!(ticket_fields_path(None), "/ticket_fields");
        assert_eq!(ticket_fields_path(Some("a b")), "/ticket_fields/a%20b");
        assert_eq!(notes_path(9), "/tickets/9/notes");
        assert_eq!(reply_path(9), "/tickets/9/reply");
    }

    #[test]
    fn test_default_base_url_for_helpdesk() {
        let client = FreshdeskClient::with_credentials("acme", "k1").unwrap();
        assert_eq!(client.base_url(), "https://acme.freshdesk.com/api/v2");
        assert_eq!(client.ticket_web_url(42), "https://acme.freshdesk.com/a/tickets/42");
        assert!(!format!("{:?}", client).contains("k1"));
        assert_eq!(client.api_key_for_sanitization(), "k1");
    }

    #[test]
    fn test_missing_credentials_fail_construction() {
        assert!(FreshdeskClient::with_credentials("", "k1").is_err());
        assert!(FreshdeskClient::with_credentials("acme", " ").is_err());
    }

    #[test]
    fn test_contact_query() {
        let query = ContactQuery::by_email("a@b.c").with_state("verified");
        assert_eq!(query.id(), None);
        assert_eq!(
            query.params(),
            &[
                ("email".to_string(), "a@b.c".to_string()),
                ("state".to_string(), "verified".to_string())
            ]
        );
        assert_eq!(ContactQuery::by_id("12").unwrap().id(), Some(12));
        assert!(ContactQuery::by_id(0u64).is_err());
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short".to_string()), "short");
        let long = "é".repeat(400);
        let truncated = truncate_body(long);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= MAX_ERROR_BODY_LEN + "...[truncated]".len());
    }

    #[test]
    fn test_with_ticket_id_keeps_existing() {
        assert_eq!(with_ticket_id(json!({"ticket_id": 3}), 9), json!({"ticket_id": 3}));
        assert_eq!(with_ticket_id(json!({"id": 1}), 9), json!({"id": 1, "ticket_id": 9}));
    }

    #[tokio::test]
    async fn test_find_ticket_by_id_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tickets//42"))
            .and(header("Authorization", "Basic azE6WA=="))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ticket = client.find_ticket_by_id(42).await.unwrap();
        assert!(ticket.is_none());
    }

    #[tokio::test]
    async fn test_find_ticket_by_id_parses_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tickets//42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_payload(42)))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ticket = client.find_ticket_by_id("42").await.unwrap().unwrap();
        assert_eq!(ticket.id(), Some(42));
        assert_eq!(ticket.subject(), "Printer on fire");
        assert_eq!(ticket.requester_id(), Some(5001));
        assert!(ticket.remote_changes().is_none());
    }

    #[tokio::test]
    async fn test_find_ticket_by_id_rejects_missing_id() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.find_ticket_by_id(0u64).await.unwrap_err();
        assert!(err.is_local());
    }

    #[tokio::test]
    async fn test_whitespace_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts/7"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.find_contact_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_contact_by_email_returns_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("email", "jane@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Jane", "email": "jane@example.com"},
                {"id": 2, "name": "Jane Two", "email": "jane@example.com"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let contact = client
            .find_contact_by_email("jane@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(contact.id(), Some(1));
        assert_eq!(contact.name(), "Jane");
    }

    #[tokio::test]
    async fn test_find_contacts_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let contacts = client.find_contacts(&ContactQuery::new()).await.unwrap();
        assert!(contacts.is_empty());
        assert!(client.find_contact_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(client.find_contact_by_email("  ").await.is_err());
    }

    #[tokio::test]
    async fn test_create_contact_posts_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/contacts"))
            .and(body_json(json!({"name": "John", "email": "john@example.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 77, "name": "John", "email": "john@example.com", "active": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let contact = Contact::new("John").unwrap().with_email("john@example.com").unwrap();
        let created = client.create_contact(&contact).await.unwrap().unwrap();
        assert_eq!(created.id(), Some(77));
    }

    #[tokio::test]
    async fn test_invalid_models_are_not_sent() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;

        let contact = Contact::new("No Channels").unwrap();
        let err = client.create_contact(&contact).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid freshdesk contact");

        let ticket = Ticket::new("No requester", 2, 1).unwrap();
        assert!(matches!(
            client.create_ticket(&ticket).await,
            Err(FreshdeskError::InvalidModel { kind: "ticket" })
        ));

        let note = Note::new(5).unwrap();
        assert!(client.create_note(&note).await.is_err());

        let reply = TicketReply::new(5).unwrap();
        assert!(client.reply_to_ticket(&reply).await.is_err());
    }

    #[tokio::test]
    async fn test_create_ticket_posts_to_collection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(ticket_payload(100)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ticket = Ticket::new("Printer on fire", 2, 1)
            .unwrap()
            .with_description("Smoke")
            .unwrap()
            .with_requester_id(5001)
            .unwrap();
        let created = client.create_ticket(&ticket).await.unwrap().unwrap();
        assert_eq!(created.id(), Some(100));
    }

    #[tokio::test]
    async fn test_update_ticket_without_changes_skips_http() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut ticket = Ticket::from_json(&ticket_payload(42)).unwrap().unwrap();
        let returned = client.update_ticket(&mut ticket).await.unwrap().unwrap();
        assert_eq!(returned, ticket);
    }

    #[tokio::test]
    async fn test_update_ticket_sends_only_changes() {
        let server = MockServer::start().await;
        let mut updated = ticket_payload(42);
        updated["status"] = json!(4);
        Mock::given(method("PUT"))
            .and(path("/tickets//42"))
            .and(body_json(json!({"status": 4})))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut ticket = Ticket::from_json(&ticket_payload(42)).unwrap().unwrap();
        ticket.set_status(4).unwrap();
        let returned = client.update_ticket(&mut ticket).await.unwrap().unwrap();
        assert_eq!(returned.status(), 4);
        assert!(ticket.remote_changes().is_none());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_pending_changes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/tickets//42"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let mut ticket = Ticket::from_json(&ticket_payload(42)).unwrap().unwrap();
        ticket.set_status(4).unwrap();

        let err = client.update_ticket(&mut ticket).await.unwrap_err();
        assert!(matches!(err, FreshdeskError::HttpStatus { .. }));
        assert_eq!(ticket.remote_changes(), Some(json!({"status": 4})));
    }

    #[tokio::test]
    async fn test_update_ticket_without_id_fails() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;
        let mut ticket = Ticket::new("Local only", 2, 1)
            .unwrap()
            .with_description("x")
            .unwrap()
            .with_requester_id(1)
            .unwrap();
        ticket.set_priority(3).unwrap();
        let err = client.update_ticket(&mut ticket).await.unwrap_err();
        assert!(matches!(err, FreshdeskError::Validation(_)));
        assert!(ticket.remote_changes().is_some());
    }

    #[tokio::test]
    async fn test_create_note_fills_ticket_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/42/notes"))
            .and(body_json(json!({
                "private": true,
                "notify_emails": [],
                "body": "Checked the logs"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 900, "body": "Checked the logs", "private": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let note = Note::new(42).unwrap().with_body("Checked the logs").unwrap();
        let created = client.create_note(&note).await.unwrap().unwrap();
        assert_eq!(created.id(), Some(900));
        assert_eq!(created.ticket_id(), 42);
    }

    #[tokio::test]
    async fn test_reply_to_ticket() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/42/reply"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 901, "ticket_id": 42, "body": "On it"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let reply = TicketReply::new(42).unwrap().with_body("On it").unwrap();
        let sent = client.reply_to_ticket(&reply).await.unwrap().unwrap();
        assert_eq!(sent.id(), Some(901));
    }

    #[tokio::test]
    async fn test_error_status_carries_sanitized_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"description":"Validation failed","key":"k1"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ticket = Ticket::new("Bad", 2, 1)
            .unwrap()
            .with_description("x")
            .unwrap()
            .with_requester_id(1)
            .unwrap();
        match client.create_ticket(&ticket).await {
            Err(FreshdeskError::HttpStatus { status, body }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("Validation failed"));
                assert!(!body.contains("\"k1\""));
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"code":"invalid_credentials","key":"k1"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.find_ticket_fields(None).await {
            Err(FreshdeskError::Authentication { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("invalid_credentials"));
                assert!(!body.contains("\"k1\""));
            }
            other => panic!("expected Authentication, got {:?}", other),
        }
        let err = client.test_connection().await.unwrap_err();
        assert!(err.to_string().contains("FRESHDESK_API_KEY"));
    }

    #[tokio::test]
    async fn test_statuses_and_priorities_share_one_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_fields_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let other = client.clone();
        let (statuses, priorities) =
            tokio::join!(client.find_ticket_statuses(), other.find_ticket_priorities());
        let statuses = statuses.unwrap();
        let priorities = priorities.unwrap();

        assert_eq!(statuses.open().unwrap(), 2);
        assert_eq!(statuses.closed().unwrap(), 5);
        assert!(statuses.approved().is_err());
        assert_eq!(priorities.urgent().unwrap(), 4);

        let again = client.find_ticket_statuses().await.unwrap();
        assert_eq!(again, statuses);
    }

    #[tokio::test]
    async fn test_separate_clients_do_not_share_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_fields_payload()))
            .expect(2)
            .mount(&server)
            .await;

        let first = client_for(&server).await;
        let second = client_for(&server).await;
        tokio_test::assert_ok!(first.find_ticket_statuses().await);
        tokio_test::assert_ok!(second.find_ticket_statuses().await);
    }

    #[tokio::test]
    async fn test_filtered_fields_do_not_fill_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields/default_status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_fields_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let filtered = client.find_ticket_fields(Some("default_status")).await.unwrap();
        assert!(filtered.is_empty());
        assert_eq!(client.find_ticket_priorities().await.unwrap().low().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_status_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "subject", "type": "default_subject"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.find_ticket_statuses().await,
            Err(FreshdeskError::MissingTicketField { ref name }) if name == "status"
        ));
    }

    #[tokio::test]
    async fn test_connection_success_primes_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ticket_fields"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ticket_fields_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.test_connection().await.unwrap();
        assert_eq!(client.find_ticket_statuses().await.unwrap().pending().unwrap(), 3);
    }
}
