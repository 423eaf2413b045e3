//! # Freshdesk
//!
//! A typed client for the Freshdesk helpdesk REST API (v2), plus an MCP
//! (Model Context Protocol) server that exposes it as tools.
//!
//! ## Features
//!
//! - **Contacts**: look up by email or id, create new contacts
//! - **Tickets**: find, create and update tickets; only changed fields are sent
//! - **Conversations**: reply to requesters and add private or public notes
//! - **Metadata**: ticket fields, with status and priority codes parsed and cached
//! - **Security**: the API key is never logged or exposed in error messages
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with message sanitization
//! - [`freshdesk_client`] - HTTP client for the Freshdesk API
//! - [`models`] - Validated value objects for contacts, tickets, notes and replies
//! - [`server`] - MCP server implementation with tool routing
//! - [`tools`] - Tool input parameter structs
//!
//! ## Configuration
//!
//! - `FRESHDESK_HELPDESK_NAME`: subdomain of the helpdesk (`acme` for `acme.freshdesk.com`)
//! - `FRESHDESK_API_KEY`: agent API key
//!
//! Optional:
//! - `FRESHDESK_BASE_URL`: full API root, overriding the one built from the helpdesk name
//! - `FRESHDESK_TIMEOUT_SECS`: request timeout; requests never time out when unset
//! - `RUST_LOG`: Log level (e.g., `freshdesk=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use freshdesk::freshdesk_client::FreshdeskClient;
//! use freshdesk::models::Ticket;
//!
//! async fn example() -> Result<(), freshdesk::error::FreshdeskError> {
//!     let client = FreshdeskClient::with_credentials("acme", "your-api-key")?;
//!
//!     let statuses = client.find_ticket_statuses().await?;
//!     let priorities = client.find_ticket_priorities().await?;
//!
//!     let requester = client
//!         .find_contact_by_email("jane@example.com")
//!         .await?
//!         .and_then(|contact| contact.id());
//!
//!     if let Some(requester_id) = requester {
//!         let ticket = Ticket::new("Printer on fire", statuses.open()?, priorities.urgent()?)?
//!             .with_description("Smoke coming out of tray 2")?
//!             .with_requester_id(requester_id)?;
//!
//!         if let Some(created) = client.create_ticket(&ticket).await? {
//!             let mut created = created;
//!             created.set_status(statuses.resolved()?)?;
//!             client.update_ticket(&mut created).await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod freshdesk_client;
pub mod models;
pub mod server;
pub mod tools;
