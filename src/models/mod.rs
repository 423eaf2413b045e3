//! Data models for the Freshdesk API.
//!
//! This module contains the validated value objects sent to and rebuilt from
//! the API (contacts, tickets, notes, replies), the ticket change tracker,
//! and the ticket field metadata with its status and priority parsers.

mod changes;
mod common;
mod contact;
mod note;
mod priority;
mod reply;
mod status;
mod ticket;
mod ticket_field;

pub use changes::*;
pub use common::{normalize_id, Numeric};
pub use contact::*;
pub use note::*;
pub use priority::*;
pub use reply::*;
pub use status::*;
pub use ticket::*;
pub use ticket_field::*;
