//! MCP tool inputs for the Freshdesk server.
//!
//! This module contains the parameter types for the MCP tools that expose
//! Freshdesk helpdesk operations.

mod inputs;

pub use inputs::*;
