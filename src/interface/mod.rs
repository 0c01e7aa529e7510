//! # Interface Layer
//!
//! The user-facing keywords. Each responder is registered with the router at startup.

pub mod responders;
