//! # Application Layer
//!
//! Contains the dispatch core of the bot: the responder registry, the request parser,
//! the router that ties them together, and the sender access policy.

pub mod access;
pub mod parsing;
pub mod registry;
pub mod router;
