//! Request handlers, one module per resource.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod project;
