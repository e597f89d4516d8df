//! Domain types and pure logic for the clientdesk backend.
//!
//! Nothing in this crate performs I/O; persistence lives in `clientdesk-db`
//! and HTTP concerns in `clientdesk-api`.

pub mod analytics;
pub mod error;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
