//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Inserts take any
//! `PgExecutor` so they can also run inside a transaction.

pub mod client_repo;
pub mod project_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
