//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **security**: Argon2id credential hashing
//!
//! Adapters translate between domain types and infrastructure types and carry
//! no business logic.

pub mod persistence;
pub mod security;
