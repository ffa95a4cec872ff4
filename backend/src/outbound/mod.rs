//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs and tests
//! - **cache**: Redis-backed caching with an in-memory fallback
//! - **hashing**: Argon2id password hashing
//! - **mail**: SMTP delivery, with a bounded outbox for local runs
//! - **mail_templates**: Handlebars rendering of email bodies
//! - **storage**: disk storage for uploaded avatars
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod cache;
pub mod hashing;
pub mod mail;
pub mod mail_templates;
pub mod memory;
pub mod persistence;
pub mod storage;
