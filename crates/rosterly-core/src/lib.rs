//! Business logic and store trait definitions for Rosterly.
//!
//! This crate defines the "ports" (store traits) that the infrastructure
//! layer implements, plus the two components that do real work: the
//! resource submission orchestrator and the paginated list cache. It
//! depends only on `rosterly-types` -- never on `rosterly-infra` or any
//! HTTP crate.

pub mod cache;
pub mod directory;
pub mod moderation;
pub mod store;
pub mod submission;
