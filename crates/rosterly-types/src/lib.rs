//! Shared domain types for Rosterly.
//!
//! This crate contains the core domain types used across the Rosterly
//! console: Resource, Skill, Category, VendorSkill, file attachments, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod error;
pub mod file;
pub mod page;
pub mod resource;
pub mod skill;
