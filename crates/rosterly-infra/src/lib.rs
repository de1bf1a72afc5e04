//! Infrastructure implementations for Rosterly.
//!
//! Provides the HTTP store client that implements the rosterly-core store
//! traits against the console backend, plus the client configuration
//! loader.

pub mod config;
pub mod http;
