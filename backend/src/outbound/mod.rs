//! Outbound adapters backing the domain ports with real infrastructure.

pub mod cache;
pub mod persistence;
pub mod security;
