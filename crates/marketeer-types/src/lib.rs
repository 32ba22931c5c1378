//! Shared domain types for Marketeer.
//!
//! This crate holds the plain data types exchanged between the core logic,
//! the infrastructure implementations, and the API layer. It performs no I/O.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod user;
