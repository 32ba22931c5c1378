//! Business logic for Marketeer.
//!
//! This crate defines the repository and backend traits (implemented in
//! `marketeer-infra`) and the services that orchestrate them. It never
//! touches a database or a socket directly, which keeps every service
//! testable against in-memory doubles.

pub mod chat;
pub mod context;
pub mod llm;
pub mod prompt;
pub mod user;
