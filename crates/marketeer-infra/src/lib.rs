//! Infrastructure implementations for Marketeer.
//!
//! Concrete adapters behind the traits defined in `marketeer-core`:
//! SQLite persistence, the HTTP completion backend, argon2 password hashing,
//! and configuration loading.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod sqlite;
