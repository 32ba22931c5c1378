//! CompletionBackend trait definition.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition). The concrete
//! HTTP implementation lives in marketeer-infra.

use marketeer_types::llm::{BackendError, Message};

/// One externally configured text-generation endpoint.
///
/// `complete` performs a single bounded round-trip with no retries. Callers
/// convert every [`BackendError`] into user-displayable text and persist it
/// like any other assistant turn, so a backend outage never breaks a chat.
pub trait CompletionBackend: Send + Sync {
    /// Human-readable backend name for logs (e.g., "local_chat").
    fn name(&self) -> &str;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Send the assembled context and return the generated text.
    fn complete(
        &self,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<String, BackendError>> + Send;
}
