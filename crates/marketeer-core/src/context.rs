//! Conversation assembler: builds the outbound model context.
//!
//! Pure data transformation over already-validated inputs; there is no
//! failure path. The assembler performs no truncation or token budgeting, so
//! context size grows with chat length — a known cost/latency caveat that is
//! left to the backend's context window rather than handled here.

use marketeer_types::chat::ChatKind;
use marketeer_types::llm::{Message, MessageRole};

use crate::prompt::directive_for;

/// Assemble the ordered context for one completion round-trip.
///
/// Layout is exactly: one system directive selected by `kind`, every history
/// entry unchanged and in stored order, then one user entry holding
/// `new_message`. Nothing is reordered, deduplicated, or summarized.
pub fn assemble(kind: &ChatKind, history: &[Message], new_message: &str) -> Vec<Message> {
    let mut context = Vec::with_capacity(history.len() + 2);

    context.push(Message::new(MessageRole::System, directive_for(kind)));
    context.extend(history.iter().cloned());
    context.push(Message::new(MessageRole::User, new_message));

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_fixture() -> Vec<Message> {
        vec![
            Message::new(MessageRole::Assistant, "Hi! What would you like to analyze?"),
            Message::new(MessageRole::User, "Last month's funnel numbers."),
            Message::new(MessageRole::Assistant, "Send them over."),
        ]
    }

    #[test]
    fn test_shape_is_system_history_user() {
        let history = history_fixture();
        let context = assemble(&ChatKind::Analysis, &history, "Here they are: ...");

        assert_eq!(context.len(), 1 + history.len() + 1);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[0].content, directive_for(&ChatKind::Analysis));

        let last = context.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "Here they are: ...");
    }

    #[test]
    fn test_history_passes_through_unchanged_and_in_order() {
        let history = history_fixture();
        let context = assemble(&ChatKind::Seo, &history, "next");

        for (i, original) in history.iter().enumerate() {
            assert_eq!(context[i + 1].role, original.role);
            assert_eq!(context[i + 1].content, original.content);
        }
    }

    #[test]
    fn test_empty_history_yields_two_entries() {
        let context = assemble(&ChatKind::Ads, &[], "first message");
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[1].role, MessageRole::User);
        assert_eq!(context[1].content, "first message");
    }

    #[test]
    fn test_unknown_kind_uses_fallback_directive() {
        let context = assemble(&ChatKind::Other("custom".to_string()), &[], "hello");
        assert_eq!(
            context[0].content,
            directive_for(&ChatKind::Other("custom".to_string()))
        );
    }
}
