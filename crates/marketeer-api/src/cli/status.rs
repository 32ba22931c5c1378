//! System status dashboard command.

use anyhow::Result;
use console::style;

use marketeer_core::chat::repository::ChatRepository;
use marketeer_core::llm::CompletionBackend;
use marketeer_core::user::repository::UserRepository;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows account/chat/message counts, backend configuration, and data dir.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let users = state.auth_service.users().count_users().await?;
    let chats = state.chat_service.repo().count_chats().await?;
    let messages = state.chat_service.repo().count_messages().await?;
    let backend = state.chat_service.backend();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "users": users,
            "chats": chats,
            "messages": messages,
            "backend": {
                "mode": backend.name(),
                "model": backend.model(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Marketeer v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Accounts ──").dim());
    println!("  Users: {}", style(users).bold());
    println!();

    println!("  {}", style("── Conversations ──").dim());
    println!("  Chats:    {}", style(chats).bold());
    println!("  Messages: {}", style(messages).bold());
    println!();

    println!("  {}", style("── Backend ──").dim());
    println!("  Mode:  {}", backend.name());
    println!("  Model: {}", backend.model());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
