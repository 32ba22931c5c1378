//! Account CLI commands: create and list users, list a user's chats.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use console::style;
use dialoguer::Password;

use marketeer_core::user::repository::UserRepository;
use marketeer_types::error::AuthError;

use crate::state::AppState;

/// Register an account, prompting for the password interactively.
pub async fn create_user(
    state: &AppState,
    username: &str,
    email: &str,
    json: bool,
) -> Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    if password.len() < 8 {
        anyhow::bail!("password must be at least 8 characters");
    }

    let user = match state.auth_service.register(username, email, &password).await {
        Ok(user) => user,
        Err(e @ (AuthError::UsernameTaken(_) | AuthError::EmailTaken(_))) => {
            anyhow::bail!("{e}");
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let out = serde_json::json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        println!(
            "  {} Account '{}' created ({})",
            style("✓").green().bold(),
            style(&user.username).cyan(),
            user.email
        );
        println!();
    }

    Ok(())
}

/// List all registered accounts.
pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.auth_service.users().list_users().await?;

    if json {
        let out: Vec<serde_json::Value> = users
            .iter()
            .map(|u| {
                serde_json::json!({
                    "id": u.id,
                    "username": u.username,
                    "email": u.email,
                    "created_at": u.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  No accounts yet. Create one with {}.",
            style("mktr create user <username> <email>").cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Username", "Email", "Created"]);
    for user in &users {
        table.add_row(vec![
            user.username.clone(),
            user.email.clone(),
            user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// List one account's chats, newest first.
pub async fn list_chats(state: &AppState, username: &str, json: bool) -> Result<()> {
    let Some(user) = state.auth_service.users().get_by_username(username).await? else {
        anyhow::bail!("no account named '{username}'");
    };

    let chats = state.chat_service.list_chats(&user.id).await?;

    if json {
        let out: Vec<serde_json::Value> = chats
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "name": c.name,
                    "kind": c.kind,
                    "created_at": c.created_at,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if chats.is_empty() {
        println!();
        println!("  '{}' has no chats yet.", style(username).cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Name", "Kind", "Created"]);
    for chat in &chats {
        table.add_row(vec![
            chat.name.clone(),
            chat.kind.to_string(),
            chat.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
