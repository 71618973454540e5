//! Conversation CLI commands: show, list.

use anyhow::Result;
use console::style;
use uuid::Uuid;

use personachat_core::repository::conversation::ConversationRepository;
use personachat_infra::sqlite::conversation::SqliteConversationRepository;
use personachat_types::conversation::Conversation;

use crate::cli::Output;

/// Show one recorded exchange.
pub async fn show_conversation(
    repo: &SqliteConversationRepository,
    session_id: &str,
    output: Output,
) -> Result<()> {
    let session_id: Uuid = session_id
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid session id: {session_id}"))?;

    let conversation = repo
        .get_by_id(&session_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("conversation not found: {session_id}"))?;

    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&conversation)?);
            return Ok(());
        }
        Output::Quiet => return Ok(()),
        Output::Styled => {}
    }

    println!();
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(conversation.session_id.to_string()).dim()
    );
    println!("  {}  {}", style("User:").bold(), conversation.user_id);
    println!(
        "  {}  {}",
        style("Character:").bold(),
        style(&conversation.character_id).cyan()
    );
    println!("  {}  {}", style("Created:").bold(), created_label(&conversation));
    println!();
    for message in &conversation.messages {
        println!("  {} {}", style(format!("[{}]", message.kind)).bold(), message.content);
    }
    println!();

    Ok(())
}

/// List a user's exchanges, newest first.
pub async fn list_conversations(
    repo: &SqliteConversationRepository,
    user_id: &str,
    limit: i64,
    output: Output,
) -> Result<()> {
    if limit < 1 {
        anyhow::bail!("--limit must be at least 1");
    }

    let conversations = repo.list_by_user(user_id, Some(limit)).await?;

    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&conversations)?);
            return Ok(());
        }
        Output::Quiet => return Ok(()),
        Output::Styled => {}
    }

    if conversations.is_empty() {
        println!();
        println!(
            "  {} No conversations for '{}'. Start one with: {}",
            style("i").blue().bold(),
            user_id,
            style("pchat chat --user <id> --character <id> <message>").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    for conversation in &conversations {
        let preview = conversation
            .user_message()
            .map(|m| truncate(&m.content, 40))
            .unwrap_or_default();
        let reply = conversation
            .character_message()
            .map(|m| truncate(&m.content, 40))
            .unwrap_or_default();

        println!(
            "  {}  {}  {}",
            style(created_label(conversation)).dim(),
            style(&conversation.character_id).cyan(),
            style(conversation.session_id.to_string()).dim()
        );
        println!("      {preview} {} {reply}", style("→").dim());
    }
    println!();
    println!(
        "  {} conversation(s)",
        style(conversations.len()).bold()
    );
    println!();

    Ok(())
}

fn created_label(conversation: &Conversation) -> String {
    conversation
        .created_at_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| conversation.created_at.to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
