//! Character admin CLI commands: set, show.
//!
//! Characters are never written by the chat path; these commands are how
//! personas get into the store.

use anyhow::Result;
use console::style;

use personachat_core::repository::character::CharacterRepository;
use personachat_infra::sqlite::character::SqliteCharacterRepository;
use personachat_types::character::Character;

use crate::cli::Output;

/// Create or replace a character.
///
/// # Examples
///
/// ```bash
/// pchat character set bot-1 --prompt "You are a helpful pirate." --name "Captain"
/// ```
pub async fn set_character(
    repo: &SqliteCharacterRepository,
    id: &str,
    prompt: &str,
    name: &str,
    output: Output,
) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("--prompt must not be empty");
    }

    let character = repo.upsert(id, prompt, name).await?;

    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&character)?);
            return Ok(());
        }
        Output::Quiet => return Ok(()),
        Output::Styled => {}
    }

    println!();
    println!(
        "  {} Character '{}' saved",
        style("✓").green().bold(),
        style(&character.character_id).cyan()
    );
    println!();

    Ok(())
}

/// Show a character's stored persona.
pub async fn show_character(
    repo: &SqliteCharacterRepository,
    id: &str,
    output: Output,
) -> Result<()> {
    let character = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("character not found: {id}"))?;

    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&character)?);
            return Ok(());
        }
        Output::Quiet => return Ok(()),
        Output::Styled => {}
    }

    print_character(&character);
    Ok(())
}

fn print_character(character: &Character) {
    let updated = chrono::DateTime::from_timestamp(character.updated_at, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| character.updated_at.to_string());

    println!();
    println!(
        "  {}  {}",
        style("ID:").bold(),
        style(&character.character_id).cyan()
    );
    if !character.name.is_empty() {
        println!("  {}  {}", style("Name:").bold(), character.name);
    }
    println!("  {}  {}", style("Updated:").bold(), style(updated).dim());
    println!();
    println!("  {}", style("Prompt:").bold());
    for line in character.prompt_template.lines() {
        println!("    {line}");
    }
    println!();
}
