//! One-shot chat command: the same handler the REST endpoint runs.

use anyhow::Result;
use console::style;
use serde_json::json;

use personachat_types::chat::ChatRequest;

use crate::cli::Output;
use crate::http::error::chat_status;
use crate::state::AppState;

/// Send a message to a character and print the reply.
///
/// With `--json` the output is the HTTP body the API would return, and a
/// failure also prints its `{"error"}` body before exiting non-zero.
///
/// # Examples
///
/// ```bash
/// pchat chat --user u1 --character bot-1 "Hello"
/// ```
pub async fn chat(
    state: &AppState,
    user: String,
    character: String,
    message: String,
    output: Output,
) -> Result<()> {
    let request = ChatRequest::new(user, character.clone(), message);

    let reply = match state.chat_service.handle(request).await {
        Ok(reply) => reply,
        Err(e) => {
            if output == Output::Json {
                let body = json!({
                    "error": e.to_string(),
                    "status": chat_status(&e).as_u16(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            return Err(e.into());
        }
    };

    match output {
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
            return Ok(());
        }
        Output::Quiet => return Ok(()),
        Output::Styled => {}
    }

    println!();
    println!("  {} {}", style(&character).cyan().bold(), reply.message);
    println!();
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(reply.session_id.to_string()).dim()
    );
    println!(
        "  {}  {:.3}s",
        style("Time:").bold(),
        reply.status.execution_time
    );
    println!();

    Ok(())
}
