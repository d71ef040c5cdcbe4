//! Markup extraction via an external process-based parser.
//!
//! The markup parser is an external collaborator: lamina spawns the
//! configured command with the markup source directory as its final
//! argument and reads a JSON array of component docs from stdout.

use std::path::Path;

use tokio::process::Command;

use crate::coordinator::ExtractError;
use crate::model::ParsedMarkupDoc;

/// Run the external markup parser and decode its stdout.
///
/// The command is split on whitespace; single or double quotes group a
/// program path or argument that contains spaces. A non-zero exit status or
/// malformed output is fatal.
pub async fn extract_markup(
    command: &str,
    html_dir: &Path,
) -> Result<Vec<ParsedMarkupDoc>, ExtractError> {
    let mut parts = split_command(command).into_iter();
    let program = parts.next().ok_or_else(|| ExtractError::MarkupCommand {
        command: command.to_string(),
        message: "empty command".to_string(),
    })?;

    let output = Command::new(program)
        .args(parts)
        .arg(html_dir)
        .output()
        .await
        .map_err(|e| ExtractError::MarkupCommand {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ExtractError::MarkupParser {
            command: command.to_string(),
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let docs: Vec<ParsedMarkupDoc> =
        serde_json::from_slice(&output.stdout).map_err(|e| ExtractError::MarkupOutput {
            command: command.to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!("Markup parser returned {} component docs", docs.len());

    Ok(docs)
}

/// Split a command line on whitespace, honoring single and double quotes so
/// paths with spaces stay intact.
fn split_command(command: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in command.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
