//! Line-oriented command script driving the review session.

use anyhow::{anyhow, bail, Result};
use review_core::{BookmarkId, CategoryTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw engine or host message, decoded by the bridge.
    Inbound(String),
    Start(Option<String>),
    Search(String),
    Toggle { tag: CategoryTag, enabled: bool },
    Remove(BookmarkId),
    Repair {
        id: BookmarkId,
        new_url: Option<String>,
    },
    Edit(BookmarkId),
    Submit { title: String, url: String },
    Cancel,
    Yes,
    No,
    RepairAll,
    RemoveErrors,
    Close,
    Show,
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.starts_with('{') {
        return Ok(Some(Command::Inbound(line.to_string())));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "start" => Command::Start(optional(rest)),
        "search" => Command::Search(rest.to_string()),
        "toggle" => {
            let (name, state) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: toggle <category> <on|off>"))?;
            let tag = CategoryTag::from_name(name)
                .ok_or_else(|| anyhow!("unknown category {name:?}"))?;
            let enabled = match state.trim() {
                "on" => true,
                "off" => false,
                other => bail!("expected on or off, got {other:?}"),
            };
            Command::Toggle { tag, enabled }
        }
        "remove" => Command::Remove(required_id(word, rest)?),
        "repair" => {
            let mut parts = rest.split_whitespace();
            let id = required_id(word, parts.next().unwrap_or_default())?;
            Command::Repair {
                id,
                new_url: parts.next().map(str::to_string),
            }
        }
        "edit" => Command::Edit(required_id(word, rest)?),
        "submit" => {
            let (title, url) = rest
                .split_once('|')
                .ok_or_else(|| anyhow!("usage: submit <title> | <url>"))?;
            Command::Submit {
                title: title.trim().to_string(),
                url: url.trim().to_string(),
            }
        }
        "cancel" => Command::Cancel,
        "yes" => Command::Yes,
        "no" => Command::No,
        "repair-all" => Command::RepairAll,
        "remove-errors" => Command::RemoveErrors,
        "close" => Command::Close,
        "show" => Command::Show,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

fn optional(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

fn required_id(command: &str, rest: &str) -> Result<BookmarkId> {
    let id = rest.trim();
    if id.is_empty() {
        bail!("usage: {command} <id>");
    }
    Ok(BookmarkId::new(id))
}
