use review_core::{
    BookmarkId, BookmarkStatus, CounterSnapshot, DuplicateEntry, DuplicateGroup, EditMode,
    ListItemUpdate, Msg, ResultNode,
};
use review_logging::review_trace;

use crate::wire::{InboundMessage, WireDuplicate, WireNode};
use crate::BridgeError;

/// Decode one inbound engine message.
pub fn decode_inbound(line: &str) -> Result<Msg, BridgeError> {
    let message: InboundMessage = serde_json::from_str(line)?;
    let msg = match message {
        InboundMessage::TotalBookmarks { total_bookmarks } => Msg::TotalBookmarks {
            total: total_bookmarks,
        },
        InboundMessage::UpdateCounters {
            total_bookmarks,
            checked_bookmarks,
            bookmarks_errors,
            bookmarks_warnings,
            unknown_bookmarks,
            progress,
        } => Msg::CountersUpdated(CounterSnapshot {
            total: total_bookmarks,
            checked: checked_bookmarks,
            errors: bookmarks_errors,
            warnings: bookmarks_warnings,
            unknown: unknown_bookmarks,
            progress,
        }),
        InboundMessage::Finished { bookmarks, debug } => Msg::Finished {
            bookmarks: bookmarks
                .into_iter()
                .map(convert_node)
                .collect::<Result<_, _>>()?,
            debug: debug.iter().map(ToString::to_string).collect(),
        },
        InboundMessage::ShowDuplicatesUi {
            warnings,
            bookmarks,
        } => {
            let mut groups = Vec::with_capacity(bookmarks.len());
            for (url, entries) in bookmarks {
                let entries: Vec<WireDuplicate> = serde_json::from_value(entries)?;
                groups.push(DuplicateGroup {
                    entries: entries
                        .into_iter()
                        .map(|entry| convert_duplicate(entry, &url))
                        .collect(),
                    url,
                });
            }
            Msg::DuplicatesReported { warnings, groups }
        }
        InboundMessage::UpdateListitem {
            bookmark_id,
            mode,
            bookmark,
            title,
            path,
        } => {
            let mode = mode.as_deref().map_or(EditMode::Default, EditMode::from_wire);
            let update = match mode {
                EditMode::Duplicate => ListItemUpdate::Retitle {
                    title: title.ok_or_else(|| missing("title"))?,
                    path: path.ok_or_else(|| missing("path"))?,
                },
                EditMode::Default => {
                    let bookmark = bookmark.ok_or_else(|| missing("bookmark"))?;
                    ListItemUpdate::Replace(convert_node(bookmark)?)
                }
            };
            Msg::ListItemUpdated {
                bookmark_id: BookmarkId::new(bookmark_id),
                update,
            }
        }
    };
    review_trace!("Decoded inbound message: {:?}", msg);
    Ok(msg)
}

fn missing(field: &'static str) -> BridgeError {
    BridgeError::MissingField {
        message: "update-listitem",
        field,
    }
}

fn convert_node(node: WireNode) -> Result<ResultNode, BridgeError> {
    let status = node.status.as_deref().map(parse_status).transpose()?;
    let children = node
        .children
        .into_iter()
        .map(convert_node)
        .collect::<Result<_, _>>()?;
    Ok(ResultNode {
        id: BookmarkId::new(node.id),
        title: node.title,
        url: node.url,
        status,
        new_url: node.new_url,
        children,
    })
}

fn convert_duplicate(entry: WireDuplicate, group_url: &str) -> DuplicateEntry {
    DuplicateEntry {
        id: BookmarkId::new(entry.id),
        title: entry.title,
        path: entry.path,
        url: entry.url.unwrap_or_else(|| group_url.to_string()),
    }
}

fn parse_status(raw: &str) -> Result<BookmarkStatus, BridgeError> {
    const STATUSES: [(&str, BookmarkStatus); 6] = [
        ("ok", BookmarkStatus::Ok),
        ("redirect", BookmarkStatus::Redirect),
        ("not_found", BookmarkStatus::NotFound),
        ("fetch_error", BookmarkStatus::FetchError),
        ("timeout", BookmarkStatus::Timeout),
        ("unknown_error", BookmarkStatus::UnknownError),
    ];
    STATUSES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, status)| *status)
        .ok_or_else(|| BridgeError::UnknownStatus(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_ignore_case() {
        assert_eq!(parse_status("NOT_FOUND").unwrap(), BookmarkStatus::NotFound);
        assert_eq!(parse_status("Redirect").unwrap(), BookmarkStatus::Redirect);
        assert!(matches!(
            parse_status("gone"),
            Err(BridgeError::UnknownStatus(raw)) if raw == "gone"
        ));
    }
}
