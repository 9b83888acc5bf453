//! Serde shapes of the inbound engine messages.

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(tag = "message", rename_all = "kebab-case")]
pub(crate) enum InboundMessage {
    TotalBookmarks {
        total_bookmarks: u64,
    },
    UpdateCounters {
        total_bookmarks: u64,
        checked_bookmarks: u64,
        bookmarks_errors: u64,
        bookmarks_warnings: u64,
        unknown_bookmarks: u64,
        progress: f64,
    },
    Finished {
        #[serde(default)]
        bookmarks: Vec<WireNode>,
        #[serde(default)]
        debug: Vec<Value>,
    },
    ShowDuplicatesUi {
        #[serde(default)]
        warnings: u64,
        /// URL -> duplicate entries, in the order the engine sent them.
        #[serde(default)]
        bookmarks: Map<String, Value>,
    },
    UpdateListitem {
        #[serde(rename = "bookmarkId")]
        bookmark_id: String,
        #[serde(default)]
        mode: Option<String>,
        bookmark: Option<WireNode>,
        title: Option<String>,
        path: Option<Vec<String>>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireNode {
    pub id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub new_url: Option<String>,
    #[serde(default)]
    pub children: Vec<WireNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireDuplicate {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub path: Vec<String>,
    pub url: Option<String>,
}
