//! Review core: pure state machine for browsing and acting on the result of
//! a bookmark validation run.
mod action;
mod bulk;
mod counters;
mod duplicates;
mod effect;
mod error;
mod filter;
mod msg;
mod mutation;
mod node;
mod results;
mod state;
pub mod tree;
mod update;
mod view_model;

pub use action::{Action, BulkAction, EditMode, PendingConfirmation};
pub use counters::{CounterSnapshot, RunCounters, INITIAL_PROGRESS};
pub use duplicates::{DuplicateEntry, DuplicateGroup, DuplicateView};
pub use effect::Effect;
pub use error::ReviewError;
pub use filter::{CategoryFilter, Filters, SearchFilter};
pub use msg::{ListItemUpdate, Msg};
pub use mutation::ReplaceOutcome;
pub use node::{BookmarkId, BookmarkStatus, CategorySet, CategoryTag, ResultNode};
pub use results::ResultsView;
pub use state::{AppState, Affordances, EditSurface, ResultPane, RunPhase};
pub use tree::{build_tree, ViewTree, NO_TITLE_PLACEHOLDER};
pub use update::update;
pub use view_model::{AppViewModel, TreeRowView};
