//! Session history for modals: the current location, `push_state`, and
//! back / forward traversal.

pub mod history;

pub use history::{History, HistoryEntry};
pub use url::Url;
