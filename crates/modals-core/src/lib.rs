//! modals core.
//!
//! A controller that shows and hides modal panels already present in a
//! document. It listens once at the page level, routes pointer, touch,
//! keyboard and navigation events by selector, keeps a single overlay
//! alive while any modal is open, and mirrors the open modal in the URL
//! fragment so panels can be deep-linked and reopened with back/forward.

// Re-exports from the foundation crates.
pub use modals_dom as dom;
pub use modals_nav as nav;
pub use modals_types::error;
pub use modals_types::input;

pub mod config;
pub mod controller;
pub mod page;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{Hook, HookResult, ModalConfig, ModalOptions};
pub use controller::{ModalController, Transition};
pub use page::{DispatchOutcome, EventHandler, Page, Propagation};
