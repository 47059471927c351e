//! Document model for modals.
//!
//! An arena-backed element tree with class-list editing, a small CSS
//! selector engine, and the playback state of embedded media.

pub mod dom;
pub mod media;
pub mod selector;

pub use dom::{Attribute, Document, ElementData, Node, NodeKind, TagName};
pub use media::MediaState;
pub use modals_types::input::NodeId;
pub use selector::{Selector, SelectorList};
