//! Input and navigation event types.
//!
//! A page host maps whatever raw input it receives to these enums. The
//! controller never sees platform input.

use serde::{Deserialize, Serialize};

/// Index into a document's node arena.
pub type NodeId = usize;

/// An event delivered to a page's global listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed over `target`.
    PointerDown { target: NodeId },
    /// Touch started on `target`.
    TouchStart { target: NodeId },
    /// Key pressed while the document has focus.
    KeyDown(Key),
    /// The page finished loading.
    Load,
    /// Session history moved to another entry (back / forward).
    PopState,
}

impl Event {
    /// The listener kind this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::Load => EventKind::Load,
            Self::PopState => EventKind::PopState,
        }
    }
}

/// Event kinds a listener can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PointerDown,
    TouchStart,
    KeyDown,
    Load,
    PopState,
}

/// Where a global listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerTarget {
    /// The document root (input events).
    Document,
    /// The window (load and history events).
    Window,
}

/// Keyboard keys relevant to modal handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Character(char),
    /// Any other key, by legacy key code.
    Other(u32),
}

impl Key {
    /// Map a legacy DOM `keyCode` to a key.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            27 => Self::Escape,
            13 => Self::Enter,
            9 => Self::Tab,
            32..=126 => char::from_u32(code).map_or(Self::Other(code), Self::Character),
            other => Self::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_mapping() {
        assert_eq!(Event::PointerDown { target: 3 }.kind(), EventKind::PointerDown);
        assert_eq!(Event::TouchStart { target: 3 }.kind(), EventKind::TouchStart);
        assert_eq!(Event::KeyDown(Key::Escape).kind(), EventKind::KeyDown);
        assert_eq!(Event::Load.kind(), EventKind::Load);
        assert_eq!(Event::PopState.kind(), EventKind::PopState);
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_key_code(27), Key::Escape);
        assert_eq!(Key::from_key_code(13), Key::Enter);
        assert_eq!(Key::from_key_code(9), Key::Tab);
        assert_eq!(Key::from_key_code(65), Key::Character('A'));
        assert_eq!(Key::from_key_code(112), Key::Character('p'));
        assert_eq!(Key::from_key_code(255), Key::Other(255));
    }

    #[test]
    fn key_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            key: Key,
        }
        let w: Wrapper = toml::from_str("key = \"escape\"").unwrap();
        assert_eq!(w.key, Key::Escape);
    }

    #[test]
    fn event_kind_hash_distinct() {
        use std::collections::HashSet;
        let set: HashSet<EventKind> = [
            EventKind::PointerDown,
            EventKind::TouchStart,
            EventKind::KeyDown,
            EventKind::Load,
            EventKind::PopState,
            EventKind::Load,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 5);
    }
}
