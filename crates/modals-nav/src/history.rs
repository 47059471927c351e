//! Session history: a back stack, the current entry, and a forward stack.
//!
//! `push_state` resolves its URL against the current location, so a bare
//! fragment (`#signup`) only swaps the fragment and a path (`/page`)
//! drops both query and fragment.

use modals_types::error::Result;
use url::Url;

/// A single entry in the session history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub url: Url,
    pub title: String,
}

/// Session history for one page.
#[derive(Debug, Clone)]
pub struct History {
    back_stack: Vec<HistoryEntry>,
    forward_stack: Vec<HistoryEntry>,
    current: HistoryEntry,
}

impl History {
    /// Start a history whose only entry is `url`.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            current: HistoryEntry {
                url: Url::parse(url)?,
                title: String::new(),
            },
        })
    }

    /// Push a new entry. The current entry moves to the back stack and
    /// the forward stack is cleared.
    pub fn push_state(&mut self, title: &str, url: &str) -> Result<()> {
        let resolved = self.current.url.join(url)?;
        log::debug!("history push: {resolved}");
        let previous = std::mem::replace(
            &mut self.current,
            HistoryEntry {
                url: resolved,
                title: title.to_string(),
            },
        );
        self.back_stack.push(previous);
        self.forward_stack.clear();
        Ok(())
    }

    /// Go back one entry. Returns the new current entry, or `None` at the
    /// start of history.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        let prev = self.back_stack.pop()?;
        let current = std::mem::replace(&mut self.current, prev);
        self.forward_stack.push(current);
        Some(&self.current)
    }

    /// Go forward one entry. Returns the new current entry, or `None` at
    /// the end of history.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        let next = self.forward_stack.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.back_stack.push(current);
        Some(&self.current)
    }

    /// The current entry.
    pub fn current(&self) -> &HistoryEntry {
        &self.current
    }

    /// The current URL.
    pub fn location(&self) -> &Url {
        &self.current.url
    }

    /// The current fragment without the leading `#`; empty if none.
    pub fn hash(&self) -> &str {
        self.current.url.fragment().unwrap_or_default()
    }

    /// Check if forward navigation is possible.
    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Number of entries in the session (back + current + forward).
    pub fn len(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }

    /// Always `false`: a history has at least its current entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<&HistoryEntry> {
        self.back_stack
            .iter()
            .chain(std::iter::once(&self.current))
            .chain(self.forward_stack.iter().rev())
            .collect()
    }
}
