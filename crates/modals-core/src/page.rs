//! The page host: document, session history and global listeners.
//!
//! A [`Page`] stands in for the browser window. It owns the document tree
//! and the session history, remembers which global listeners were
//! registered, and delivers events to an [`EventHandler`] only for kinds
//! somebody listens to.

use modals_dom::Document;
use modals_nav::{History, Url};
use modals_types::error::Result;
use modals_types::input::{Event, EventKind, Key, ListenerTarget, NodeId};

/// What a handler asks the host to do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Let the default action (following a link, etc.) happen.
    Continue,
    /// Suppress the default action.
    PreventDefault,
}

/// Result of delivering one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// A listener for the event's kind was registered.
    pub delivered: bool,
    pub default_prevented: bool,
}

/// Something that reacts to page-level events.
pub trait EventHandler {
    fn handle_event(&self, page: &mut Page, event: &Event) -> Result<Propagation>;
}

/// A loaded page.
#[derive(Debug, Clone)]
pub struct Page {
    document: Document,
    history: History,
    listeners: Vec<(ListenerTarget, EventKind)>,
}

impl Page {
    /// Create a page showing `document` at `url`.
    pub fn new(document: Document, url: &str) -> Result<Self> {
        Ok(Self {
            document,
            history: History::new(url)?,
            listeners: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// The current URL.
    pub fn location(&self) -> &Url {
        self.history.location()
    }

    /// The current fragment without `#`.
    pub fn hash(&self) -> &str {
        self.history.hash()
    }

    /// The document title, empty if the document has none.
    pub fn title(&self) -> String {
        self.document.title().unwrap_or_default()
    }

    /// Register a global listener. Returns `false` if an identical one
    /// is already registered.
    pub fn add_event_listener(&mut self, target: ListenerTarget, kind: EventKind) -> bool {
        if self.listeners.contains(&(target, kind)) {
            return false;
        }
        self.listeners.push((target, kind));
        true
    }

    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|&(_, k)| k == kind)
    }

    pub fn listeners(&self) -> &[(ListenerTarget, EventKind)] {
        &self.listeners
    }

    /// Deliver `event` to `handler` if its kind has a listener.
    pub fn dispatch(
        &mut self,
        handler: &dyn EventHandler,
        event: &Event,
    ) -> Result<DispatchOutcome> {
        if !self.has_listener(event.kind()) {
            log::trace!("no listener for {:?}", event.kind());
            return Ok(DispatchOutcome::default());
        }
        let propagation = handler.handle_event(self, event)?;
        Ok(DispatchOutcome {
            delivered: true,
            default_prevented: propagation == Propagation::PreventDefault,
        })
    }

    /// Mouse press on `target`.
    pub fn click(&mut self, handler: &dyn EventHandler, target: NodeId) -> Result<DispatchOutcome> {
        self.dispatch(handler, &Event::PointerDown { target })
    }

    /// Touch start on `target`.
    pub fn tap(&mut self, handler: &dyn EventHandler, target: NodeId) -> Result<DispatchOutcome> {
        self.dispatch(handler, &Event::TouchStart { target })
    }

    pub fn press_key(&mut self, handler: &dyn EventHandler, key: Key) -> Result<DispatchOutcome> {
        self.dispatch(handler, &Event::KeyDown(key))
    }

    /// Fire the load event.
    pub fn load(&mut self, handler: &dyn EventHandler) -> Result<DispatchOutcome> {
        self.dispatch(handler, &Event::Load)
    }

    /// History back. Fires `PopState` only if there was an entry to go to.
    pub fn back(&mut self, handler: &dyn EventHandler) -> Result<DispatchOutcome> {
        if self.history.back().is_none() {
            return Ok(DispatchOutcome::default());
        }
        self.dispatch(handler, &Event::PopState)
    }

    /// History forward. Fires `PopState` only if there was an entry to go to.
    pub fn forward(&mut self, handler: &dyn EventHandler) -> Result<DispatchOutcome> {
        if self.history.forward().is_none() {
            return Ok(DispatchOutcome::default());
        }
        self.dispatch(handler, &Event::PopState)
    }
}
