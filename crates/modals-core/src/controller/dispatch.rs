//! Delegated event routing.
//!
//! Every pointer, touch, key and navigation event on the page arrives
//! here; the event's target is matched against the configured selectors
//! to decide which transition to run.

use modals_dom::ElementData;
use modals_types::error::Result;
use modals_types::input::{Event, Key, NodeId};

use super::{MODAL_ID_DATA, ModalController};
use crate::page::{EventHandler, Page, Propagation};

impl EventHandler for ModalController {
    fn handle_event(&self, page: &mut Page, event: &Event) -> Result<Propagation> {
        match event {
            Event::PointerDown { target } | Event::TouchStart { target } => {
                self.on_press(page, *target)
            },
            Event::KeyDown(key) => {
                if *key == Key::Escape {
                    self.hide_all(page)?;
                }
                Ok(Propagation::Continue)
            },
            Event::Load => {
                self.show_from_location(page)?;
                Ok(Propagation::Continue)
            },
            Event::PopState => {
                self.sync_with_history(page)?;
                Ok(Propagation::Continue)
            },
        }
    }
}

impl ModalController {
    /// Route a pointer or touch press on `target`.
    ///
    /// Open triggers win over close triggers, which win over the
    /// controller's overlay.
    /// Any match suppresses the default action, even when the trigger
    /// names no modal.
    fn on_press(&self, page: &mut Page, target: NodeId) -> Result<Propagation> {
        let cfg = self.config();
        let doc = page.document();

        if doc.matches(target, &cfg.show_selector) {
            let id = doc
                .element(target)
                .and_then(|e| e.data(MODAL_ID_DATA))
                .unwrap_or_default()
                .to_string();
            if id.is_empty() {
                log::trace!("open trigger {target} names no modal");
            } else {
                self.show(page, &id)?;
            }
        } else if doc.matches(target, &cfg.close_selector) {
            let id = doc
                .parent_element(target)
                .and_then(|parent| doc.element(parent))
                .and_then(ElementData::id)
                .unwrap_or_default()
                .to_string();
            if id.is_empty() {
                log::trace!("close trigger {target} has no identified parent");
            } else {
                self.hide(page, &id)?;
            }
        } else if self.overlay(page) == Some(target) {
            self.hide_all(page)?;
        } else {
            return Ok(Propagation::Continue);
        }

        Ok(Propagation::PreventDefault)
    }
}
