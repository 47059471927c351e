//! The modal controller.
//!
//! State lives in the document, not in the controller: a modal is open
//! iff it carries the active class, and the overlay and body class are
//! recomputed from the live tree after every hide. The controller itself
//! only holds its resolved configuration.

mod dispatch;


use modals_dom::{Document, ElementData};
use modals_types::error::{ModalError, Result};
use modals_types::input::{EventKind, ListenerTarget, NodeId};

use crate::config::{Hook, ModalConfig, ModalOptions};
use crate::page::Page;

/// `data-*` key an open trigger uses to name its modal.
pub const MODAL_ID_DATA: &str = "modal-id";

/// Attribute marking the overlay the controller created. Host elements
/// that merely share the overlay class are left alone.
pub const OVERLAY_MARKER: &str = "data-modal-overlay";

/// The global listeners a controller registers on construction.
const LISTENERS: [(ListenerTarget, EventKind); 5] = [
    (ListenerTarget::Document, EventKind::TouchStart),
    (ListenerTarget::Document, EventKind::PointerDown),
    (ListenerTarget::Document, EventKind::KeyDown),
    (ListenerTarget::Window, EventKind::Load),
    (ListenerTarget::Window, EventKind::PopState),
];

/// Outcome of a hide request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Hidden,
    /// The modal was not active; nothing happened.
    AlreadyHidden,
}

/// Whether a transition records itself in session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryWrite {
    Push,
    /// The transition replays an entry the user navigated to.
    Skip,
}

/// Shows and hides the modal panels of one page.
pub struct ModalController {
    config: ModalConfig,
}

impl ModalController {
    /// Resolve `options` and register the controller's global listeners on
    /// `page`.
    pub fn new(options: ModalOptions, page: &mut Page) -> Result<Self> {
        let config = ModalConfig::resolve(options)?;
        for (target, kind) in LISTENERS {
            page.add_event_listener(target, kind);
        }
        log::debug!("modal controller ready: {config:?}");
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    // -- transitions --------------------------------------------------

    /// Show the modal with `id`.
    ///
    /// Showing an already visible modal still pushes a history entry and
    /// runs `on_show` again.
    pub fn show(&self, page: &mut Page, id: &str) -> Result<()> {
        let modal = self.locate(page.document(), id)?;
        self.show_node(page, modal, id, HistoryWrite::Push)
    }

    /// Hide the modal with `id`.
    ///
    /// An unknown id is an error and changes nothing. Hiding a modal that
    /// is not active is a no-op: no history entry, no callback.
    pub fn hide(&self, page: &mut Page, id: &str) -> Result<Transition> {
        let modal = self.locate(page.document(), id)?;
        self.hide_node(page, modal, HistoryWrite::Push)
    }

    /// Hide every active modal in document order. Returns how many were
    /// hidden.
    pub fn hide_all(&self, page: &mut Page) -> Result<usize> {
        self.hide_all_with(page, HistoryWrite::Push)
    }

    /// Show the modal named by the URL fragment, if there is one.
    ///
    /// Runs on page load and after history traversal. The history entry
    /// already exists, so nothing is pushed.
    pub fn show_from_location(&self, page: &mut Page) -> Result<Option<NodeId>> {
        let hash = page.hash().to_string();
        if hash.is_empty() {
            return Ok(None);
        }
        match self.locate(page.document(), &hash) {
            Ok(modal) => {
                self.show_node(page, modal, &hash, HistoryWrite::Skip)?;
                Ok(Some(modal))
            },
            Err(ModalError::NotFound(_) | ModalError::NotAModal(_)) => {
                log::debug!("fragment `#{hash}` does not name a modal");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Bring the visible modals in line with the current history entry.
    pub fn sync_with_history(&self, page: &mut Page) -> Result<Option<NodeId>> {
        self.hide_all_with(page, HistoryWrite::Skip)?;
        self.show_from_location(page)
    }

    // -- queries ------------------------------------------------------

    /// Whether the modal with `id` is currently visible.
    pub fn is_active(&self, page: &Page, id: &str) -> bool {
        self.locate(page.document(), id)
            .is_ok_and(|modal| page.document().has_class(modal, &self.config.active_class))
    }

    /// Attached modal elements carrying the active class, in document
    /// order.
    pub fn active_modals(&self, page: &Page) -> Vec<NodeId> {
        let doc = page.document();
        doc.query_selector_all(&self.config.modal_selector)
            .into_iter()
            .filter(|&modal| doc.has_class(modal, &self.config.active_class))
            .collect()
    }

    /// The attached overlay element this controller created, if any.
    pub fn overlay(&self, page: &Page) -> Option<NodeId> {
        find_overlay(page.document(), &self.config.overlay_class)
    }

    // -- internals ----------------------------------------------------

    /// Find a modal by id. Fails without side effects if the element is
    /// missing or is not a modal.
    fn locate(&self, doc: &Document, id: &str) -> Result<NodeId> {
        let node = doc
            .get_element_by_id(id)
            .ok_or_else(|| ModalError::NotFound(id.to_string()))?;
        if !doc.matches(node, &self.config.modal_selector) {
            return Err(ModalError::NotAModal(id.to_string()));
        }
        Ok(node)
    }

    fn show_node(
        &self,
        page: &mut Page,
        modal: NodeId,
        id: &str,
        write: HistoryWrite,
    ) -> Result<()> {
        let cfg = &self.config;
        let body = page.document().body().ok_or(ModalError::MissingBody)?;

        let doc = page.document_mut();
        if find_overlay(doc, &cfg.overlay_class).is_none() {
            let overlay = doc.create_element("div");
            doc.set_attribute(overlay, OVERLAY_MARKER, "");
            doc.add_class(overlay, &cfg.overlay_class);
            doc.add_class(overlay, &cfg.active_class);
            doc.append_child(body, overlay);
            log::trace!("overlay {overlay} created");
        }
        doc.add_class(modal, &cfg.active_class);
        doc.add_class(body, &cfg.body_class);

        if write == HistoryWrite::Push {
            page.history_mut()
                .push_state(&format!("modal {id}"), &format!("#{id}"))?;
        }
        log::debug!("modal `{id}` shown");

        self.run_hook(cfg.on_show.as_ref(), "on_show", page)
    }

    fn hide_node(
        &self,
        page: &mut Page,
        modal: NodeId,
        write: HistoryWrite,
    ) -> Result<Transition> {
        let cfg = &self.config;
        if !page.document().has_class(modal, &cfg.active_class) {
            log::trace!("modal {modal} already hidden");
            return Ok(Transition::AlreadyHidden);
        }

        let doc = page.document_mut();
        doc.stop_media_in(modal);
        doc.remove_class(modal, &cfg.active_class);

        if self.active_modals(page).is_empty() {
            let doc = page.document_mut();
            if let Some(overlay) = find_overlay(doc, &cfg.overlay_class) {
                doc.detach(overlay);
                log::trace!("overlay {overlay} removed");
            }
            if let Some(body) = doc.body() {
                doc.remove_class(body, &cfg.body_class);
            }
            if write == HistoryWrite::Push {
                let title = page.title();
                let mut url = page.location().clone();
                url.set_fragment(None);
                page.history_mut().push_state(&title, url.as_str())?;
            }
        }
        log::debug!(
            "modal `{}` hidden",
            page.document()
                .element(modal)
                .and_then(ElementData::id)
                .unwrap_or_default()
        );

        self.run_hook(cfg.on_hide.as_ref(), "on_hide", page)?;
        Ok(Transition::Hidden)
    }

    fn hide_all_with(&self, page: &mut Page, write: HistoryWrite) -> Result<usize> {
        let mut hidden = 0;
        for modal in self.active_modals(page) {
            if self.hide_node(page, modal, write)? == Transition::Hidden {
                hidden += 1;
            }
        }
        Ok(hidden)
    }

    /// Run a lifecycle hook. Its error surfaces to the caller; the
    /// transition it follows stays applied.
    fn run_hook(&self, hook: Option<&Hook>, name: &'static str, page: &Page) -> Result<()> {
        let Some(hook) = hook else {
            return Ok(());
        };
        hook(self, page).map_err(|source| {
            log::warn!("{name} callback failed: {source}");
            ModalError::Hook { hook: name, source }
        })
    }
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("config", &self.config)
            .finish()
    }
}

fn find_overlay(doc: &Document, overlay_class: &str) -> Option<NodeId> {
    doc.descendants(doc.root).into_iter().find(|&node| {
        doc.element(node)
            .is_some_and(|e| e.get_attribute(OVERLAY_MARKER).is_some())
            && doc.has_class(node, overlay_class)
    })
}
