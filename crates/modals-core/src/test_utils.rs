//! Shared fixtures for controller tests.

use modals_dom::Document;
use modals_types::input::NodeId;

use crate::page::Page;

pub const PAGE_URL: &str = "https://example.com/pricing";

/// Node ids of the interesting elements in [`demo_page`].
#[derive(Debug, Clone, Copy)]
pub struct DemoNodes {
    pub body: NodeId,
    pub open_a: NodeId,
    pub open_b: NodeId,
    pub open_unnamed: NodeId,
    pub modal_a: NodeId,
    pub close_a: NodeId,
    pub frame_a: NodeId,
    pub modal_b: NodeId,
    pub close_b: NodeId,
    pub video_b: NodeId,
    pub orphan_close: NodeId,
    pub stray_close: NodeId,
    pub plain: NodeId,
}

/// A pricing page with two modals (`a` holds an iframe, `b` a video),
/// their triggers, a trigger without a modal id, a close trigger inside
/// the non-modal `#plans` section, another inside an id-less card, and a
/// plain paragraph.
pub fn demo_page(url: &str) -> (Page, DemoNodes) {
    let mut doc = Document::with_title("Pricing");
    let body = doc.body().expect("skeleton has a body");

    let open_a = doc.append_element(body, "a", &[("href", "#a"), ("data-modal-id", "a")]);
    let open_b = doc.append_element(body, "button", &[("data-modal-id", "b")]);
    let open_unnamed = doc.append_element(body, "a", &[("data-modal-id", "")]);
    let plain = doc.append_element(body, "p", &[("id", "plain")]);
    let plans = doc.append_element(body, "section", &[("id", "plans")]);
    let orphan_close = doc.append_element(plans, "a", &[("data-modal-close", "")]);
    let card = doc.append_element(body, "div", &[("class", "card")]);
    let stray_close = doc.append_element(card, "a", &[("data-modal-close", "")]);

    let modal_a = doc.append_element(body, "div", &[("id", "a"), ("data-modal", "")]);
    let close_a = doc.append_element(modal_a, "a", &[("data-modal-close", "")]);
    let frame_a = doc.append_element(
        modal_a,
        "iframe",
        &[("src", "https://player.example/embed/42")],
    );

    let modal_b = doc.append_element(body, "div", &[("id", "b"), ("data-modal", "")]);
    let close_b = doc.append_element(modal_b, "button", &[("data-modal-close", "")]);
    let video_b = doc.append_element(modal_b, "video", &[]);

    let page = Page::new(doc, url).expect("valid test url");
    (
        page,
        DemoNodes {
            body,
            open_a,
            open_b,
            open_unnamed,
            modal_a,
            close_a,
            frame_a,
            modal_b,
            close_b,
            video_b,
            orphan_close,
            stray_close,
            plain,
        },
    )
}

/// Number of attached elements carrying `class`.
pub fn count_with_class(page: &Page, class: &str) -> usize {
    let doc = page.document();
    doc.descendants(doc.root)
        .into_iter()
        .filter(|&id| doc.has_class(id, class))
        .count()
}
