//! The demo page the session runs against.

use modals_core::dom::Document;
use modals_core::input::NodeId;

/// Handles to the elements the session clicks on.
pub struct DemoPage {
    pub document: Document,
    pub open_signup: NodeId,
    pub open_video: NodeId,
    pub close_signup: NodeId,
    pub close_video: NodeId,
    pub video: NodeId,
    pub footer_link: NodeId,
}

/// A landing page with a sign-up modal and a video modal.
pub fn build() -> anyhow::Result<DemoPage> {
    let mut doc = Document::with_title("Landing");
    let body = doc
        .body()
        .ok_or_else(|| anyhow::anyhow!("page skeleton has no body"))?;

    let header = doc.append_element(body, "header", &[]);
    let open_signup = doc.append_element(
        header,
        "a",
        &[("href", "#signup"), ("data-modal-id", "signup")],
    );
    doc.append_text(open_signup, "Sign up");
    let open_video = doc.append_element(header, "button", &[("data-modal-id", "tour")]);
    doc.append_text(open_video, "Watch the tour");

    let signup = doc.append_element(body, "div", &[("id", "signup"), ("data-modal", "")]);
    let close_signup =
        doc.append_element(signup, "a", &[("href", "#"), ("data-modal-close", "")]);
    doc.append_text(close_signup, "Close");
    doc.append_element(signup, "iframe", &[("src", "https://forms.example/signup")]);

    let tour = doc.append_element(body, "div", &[("id", "tour"), ("data-modal", "")]);
    let close_video = doc.append_element(tour, "button", &[("data-modal-close", "")]);
    doc.append_text(close_video, "Close");
    let video = doc.append_element(tour, "video", &[("src", "/media/tour.mp4")]);

    let footer = doc.append_element(body, "footer", &[]);
    let footer_link = doc.append_element(footer, "a", &[("href", "/about")]);
    doc.append_text(footer_link, "About");

    Ok(DemoPage {
        document: doc,
        open_signup,
        open_video,
        close_signup,
        close_video,
        video,
        footer_link,
    })
}
