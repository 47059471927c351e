//! Modal controller demo.
//!
//! Builds a landing page, attaches a controller and replays a short user
//! session: deep-linked load, trigger clicks, Escape, overlay click and
//! back/forward navigation. Each step logs the page state.
//!
//! Usage: `modals-app [options.toml] [url]`. The URL may also come from
//! `MODALS_URL`; a fragment naming a modal opens it on load.

mod demo;

use anyhow::{Context, Result};

use modals_core::input::Key;
use modals_core::{ModalController, ModalOptions, Page};

const DEFAULT_URL: &str = "https://example.com/landing#signup";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let options = match args.next() {
        Some(path) => ModalOptions::load(&path)
            .with_context(|| format!("loading modal options from {path}"))?,
        None => ModalOptions::default(),
    };
    let url = args
        .next()
        .or_else(|| std::env::var("MODALS_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    let options = options
        .on_show(|ctl, page| {
            log::info!("  on_show: {} open", ctl.active_modals(page).len());
            Ok(())
        })
        .on_hide(|ctl, page| {
            log::info!("  on_hide: {} open", ctl.active_modals(page).len());
            Ok(())
        });

    let demo = demo::build()?;
    let mut page = Page::new(demo.document, &url).with_context(|| format!("bad url {url}"))?;
    let ctl = ModalController::new(options, &mut page)?;
    log::info!("Starting modal demo at {}", page.location());

    page.document_mut().play(demo.video);

    page.load(&ctl)?;
    report(&ctl, &page, "load");

    let outcome = page.click(&ctl, demo.close_signup)?;
    report(&ctl, &page, "click close (signup)");
    log::info!("  default prevented: {}", outcome.default_prevented);

    page.click(&ctl, demo.open_video)?;
    page.document_mut().play(demo.video);
    report(&ctl, &page, "click open (tour)");

    page.tap(&ctl, demo.open_signup)?;
    report(&ctl, &page, "tap open (signup)");

    if let Some(overlay) = ctl.overlay(&page) {
        page.click(&ctl, overlay)?;
        report(&ctl, &page, "click overlay");
    }
    log::info!("  video playing: {}", page.document().is_playing(demo.video));

    page.back(&ctl)?;
    report(&ctl, &page, "back");

    page.back(&ctl)?;
    report(&ctl, &page, "back");

    page.forward(&ctl)?;
    report(&ctl, &page, "forward");

    page.press_key(&ctl, Key::Escape)?;
    report(&ctl, &page, "escape");

    page.tap(&ctl, demo.close_video)?;
    report(&ctl, &page, "tap close (tour)");

    let outcome = page.click(&ctl, demo.footer_link)?;
    report(&ctl, &page, "click footer link");
    log::info!("  default prevented: {}", outcome.default_prevented);

    log::info!("Session history ({} entries):", page.history().len());
    for entry in page.history().entries() {
        log::info!("  {} \"{}\"", entry.url, entry.title);
    }
    Ok(())
}

fn report(ctl: &ModalController, page: &Page, step: &str) {
    let doc = page.document();
    let open: Vec<&str> = ctl
        .active_modals(page)
        .into_iter()
        .filter_map(|node| doc.element(node).and_then(|e| e.id()))
        .collect();
    log::info!(
        "{step}: open={open:?} overlay={} url={}",
        ctl.overlay(page).is_some(),
        page.location(),
    );
}
