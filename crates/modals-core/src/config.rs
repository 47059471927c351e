//! Controller options and their resolution.
//!
//! [`ModalOptions`] is what a host supplies: any subset of fields, from
//! code or from a TOML file. [`ModalConfig`] is the resolved, immutable
//! record a controller holds for its lifetime.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use modals_dom::SelectorList;
use modals_types::error::{HookError, ModalError, Result};

use crate::controller::ModalController;
use crate::page::Page;

pub const DEFAULT_MODAL_SELECTOR: &str = "[data-modal]";
pub const DEFAULT_CLOSE_SELECTOR: &str = "[data-modal-close]";
pub const DEFAULT_SHOW_SELECTOR: &str = "[data-modal-id]";
pub const DEFAULT_ACTIVE_CLASS: &str = "is-active";
pub const DEFAULT_BODY_CLASS: &str = "modal-is-active";
pub const DEFAULT_OVERLAY_CLASS: &str = "overlay";

/// What a lifecycle hook returns.
pub type HookResult = std::result::Result<(), HookError>;

/// A lifecycle hook. Receives the controller and the page after the
/// transition has been applied.
pub type Hook = Box<dyn Fn(&ModalController, &Page) -> HookResult>;

/// Partial controller configuration.
///
/// Unset or empty fields take their defaults on resolution. TOML keys are
/// snake_case; the camelCase spellings are accepted as aliases and unknown
/// keys are ignored.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
    /// Selector identifying modal panels.
    #[serde(alias = "selector", alias = "modalSelector")]
    pub modal_selector: Option<String>,
    /// Selector identifying close triggers (direct children of a panel).
    #[serde(alias = "closeSelector")]
    pub close_selector: Option<String>,
    /// Selector identifying open triggers (carrying `data-modal-id`).
    #[serde(alias = "showSelector")]
    pub show_selector: Option<String>,
    /// Whether panels follow the viewport on scroll.
    #[serde(alias = "isFixed")]
    pub is_fixed: Option<bool>,
    /// Class marking a visible modal and the overlay.
    #[serde(alias = "activeClass")]
    pub active_class: Option<String>,
    /// Class applied to `<body>` while any modal is visible.
    #[serde(alias = "bodyClass")]
    pub body_class: Option<String>,
    /// Class identifying the overlay element.
    #[serde(alias = "overlayClass")]
    pub overlay_class: Option<String>,
    #[serde(skip)]
    pub on_show: Option<Hook>,
    #[serde(skip)]
    pub on_hide: Option<Hook>,
}

impl ModalOptions {
    /// Parse options from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading modal options from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    pub fn with_modal_selector(mut self, selector: impl Into<String>) -> Self {
        self.modal_selector = Some(selector.into());
        self
    }

    pub fn with_close_selector(mut self, selector: impl Into<String>) -> Self {
        self.close_selector = Some(selector.into());
        self
    }

    pub fn with_show_selector(mut self, selector: impl Into<String>) -> Self {
        self.show_selector = Some(selector.into());
        self
    }

    pub fn with_fixed(mut self, is_fixed: bool) -> Self {
        self.is_fixed = Some(is_fixed);
        self
    }

    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = Some(class.into());
        self
    }

    pub fn with_body_class(mut self, class: impl Into<String>) -> Self {
        self.body_class = Some(class.into());
        self
    }

    pub fn with_overlay_class(mut self, class: impl Into<String>) -> Self {
        self.overlay_class = Some(class.into());
        self
    }

    /// Run `hook` after a modal becomes visible.
    pub fn on_show<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ModalController, &Page) -> HookResult + 'static,
    {
        self.on_show = Some(Box::new(hook));
        self
    }

    /// Run `hook` after a modal becomes hidden.
    pub fn on_hide<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ModalController, &Page) -> HookResult + 'static,
    {
        self.on_hide = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for ModalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOptions")
            .field("modal_selector", &self.modal_selector)
            .field("close_selector", &self.close_selector)
            .field("show_selector", &self.show_selector)
            .field("is_fixed", &self.is_fixed)
            .field("active_class", &self.active_class)
            .field("body_class", &self.body_class)
            .field("overlay_class", &self.overlay_class)
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish()
    }
}

/// Fully resolved controller configuration.
pub struct ModalConfig {
    pub modal_selector: SelectorList,
    pub close_selector: SelectorList,
    pub show_selector: SelectorList,
    pub is_fixed: bool,
    pub active_class: String,
    pub body_class: String,
    pub overlay_class: String,
    pub(crate) on_show: Option<Hook>,
    pub(crate) on_hide: Option<Hook>,
}

impl ModalConfig {
    /// Resolve options against the defaults and parse the selectors.
    pub fn resolve(options: ModalOptions) -> Result<Self> {
        let selector = |value: Option<String>, default: &str| {
            SelectorList::parse(&or_default(value, default))
        };

        // Always true: a supplied `false` has never been honoured.
        if options.is_fixed == Some(false) {
            log::debug!("is_fixed = false ignored, modals resolve as fixed");
        }

        let active_class = class_name(options.active_class, DEFAULT_ACTIVE_CLASS)?;
        let overlay_class = class_name(options.overlay_class, DEFAULT_OVERLAY_CLASS)?;
        if overlay_class == active_class {
            return Err(ModalError::Config(format!(
                "overlay class `{overlay_class}` must differ from the active class"
            )));
        }

        Ok(Self {
            modal_selector: selector(options.modal_selector, DEFAULT_MODAL_SELECTOR)?,
            close_selector: selector(options.close_selector, DEFAULT_CLOSE_SELECTOR)?,
            show_selector: selector(options.show_selector, DEFAULT_SHOW_SELECTOR)?,
            is_fixed: true,
            active_class,
            body_class: class_name(options.body_class, DEFAULT_BODY_CLASS)?,
            overlay_class,
            on_show: options.on_show,
            on_hide: options.on_hide,
        })
    }

    pub fn has_on_show(&self) -> bool {
        self.on_show.is_some()
    }

    pub fn has_on_hide(&self) -> bool {
        self.on_hide.is_some()
    }
}

impl fmt::Debug for ModalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalConfig")
            .field("modal_selector", &self.modal_selector.as_str())
            .field("close_selector", &self.close_selector.as_str())
            .field("show_selector", &self.show_selector.as_str())
            .field("is_fixed", &self.is_fixed)
            .field("active_class", &self.active_class)
            .field("body_class", &self.body_class)
            .field("overlay_class", &self.overlay_class)
            .field("on_show", &self.has_on_show())
            .field("on_hide", &self.has_on_hide())
            .finish()
    }
}

/// Unset and empty values both fall back to the default.
fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn class_name(value: Option<String>, default: &str) -> Result<String> {
    let class = or_default(value, default).trim().to_string();
    if class.chars().any(char::is_whitespace) {
        return Err(ModalError::Config(format!(
            "class name `{class}` must not contain whitespace"
        )));
    }
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let cfg = ModalConfig::resolve(ModalOptions::default()).unwrap();
        assert_eq!(cfg.modal_selector.as_str(), "[data-modal]");
        assert_eq!(cfg.close_selector.as_str(), "[data-modal-close]");
        assert_eq!(cfg.show_selector.as_str(), "[data-modal-id]");
        assert!(cfg.is_fixed);
        assert_eq!(cfg.active_class, "is-active");
        assert_eq!(cfg.body_class, "modal-is-active");
        assert_eq!(cfg.overlay_class, "overlay");
        assert!(!cfg.has_on_show());
        assert!(!cfg.has_on_hide());
    }

    #[test]
    fn supplied_values_override_defaults() {
        let opts = ModalOptions::default()
            .with_modal_selector(".dialog")
            .with_active_class("open")
            .with_body_class("locked")
            .with_overlay_class("backdrop")
            .on_show(|_, _| Ok(()));
        let cfg = ModalConfig::resolve(opts).unwrap();
        assert_eq!(cfg.modal_selector.as_str(), ".dialog");
        assert_eq!(cfg.active_class, "open");
        assert_eq!(cfg.body_class, "locked");
        assert_eq!(cfg.overlay_class, "backdrop");
        assert!(cfg.has_on_show());
    }

    #[test]
    fn is_fixed_always_resolves_true() {
        for supplied in [None, Some(true), Some(false)] {
            let opts = ModalOptions {
                is_fixed: supplied,
                ..ModalOptions::default()
            };
            assert!(ModalConfig::resolve(opts).unwrap().is_fixed);
        }
    }

    #[test]
    fn empty_strings_fall_back() {
        let opts = ModalOptions::default()
            .with_active_class("")
            .with_show_selector("  ");
        let cfg = ModalConfig::resolve(opts).unwrap();
        assert_eq!(cfg.active_class, "is-active");
        assert_eq!(cfg.show_selector.as_str(), "[data-modal-id]");
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let opts = ModalOptions::default().with_close_selector("[data-close");
        assert!(matches!(
            ModalConfig::resolve(opts),
            Err(ModalError::Selector(_))
        ));
    }

    #[test]
    fn class_with_whitespace_is_rejected() {
        let opts = ModalOptions::default().with_active_class("is active");
        assert!(matches!(
            ModalConfig::resolve(opts),
            Err(ModalError::Config(_))
        ));
    }

    #[test]
    fn overlay_class_must_differ_from_active_class() {
        let opts = ModalOptions::default().with_overlay_class("is-active");
        assert!(matches!(
            ModalConfig::resolve(opts),
            Err(ModalError::Config(msg)) if msg.contains("overlay class")
        ));

        let opts = ModalOptions::default()
            .with_active_class("shown")
            .with_overlay_class("shown");
        assert!(ModalConfig::resolve(opts).is_err());
    }

    #[test]
    fn toml_with_aliases_and_unknown_keys() {
        let opts = ModalOptions::from_toml_str(
            r#"
            selector = ".panel"
            activeClass = "shown"
            is_fixed = false
            animation = "fade"
            "#,
        )
        .unwrap();
        assert_eq!(opts.modal_selector.as_deref(), Some(".panel"));
        assert_eq!(opts.active_class.as_deref(), Some("shown"));
        assert_eq!(opts.is_fixed, Some(false));
        assert_eq!(opts.close_selector, None);
    }

    #[test]
    fn toml_type_error_is_reported() {
        let err = ModalOptions::from_toml_str("is_fixed = \"yes\"").unwrap_err();
        assert!(matches!(err, ModalError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modals.toml");
        std::fs::write(&path, "body_class = \"no-scroll\"\n").unwrap();
        let opts = ModalOptions::load(&path).unwrap();
        assert_eq!(opts.body_class.as_deref(), Some("no-scroll"));

        let missing = ModalOptions::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ModalError::Io(_)));
    }

    #[test]
    fn debug_shows_selector_text() {
        let cfg = ModalConfig::resolve(ModalOptions::default().on_hide(|_, _| Ok(()))).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(dbg.contains("[data-modal]"));
        assert!(dbg.contains("on_hide: true"));
    }
}
