//! Error types for modals.

use std::io;

/// Error type returned by `on_show` / `on_hide` hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the modal controller and its page host.
#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    #[error("no element with id `{0}`")]
    NotFound(String),

    #[error("element `{0}` is not a modal")]
    NotAModal(String),

    #[error("document has no <body> element")]
    MissingBody,

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("{hook} callback failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ModalError>;
