//! Foundation types for modals.
//!
//! Platform-agnostic types shared by every modals crate: the input and
//! navigation events a page delivers to its listeners, and the error type.

pub mod error;
pub mod input;
