//! `codetrack-client` library crate.
//!
//! The form controller is a pure state machine (no I/O) so it can be
//! unit tested; the HTTP client and the debounce timer live with the
//! console driver in `main.rs`.

pub mod api;
pub mod form;
