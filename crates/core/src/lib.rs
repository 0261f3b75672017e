//! Domain types shared across the codetrack workspace.
//!
//! Contains the record status enum, field normalization, and the
//! domain error taxonomy. No I/O happens here; persistence lives in
//! `codetrack-db` and HTTP concerns in `codetrack-api`.

pub mod error;
pub mod record;
pub mod types;
