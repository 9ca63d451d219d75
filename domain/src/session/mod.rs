//! Chat session domain.
//!
//! - [`entities::Message`] — a single message in the conversation log
//! - [`entities::SessionState`] — the session's coarse lifecycle state

pub mod entities;
