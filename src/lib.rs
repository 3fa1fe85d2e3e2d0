//! Screenshot annotation editor core.
//!
//! A [`Session`] owns one image, its annotations and undo history, and a
//! render surface. Hosts feed it [`Msg`]s and carry out the returned
//! [`Effect`]s (crop extraction, decoding, export, persistence).

pub mod annotations;
pub mod capture;
pub mod config;
pub mod domain;
pub mod render;
pub mod session;

pub use session::Session;
pub use session::messages::{Effect, Msg, Notice, NoticeKind};
