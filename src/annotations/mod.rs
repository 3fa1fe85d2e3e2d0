//! Annotation collection, hit testing, and message handlers
//!
//! This module provides:
//! - The annotation store with snapshot undo history
//! - Hit testing for the select tool
//! - Handlers for pointer, text and edit messages

pub mod handlers;
pub mod hit_testing;
pub mod store;
