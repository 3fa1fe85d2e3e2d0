//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the editor.
//! Types here should not depend on rendering or the host shell.

pub mod annotation;
pub mod geometry;
pub mod tool;

pub use annotation::*;
pub use geometry::*;
pub use tool::*;
