//! Utility modules for the static site generator.

pub mod date;
pub mod mime;
pub mod path;
pub mod slug;
