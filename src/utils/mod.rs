//! Utility modules shared by the content source and the feed generator.

pub mod date;
pub mod slug;
