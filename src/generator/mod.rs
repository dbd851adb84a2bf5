//! Output generators.

pub mod rss;
