//! sitepipe - Content pipeline helpers for a Hugo site
//!
//! Exports the content listing as JSON Lines, adds internal links to
//! published posts through a chat CLI, and crawls the site into a link graph.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::SitepipeError;
