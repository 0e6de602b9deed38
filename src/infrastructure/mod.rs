//! Infrastructure layer - External I/O, processes and HTTP

pub mod chat;
pub mod config;
pub mod content;
pub mod crawler;
pub mod listing_source;
pub mod prerequisites;

pub use chat::{ChatCli, ChatClient};
pub use config::Config;
pub use content::ContentFolder;
pub use crawler::{FetchedPage, HttpFetcher, PageFetcher};
pub use listing_source::ListingSource;
