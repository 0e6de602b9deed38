//! Domain layer - Listing, export, link and graph logic

pub mod content_type;
pub mod export;
pub mod graph;
pub mod links;
pub mod listing;
pub mod page;
pub mod prompt;
pub mod robots;

pub use content_type::ContentType;
pub use export::ExportRecord;
pub use graph::LinkGraph;
pub use links::Link;
pub use listing::{Listing, ListingRow};
pub use prompt::LinkCandidate;
pub use robots::RobotsRules;
