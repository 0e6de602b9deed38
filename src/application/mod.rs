//! Application layer - Use cases and orchestration

pub mod export_posts;
pub mod generate_graph;
pub mod generate_links;

pub use export_posts::{ExportOptions, ExportService, ExportSummary};
pub use generate_graph::{GraphOptions, GraphService, GraphSummary};
pub use generate_links::{FileOutcome, LinkOptions, LinkReport, LinkService, PromptSource};
