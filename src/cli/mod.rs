//! CLI layer - Command-line interface

pub mod commands;
pub mod logging;
pub mod output;

pub use commands::{Cli, Commands, LogFormat};
pub use logging::init_tracing;
pub use output::{format_export_summary, format_graph_summary, format_link_report};
