//! Output formatting utilities

use crate::application::{ExportSummary, FileOutcome, GraphSummary, LinkReport};

pub fn format_export_summary(summary: &ExportSummary) -> String {
    format!(
        "Exported {} record(s) to {}",
        summary.records,
        summary.output.display()
    )
}

pub fn format_graph_summary(summary: &GraphSummary) -> String {
    format!(
        "Crawled {} page(s): {} node(s), {} edge(s) written to {}",
        summary.pages_visited,
        summary.nodes,
        summary.edges,
        summary.output.display()
    )
}

/// Format a link run: one block per file, then the totals
pub fn format_link_report(report: &LinkReport) -> String {
    if let Some(notice) = &report.notice {
        return notice.clone();
    }

    let mut output = String::new();
    if report.dry_run {
        output.push_str("[dry run] no files were written\n");
    }

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Updated(links) => {
                output.push_str(&format!("{}: {} new link(s)\n", file.path, links.len()));
                for link in links {
                    output.push_str(&format!("  + {}\n", link));
                }
            }
            FileOutcome::NoNewLinks => {
                output.push_str(&format!("{}: changed, but no new links; left untouched\n", file.path));
            }
            FileOutcome::Unchanged => {
                output.push_str(&format!("{}: no changes\n", file.path));
            }
            FileOutcome::Failed(message) => {
                output.push_str(&format!("{}: FAILED: {}\n", file.path, message));
            }
        }
    }

    let verb = if report.dry_run { "Would update" } else { "Updated" };
    output.push_str(&format!("{} {} file(s)", verb, report.updated_count()));

    let failed = report.failed_count();
    if failed > 0 {
        output.push_str(&format!("\n{} file(s) failed", failed));
    }
    output
}
