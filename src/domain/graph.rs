//! Directed link graph and its CSV form

use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::io::Write;

pub const CSV_HEADER: [&str; 8] = [
    "Type", "Id", "Label", "URL", "Depth", "Source", "Target", "EdgeType",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub url: String,
    /// Page title once visited, the URL before that
    pub label: String,
    pub depth: u32,
}

/// Nodes keep discovery order; edges are unique per (source, target)
#[derive(Debug, Default)]
pub struct LinkGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
    outgoing: Vec<Vec<usize>>,
    edge_set: HashSet<(usize, usize)>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the node for `url`, adding an unvisited node if needed
    pub fn node_id(&mut self, url: &str) -> usize {
        if let Some(&id) = self.index.get(url) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(GraphNode {
            url: url.to_string(),
            label: url.to_string(),
            depth: 0,
        });
        self.outgoing.push(Vec::new());
        self.index.insert(url.to_string(), id);
        id
    }

    /// Record a fetched page's title and depth
    pub fn mark_visited(&mut self, id: usize, title: Option<String>, depth: u32) {
        if let Some(node) = self.nodes.get_mut(id) {
            if let Some(title) = title {
                node.label = title;
            }
            node.depth = depth;
        }
    }

    pub fn add_edge(&mut self, source: usize, target: usize) {
        if self.edge_set.insert((source, target)) {
            self.outgoing[source].push(target);
        }
    }

    pub fn node(&self, id: usize) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    /// Write every node followed by its outgoing edges
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(CSV_HEADER)?;

        for (id, node) in self.nodes.iter().enumerate() {
            let depth = node.depth.to_string();
            csv.write_record([
                "Node",
                node.label.as_str(),
                node.label.as_str(),
                node.url.as_str(),
                depth.as_str(),
                "",
                "",
                "",
            ])?;

            for &target in &self.outgoing[id] {
                let target = &self.nodes[target];
                csv.write_record([
                    "Edge",
                    target.label.as_str(),
                    target.label.as_str(),
                    "",
                    "",
                    node.url.as_str(),
                    target.url.as_str(),
                    "Directed",
                ])?;
            }
        }

        csv.flush()?;
        Ok(())
    }
}
