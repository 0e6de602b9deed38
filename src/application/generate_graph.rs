//! Site link-graph use case
//!
//! Breadth-first crawl from a start URL, written as a node/edge CSV.

use crate::domain::page::{extract_links, extract_title, normalize_link};
use crate::domain::{LinkGraph, RobotsRules};
use crate::error::Result;
use crate::infrastructure::content::write_atomic;
use crate::infrastructure::PageFetcher;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Options for a crawl
#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub start_url: Url,
    pub output: PathBuf,

    /// Stop after this many fetched pages
    pub max_pages: Option<usize>,

    /// Links found on pages at this depth are not followed
    pub max_depth: u32,

    pub respect_robots: bool,

    /// Pause between page requests
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    pub pages_visited: usize,
    pub nodes: usize,
    pub edges: usize,
    pub output: PathBuf,
}

/// Service for crawling a site into a link graph
pub struct GraphService<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> GraphService<F> {
    pub fn new(fetcher: F) -> Self {
        GraphService { fetcher }
    }

    /// Crawl and write the graph CSV
    ///
    /// Fetch failures on individual pages are logged and skipped.
    pub fn execute(&self, options: GraphOptions) -> Result<GraphSummary> {
        let output = options.output.with_extension("csv");
        let (graph, pages_visited) = self.crawl(&options);

        let mut buffer = Vec::new();
        graph.write_csv(&mut buffer)?;
        write_atomic(&output, &String::from_utf8_lossy(&buffer))?;

        info!(
            pages = pages_visited,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            output = %output.display(),
            "graph written"
        );

        Ok(GraphSummary {
            pages_visited,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            output,
        })
    }

    /// Breadth-first crawl; returns the graph and the number of fetched pages
    pub fn crawl(&self, options: &GraphOptions) -> (LinkGraph, usize) {
        let site = &options.start_url;
        let robots = if options.respect_robots {
            self.load_robots(site)
        } else {
            RobotsRules::allow_all()
        };

        let mut graph = LinkGraph::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queued: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(Url, u32)> = VecDeque::new();

        // Same form as discovered links, so the start page is not fetched twice
        let start = normalize_link(site.as_str(), site, site).unwrap_or_else(|| site.clone());
        queued.insert(start.as_str().to_string());
        queue.push_back((start, 0));

        while let Some((url, depth)) = queue.pop_front() {
            if options.max_pages.is_some_and(|max| visited.len() >= max) {
                debug!(limit = ?options.max_pages, "page limit reached");
                break;
            }
            if depth > options.max_depth {
                continue;
            }
            if !robots.is_allowed(url.path()) {
                debug!(url = %url, "disallowed by robots.txt");
                continue;
            }

            if !visited.is_empty() && !options.delay.is_zero() {
                thread::sleep(options.delay);
            }
            visited.insert(url.as_str().to_string());

            let page = match self.fetcher.fetch(&url) {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch failed, skipping");
                    continue;
                }
            };
            if !page.is_html() {
                debug!(url = %url, content_type = %page.content_type, "not HTML, skipping");
                continue;
            }

            info!(url = %url, depth, "crawled");
            let id = graph.node_id(url.as_str());
            graph.mark_visited(id, extract_title(&page.body), depth);

            for link in extract_links(&page.body, &url, site) {
                let target = graph.node_id(link.as_str());
                graph.add_edge(id, target);

                if depth < options.max_depth && queued.insert(link.as_str().to_string()) {
                    queue.push_back((link, depth + 1));
                }
            }
        }

        (graph, visited.len())
    }

    fn load_robots(&self, site: &Url) -> RobotsRules {
        let Ok(robots_url) = site.join("/robots.txt") else {
            return RobotsRules::allow_all();
        };
        match self.fetcher.fetch(&robots_url) {
            Ok(page) => {
                debug!(url = %robots_url, "robots.txt loaded");
                RobotsRules::parse(&page.body)
            }
            Err(e) => {
                debug!(url = %robots_url, error = %e, "robots.txt unavailable, allowing all");
                RobotsRules::allow_all()
            }
        }
    }
}
