//! CLI command definitions

use crate::application::{ExportOptions, GraphOptions, LinkOptions, PromptSource};
use crate::error::{Result, SitepipeError};
use crate::infrastructure::config::{
    ExportConfig, GraphConfig, LinksConfig, DEFAULT_CHAT_ARGS, DEFAULT_CHAT_PROGRAM,
    DEFAULT_CONTENT_FOLDER, DEFAULT_CRAWL_DELAY, DEFAULT_EXPORT_OUTPUT, DEFAULT_GRAPH_OUTPUT,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES, DEFAULT_PROMPT_FILE,
};
use crate::infrastructure::ListingSource;
use clap::builder::{BoolishValueParser, FalseyValueParser};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "sitepipe")]
#[command(about = "Content pipeline helpers for a Hugo site", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Enable debug logging
    #[arg(
        long,
        global = true,
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,

    /// Log format: text (default) or json
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Config file (default: ./sitepipe.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the content listing as JSON Lines
    Export(ExportArgs),

    /// Add internal links to published markdown files via the chat CLI
    Links(LinksArgs),

    /// Crawl a site and write its link graph as CSV
    Graph(GraphArgs),
}

/// Where to read the content listing from
#[derive(Args, Debug, Clone, Default)]
pub struct ListingArgs {
    /// Listing CSV written by `hugo list all`
    #[arg(long, env = "HUGO_LIST_FILE", value_name = "FILE")]
    pub listing: Option<PathBuf>,

    /// Hugo site directory; `hugo list all` is run there
    #[arg(long, env = "HUGO_SITE_DIR", value_name = "DIR")]
    pub site_dir: Option<PathBuf>,
}

impl ListingArgs {
    /// A listing file wins over a site directory at each precedence level
    fn resolve(&self, listing: Option<&PathBuf>, site_dir: Option<&PathBuf>) -> Result<ListingSource> {
        if let Some(path) = &self.listing {
            return Ok(ListingSource::File(path.clone()));
        }
        if let Some(dir) = &self.site_dir {
            return Ok(ListingSource::HugoSite(dir.clone()));
        }
        if let Some(path) = listing {
            return Ok(ListingSource::File(path.clone()));
        }
        if let Some(dir) = site_dir {
            return Ok(ListingSource::HugoSite(dir.clone()));
        }
        Err(SitepipeError::InvalidInput(
            "No listing given: pass --listing <FILE> or --site-dir <DIR> \
            (or set HUGO_LIST_FILE / HUGO_SITE_DIR)"
                .to_string(),
        ))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[command(flatten)]
    pub listing: ListingArgs,

    /// JSON Lines output file [default: posts_export.jsonl]
    #[arg(short, long, env = "OUTPUT_FILE", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn into_options(self, config: &ExportConfig) -> Result<ExportOptions> {
        let source = self
            .listing
            .resolve(config.listing.as_ref(), config.site_dir.as_ref())?;
        let output = self
            .output
            .or_else(|| config.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_OUTPUT));
        Ok(ExportOptions { source, output })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct LinksArgs {
    #[command(flatten)]
    pub listing: ListingArgs,

    /// Folder holding the markdown files [default: content/blog]
    #[arg(long, env = "CONTENT_FOLDER", value_name = "DIR")]
    pub content_folder: Option<PathBuf>,

    /// Prompt template file [default: .github/prompts/generate-links.md]
    #[arg(long, env = "PROMPT_FILE", value_name = "FILE")]
    pub prompt_file: Option<PathBuf>,

    /// Inline prompt, used instead of the prompt file
    #[arg(long, env = "CUSTOM_PROMPT", value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Process only this file
    #[arg(long, env = "TARGET_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(
        long,
        env = "DRY_RUN",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub dry_run: bool,

    /// Continue with the remaining files when one fails
    #[arg(
        long,
        env = "KEEP_GOING",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub keep_going: bool,

    /// Maximum files processed per run [default: 10]
    #[arg(long, env = "MAX_FILES", value_name = "N")]
    pub max_files: Option<usize>,

    /// Chat CLI program, optionally with leading arguments [default: copilot]
    #[arg(long, env = "CHAT_PROGRAM", value_name = "COMMAND")]
    pub chat_program: Option<String>,
}

/// Everything a `links` run needs besides the token
#[derive(Debug, Clone)]
pub struct LinksInvocation {
    pub options: LinkOptions,
    pub chat_program: String,
    pub chat_args: Vec<String>,
}

impl LinksArgs {
    pub fn into_invocation(self, config: &LinksConfig) -> Result<LinksInvocation> {
        let source = self
            .listing
            .resolve(config.listing.as_ref(), config.site_dir.as_ref())?;

        let max_files = self
            .max_files
            .or(config.max_files)
            .unwrap_or(DEFAULT_MAX_FILES);
        if max_files == 0 {
            return Err(SitepipeError::InvalidInput(
                "--max-files must be at least 1".to_string(),
            ));
        }

        let options = LinkOptions {
            source,
            content_folder: self
                .content_folder
                .or_else(|| config.content_folder.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_FOLDER)),
            prompt: PromptSource {
                override_text: self.prompt,
                file: self
                    .prompt_file
                    .or_else(|| config.prompt_file.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPT_FILE)),
            },
            target: self.file,
            dry_run: self.dry_run,
            keep_going: self.keep_going,
            max_files,
        };

        let chat_program = self
            .chat_program
            .or_else(|| config.chat_program.clone())
            .unwrap_or_else(|| DEFAULT_CHAT_PROGRAM.to_string());
        let chat_args = config
            .chat_args
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_ARGS.iter().map(|s| s.to_string()).collect());

        Ok(LinksInvocation {
            options,
            chat_program,
            chat_args,
        })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Start URL of the crawl
    #[arg(long, env = "WEBSITE_URL", value_name = "URL")]
    pub url: Option<String>,

    /// CSV output file [default: graph.csv]
    #[arg(short, long, env = "OUTPUT_FILE", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Stop after this many pages [default: unlimited]
    #[arg(long, env = "MAX_PAGES", value_name = "N")]
    pub max_pages: Option<usize>,

    /// Maximum link depth from the start URL [default: 5]
    #[arg(long, env = "MAX_DEPTH", value_name = "N")]
    pub max_depth: Option<u32>,

    /// Whether to honour robots.txt [default: true]
    #[arg(
        long,
        env = "RESPECT_ROBOTS",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        hide = true
    )]
    pub respect_robots: Option<bool>,

    /// Ignore robots.txt
    #[arg(long)]
    pub no_respect_robots: bool,

    /// Seconds to wait between requests [default: 0.5]
    #[arg(long, env = "CRAWL_DELAY", value_name = "SECONDS")]
    pub delay: Option<f64>,
}

impl GraphArgs {
    pub fn into_options(self, config: &GraphConfig) -> Result<GraphOptions> {
        let raw = self.url.unwrap_or_default();
        if raw.trim().is_empty() {
            return Err(SitepipeError::InvalidUrl(
                "no start URL given (use --url or WEBSITE_URL)".to_string(),
            ));
        }
        let start_url = parse_start_url(raw.trim())?;

        let seconds = self.delay.or(config.delay).unwrap_or(DEFAULT_CRAWL_DELAY);
        let delay = Duration::try_from_secs_f64(seconds).map_err(|_| {
            SitepipeError::InvalidInput(format!(
                "crawl delay must be a non-negative number of seconds, got {}",
                seconds
            ))
        })?;

        let respect_robots = if self.no_respect_robots {
            false
        } else {
            self.respect_robots
                .or(config.respect_robots)
                .unwrap_or(true)
        };

        Ok(GraphOptions {
            start_url,
            output: self
                .output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAPH_OUTPUT)),
            max_pages: self.max_pages.or(config.max_pages),
            max_depth: self
                .max_depth
                .or(config.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            respect_robots,
            delay,
        })
    }
}

/// Start URLs need an http(s) scheme and a host
fn parse_start_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| SitepipeError::InvalidUrl(raw.to_string()))?;
    let web_scheme = url.scheme() == "http" || url.scheme() == "https";
    if !web_scheme || url.host_str().is_none_or(str::is_empty) {
        return Err(SitepipeError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sitepipe"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_export_defaults() {
        let cli = parse(&["export", "--listing", "list.csv"]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        let options = args.into_options(&ExportConfig::default()).unwrap();
        assert_eq!(options.source, ListingSource::File(PathBuf::from("list.csv")));
        assert_eq!(options.output, PathBuf::from("posts_export.jsonl"));
    }

    #[test]
    fn test_flag_beats_config_file() {
        let config = ExportConfig {
            listing: Some(PathBuf::from("from-config.csv")),
            site_dir: None,
            output: Some(PathBuf::from("config.jsonl")),
        };
        let args = ExportArgs {
            listing: ListingArgs {
                listing: None,
                site_dir: Some(PathBuf::from("site")),
            },
            output: None,
        };
        let options = args.into_options(&config).unwrap();
        assert_eq!(options.source, ListingSource::HugoSite(PathBuf::from("site")));
        assert_eq!(options.output, PathBuf::from("config.jsonl"));
    }

    #[test]
    fn test_listing_required() {
        let err = ExportArgs::default()
            .into_options(&ExportConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_links_defaults() {
        let args = LinksArgs {
            listing: ListingArgs {
                listing: Some(PathBuf::from("list.csv")),
                site_dir: None,
            },
            ..Default::default()
        };
        let run = args.into_invocation(&LinksConfig::default()).unwrap();
        assert_eq!(run.options.content_folder, PathBuf::from("content/blog"));
        assert_eq!(
            run.options.prompt.file,
            PathBuf::from(".github/prompts/generate-links.md")
        );
        assert_eq!(run.options.max_files, 10);
        assert!(!run.options.dry_run);
        assert_eq!(run.chat_program, "copilot");
        assert_eq!(run.chat_args, vec!["--allow-all-tools", "--silent"]);
    }

    #[test]
    fn test_links_config_chat_args() {
        let args = LinksArgs {
            listing: ListingArgs {
                listing: Some(PathBuf::from("list.csv")),
                site_dir: None,
            },
            ..Default::default()
        };
        let config = LinksConfig {
            chat_args: Some(vec!["--quiet".to_string()]),
            max_files: Some(3),
            ..Default::default()
        };
        let run = args.into_invocation(&config).unwrap();
        assert_eq!(run.chat_args, vec!["--quiet"]);
        assert_eq!(run.options.max_files, 3);
    }

    #[test]
    fn test_links_flags_parse() {
        let cli = parse(&[
            "links",
            "--listing",
            "l.csv",
            "--dry-run",
            "--keep-going",
            "--max-files",
            "2",
            "--file",
            "content/blog/a.md",
        ]);
        let Commands::Links(args) = cli.command else {
            panic!("expected links");
        };
        let run = args.into_invocation(&LinksConfig::default()).unwrap();
        assert!(run.options.dry_run);
        assert!(run.options.keep_going);
        assert_eq!(run.options.max_files, 2);
        assert_eq!(run.options.target, Some(PathBuf::from("content/blog/a.md")));
    }

    #[test]
    fn test_graph_defaults() {
        let args = GraphArgs {
            url: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let options = args.into_options(&GraphConfig::default()).unwrap();
        assert_eq!(options.start_url.as_str(), "https://example.com/");
        assert_eq!(options.output, PathBuf::from("graph.csv"));
        assert_eq!(options.max_pages, None);
        assert_eq!(options.max_depth, 5);
        assert!(options.respect_robots);
        assert_eq!(options.delay, Duration::from_millis(500));
    }

    #[test]
    fn test_graph_no_respect_robots_wins() {
        let args = GraphArgs {
            url: Some("https://example.com".to_string()),
            respect_robots: Some(true),
            no_respect_robots: true,
            ..Default::default()
        };
        let config = GraphConfig {
            respect_robots: Some(true),
            ..Default::default()
        };
        assert!(!args.into_options(&config).unwrap().respect_robots);
    }

    #[test]
    fn test_graph_rejects_bad_urls() {
        for raw in ["", "example.com", "ftp://example.com/", "not a url"] {
            let args = GraphArgs {
                url: Some(raw.to_string()),
                ..Default::default()
            };
            let err = args.into_options(&GraphConfig::default()).unwrap_err();
            assert!(
                matches!(err, SitepipeError::InvalidUrl(_)),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_graph_rejects_negative_delay() {
        let args = GraphArgs {
            url: Some("https://example.com".to_string()),
            delay: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            args.into_options(&GraphConfig::default()),
            Err(SitepipeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_graph_rejects_oversized_delay() {
        for seconds in [1e30, f64::NAN, f64::INFINITY] {
            let args = GraphArgs {
                url: Some("https://example.com".to_string()),
                delay: Some(seconds),
                ..Default::default()
            };
            let err = args.into_options(&GraphConfig::default()).unwrap_err();
            assert_eq!(err.exit_code(), 3, "{} should be rejected", seconds);
        }
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = parse(&["-vv", "--log-format", "json", "graph"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
