use clap::Parser;
use sitepipe::application::{ExportService, GraphService, LinkService};
use sitepipe::cli::commands::LinksInvocation;
use sitepipe::cli::{
    format_export_summary, format_graph_summary, format_link_report, init_tracing, Cli, Commands,
};
use sitepipe::error::{Result, SitepipeError};
use sitepipe::infrastructure::chat::{redact_token, TOKEN_ENV};
use sitepipe::infrastructure::prerequisites::{require_program, COPILOT_INSTALL_HINT};
use sitepipe::infrastructure::{ChatCli, ChatClient, Config, HttpFetcher};
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Export(args) => {
            let options = args.into_options(&config.export)?;
            let summary = ExportService::new().execute(options)?;
            println!("{}", format_export_summary(&summary));
            Ok(())
        }
        Commands::Links(args) => {
            let LinksInvocation {
                options,
                chat_program,
                chat_args,
            } = args.into_invocation(&config.links)?;

            // Prerequisites are checked before any other work
            let token = chat_token()?;
            debug!(token = %redact_token(&token), "using token from {}", TOKEN_ENV);
            let chat = ChatCli::new(&chat_program, chat_args, token);
            require_program(chat.program(), COPILOT_INSTALL_HINT)?;
            let chat_name = chat.name().to_string();

            let report = LinkService::new(chat).execute(options)?;
            println!("{}", format_link_report(&report));

            match report.failed_count() {
                0 => Ok(()),
                n => Err(SitepipeError::external(
                    chat_name,
                    format!("{} file(s) failed", n),
                )),
            }
        }
        Commands::Graph(args) => {
            let options = args.into_options(&config.graph)?;
            let service = GraphService::new(HttpFetcher::new()?);
            let summary = service.execute(options)?;
            println!("{}", format_graph_summary(&summary));
            Ok(())
        }
    }
}

fn chat_token() -> Result<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(SitepipeError::MissingToken),
    }
}
