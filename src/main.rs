// Entrypoint for the CLI application.
// - Parses flags, sets up logging, builds the API client and token store.
// - Transport and token-file faults end the process through `anyhow`.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use safe_courier_cli::{api::ApiClient, cli::Cli, session::SessionStore, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let Some(command) = cli.selected_command() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = cli.config();
    log::debug!("api {} token file {}", config.api_url, config.token_file.display());

    let api = ApiClient::new(&config.api_url).context("Failed to build HTTP client")?;
    let mut session = SessionStore::new(config.token_file);

    let stdout = std::io::stdout();
    ui::run(command, &api, &mut session, &mut stdout.lock())?;
    Ok(())
}
