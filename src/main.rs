//! appconf CLI entry point.

use clap::Parser;

use appconf::cli::{commands, Cli, Commands};
use appconf::infrastructure::config::SettingsLoader;
use appconf::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match SettingsLoader::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(err) => appconf::cli::handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&settings.logging) {
        Ok(logger) => logger,
        Err(err) => appconf::cli::handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Check { ref path } => commands::check::execute(path, &settings, cli.json).await,
        Commands::Hash { ref path } => commands::hash::execute(path, cli.json),
        Commands::Show {
            ref path,
            kind,
            ref name,
        } => commands::show::execute(path, kind.into(), name, &settings, cli.json).await,
    };

    if let Err(err) = result {
        appconf::cli::handle_error(&err, cli.json);
    }
}
