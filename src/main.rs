use clap::Parser;
use log::error;
use medialog_lib::cli;
use medialog_lib::config::{AppConfig, Cli, Command, ConfigAction};
use medialog_lib::logging::{parse_level, setup_logger};
use medialog_lib::web_ui;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = setup_logger(parse_level(&cli.log_level)) {
        eprintln!("Failed to set up logger: {}", e);
        std::process::exit(1);
    }

    let config = match AppConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::List { media_type, status, tag, keyword, json } => {
            let filter = cli::build_filter(media_type.as_deref(), status.as_deref(), tag.as_deref(), keyword.as_deref());
            cli::list_records(config, filter, json).await
        }
        Command::Options { json } => cli::show_options(config, json).await,
        Command::Stats { json } => cli::show_stats(config, json).await,
        Command::Report { year, month, json } => cli::show_report(config, year, &month, json).await,
        Command::Serve { .. } => web_ui::serve(config).await,
        Command::Config { action } => match action {
            ConfigAction::Get { key } => cli::get_config_value(config, &key),
            ConfigAction::Set { key, value } => cli::set_config_value(config, &key, &value),
        },
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
