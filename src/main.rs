use clap::Parser;
use country_risk::cli::dispatcher::Dispatcher;
use country_risk::cli::main_types::Cli;
use country_risk::storage::config::Config;
use std::path::PathBuf;

fn enable_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    enable_logging(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    let dispatcher = Dispatcher::new(
        config,
        config_path,
        cli.api_base.as_deref(),
        &cli.host,
        cli.timeout,
    );

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("Error [{}]: {}", e.severity().label(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
