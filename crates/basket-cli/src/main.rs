//! Basket CLI - Command-line interface for the shopping item analyzer.

use basket_cli::{commands, Cli, CliError, Command, Formatter};
use basket_extractor::{ExtractorConfig, ShoppingItemAnalyzer};
use basket_llm::{OpenAiProvider, ProviderConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::try_parse_with_env_file(None, std::env::args_os()).unwrap_or_else(|e| e.exit());
    let formatter = Formatter::new(cli.format, !cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> basket_cli::Result<()> {
    // Logs go to stderr so JSON output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ExtractorConfig::from_file(path)?,
        None => ExtractorConfig::default(),
    };
    config.validate().map_err(CliError::Config)?;

    let provider = OpenAiProvider::from_config(ProviderConfig::from_env()?, config.request_timeout())?;
    let analyzer = ShoppingItemAnalyzer::new(provider, config);

    let output = match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &analyzer, formatter).await?,
        Command::Batch(args) => commands::execute_batch(args, &analyzer, formatter).await?,
    };
    println!("{}", output);

    Ok(())
}
