//! Basket Server CLI
//!
//! Starts the HTTP server backed by OpenAI or Azure OpenAI.

use basket_extractor::ShoppingItemAnalyzer;
use basket_llm::{OpenAiProvider, ProviderConfig};
use basket_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config_override = if args.len() > 2 && args[1] == "--config" {
        Some(PathBuf::from(&args[2]))
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        None
    };

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let extractor_config = config.load_extractor_config(config_override.as_deref())?;

    let provider = OpenAiProvider::from_config(
        ProviderConfig::from_env()?,
        extractor_config.request_timeout(),
    )?;
    let analyzer = ShoppingItemAnalyzer::new(provider, extractor_config);

    start_server(config, analyzer).await?;

    Ok(())
}

fn print_help() {
    println!("Basket Server - Shopping Item Analyzer HTTP Service");
    println!();
    println!("USAGE:");
    println!("    basket-server [--config <path-to-extractor.toml>]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load extractor settings from a TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT (a .env file is loaded if present):");
    println!("    HOST                          Bind host (default: 0.0.0.0)");
    println!("    PORT                          Bind port (default: 3000)");
    println!("    STATIC_DIR                    Front-end directory (default: dist)");
    println!("    LIST_STORE_PATH               Saved lists file (default: data/lists.jsonl)");
    println!("    EXTRACTOR_CONFIG              Extractor TOML, overridden by --config");
    println!("    AZURE_OPENAI_ENDPOINT         Use Azure OpenAI when set");
    println!("    AZURE_OPENAI_API_KEY          Required with AZURE_OPENAI_ENDPOINT");
    println!("    AZURE_OPENAI_API_VERSION      (default: 2024-02-15-preview)");
    println!("    AZURE_OPENAI_DEPLOYMENT_NAME  (default: gpt-4.1)");
    println!("    OPENAI_API_KEY                Required without Azure");
    println!("    OPENAI_MODEL                  (default: gpt-3.5-turbo)");
    println!("    OPENAI_BASE_URL               (default: https://api.openai.com/v1)");
    println!("    RUST_LOG                      Log filter (default: info)");
    println!();
}
