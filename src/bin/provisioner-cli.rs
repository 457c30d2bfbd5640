use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "provisioner-cli")]
#[command(about = "Trigger wallet and faucet provisioning on a running ledger-provisioner", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8090")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a wallet account
    Wallet,
    /// Create a token faucet account
    Faucet,
    /// Show the last known identifiers and error
    State,
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (method, path) = match cli.command {
        Commands::Wallet => (Method::POST, "/api/wallet"),
        Commands::Faucet => (Method::POST, "/api/faucet"),
        Commands::State => (Method::GET, "/api/state"),
        Commands::Health => (Method::GET, "/api/health"),
    };

    let res = client
        .request(method, format!("{}{}", cli.url.trim_end_matches('/'), path))
        .send()
        .await?;

    let status = res.status();
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    let has_error = json.get("error").is_some_and(|e| !e.is_null());
    if !status.is_success() || has_error {
        if let Some(message) = json.pointer("/error/message").and_then(Value::as_str) {
            eprintln!("Error: {}", message);
        } else {
            eprintln!("Error: service returned status {}", status);
        }
        std::process::exit(1);
    }

    Ok(())
}
