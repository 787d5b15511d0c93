use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use onboardhub::onboard::instance;
use onboardhub::transport::http_server::HttpServerApp;

#[derive(Parser)]
#[command(author, version = "0.1.0", about = "OnboardHub HTTP API server", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    /// Defaults to 0.0.0.0 on the PORT environment variable, or port 5000
    #[arg(short, long)]
    address: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// GitHub API token for authentication (overrides GITHUB_TOKEN environment variable)
    #[arg(short = 't', long)]
    github_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the tracing subscriber with stderr logging
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Credential is read exactly once here; components never re-read it
    let github_token = cli
        .github_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    if github_token.is_some() {
        tracing::info!("using GitHub token for API calls");
    } else {
        tracing::info!("no GitHub token configured, using unauthenticated rate limits");
    }

    let address = cli.address.unwrap_or_else(|| {
        let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        format!("0.0.0.0:{}", port)
    });
    let bind_addr: SocketAddr = address.parse()?;

    // Initialize the global components at startup so all requests share
    // one client and one analysis cache
    instance::init_components(github_token);

    HttpServerApp::new(bind_addr).serve().await
}
