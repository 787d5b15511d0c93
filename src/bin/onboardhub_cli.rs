use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use onboardhub::onboard::instance;
use onboardhub::onboard::issues::DifficultyTier;
use onboardhub::onboard::providers::models::RepositoryIdentity;

#[derive(Parser)]
#[command(author, version = "0.1.0", about = "OnboardHub terminal client", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// GitHub API token for authentication (overrides GITHUB_TOKEN environment variable)
    #[arg(short = 't', long, global = true)]
    github_token: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository's friendliness to new contributors
    Analyze {
        /// Repository URL, e.g. https://github.com/rust-lang/rust
        repo_url: String,

        /// Print the canned demo analysis instead of fetching
        #[arg(long)]
        demo: bool,
    },
    /// List open issues of a repository matching a difficulty tier
    Issues {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        /// Difficulty tier: beginner, intermediate or pro
        #[arg(short, long, default_value = "beginner")]
        level: String,
    },
    /// Show the first comments of an issue
    Comments {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        /// Issue number
        number: u64,
    },
    /// Search issues across all repositories by skills or keyword
    Search {
        /// Skill to match; repeat the flag for multiple skills
        #[arg(short, long = "skill")]
        skills: Vec<String>,

        /// Free-text keyword searched in issue titles and bodies
        #[arg(short, long)]
        keyword: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let github_token = cli
        .github_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let analyzer = instance::init_components(github_token);

    match cli.command {
        Commands::Analyze { repo_url, demo } => {
            let result = match analyzer.analyze(&repo_url, demo).await {
                Ok(result) => result,
                Err(e) => anyhow::bail!("Analysis failed: {}", e),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Issues { owner, repo, level } => {
            let identity = RepositoryIdentity { owner, name: repo };
            let tier = DifficultyTier::from_level_param(Some(level.as_str()));
            let issues = instance::get_issue_finder()
                .issues_for_tier(&identity, tier)
                .await;
            println!("{}", serde_json::to_string_pretty(&issues)?);
        }
        Commands::Comments {
            owner,
            repo,
            number,
        } => {
            let identity = RepositoryIdentity { owner, name: repo };
            let comments = instance::get_issue_finder()
                .issue_comments(&identity, number)
                .await;
            println!("{}", serde_json::to_string_pretty(&comments)?);
        }
        Commands::Search { skills, keyword } => {
            let issues = match instance::get_issue_finder()
                .search_global(&skills, keyword.as_deref())
                .await
            {
                Ok(issues) => issues,
                Err(e) => anyhow::bail!("Search failed: {}", e),
            };
            println!("{}", serde_json::to_string_pretty(&issues)?);
        }
    }

    Ok(())
}
