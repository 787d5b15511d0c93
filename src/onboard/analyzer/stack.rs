//! Tech stack, setup, and community-link derivation
//!
//! Everything here is derived locally from already-fetched metadata: the
//! tech stack and package manager from the language breakdown, the setup
//! commands from the package manager, and the community links from fixed
//! substring detection over the description and homepage.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::onboard::providers::models::{
    LanguageBreakdown, PackageManager, SocialLink, SocialLinkKind,
};

/// How many languages make up the displayed tech stack
const TECH_STACK_SIZE: usize = 5;

static DISCORD_INVITE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"discord\.gg/[a-zA-Z0-9]+").expect("valid discord invite pattern"));

/// The first five language names, in upstream (descending byte count) order
pub fn derive_tech_stack(languages: &LanguageBreakdown) -> Vec<String> {
    languages
        .names()
        .take(TECH_STACK_SIZE)
        .map(|name| name.to_string())
        .collect()
}

/// Infers the package manager from the language breakdown
///
/// First-match-wins over a fixed priority list; a JavaScript/TypeScript
/// repository that also contains Python is an npm project, not a pip one.
pub fn infer_package_manager(languages: &LanguageBreakdown) -> PackageManager {
    if languages.contains("JavaScript") || languages.contains("TypeScript") {
        PackageManager::Npm
    } else if languages.contains("Python") {
        PackageManager::Pip
    } else if languages.contains("Go") {
        PackageManager::Go
    } else if languages.contains("Rust") {
        PackageManager::Cargo
    } else if languages.contains("Java") {
        PackageManager::MavenGradle
    } else {
        PackageManager::Unknown
    }
}

/// Ordered shell commands to get the repository running locally
///
/// Always starts with the clone; tooling commands follow for ecosystems we
/// recognize. An unknown ecosystem gets the clone alone rather than a
/// guess.
pub fn setup_commands(repo_url: &str, package_manager: PackageManager) -> Vec<String> {
    let mut commands = vec![format!("git clone {}", repo_url)];

    match package_manager {
        PackageManager::Npm => {
            commands.push("npm install".to_string());
            commands.push("npm run dev".to_string());
        }
        PackageManager::Pip => {
            commands.push("pip install -r requirements.txt".to_string());
        }
        PackageManager::Go => {
            commands.push("go mod tidy".to_string());
            commands.push("go run .".to_string());
        }
        PackageManager::Cargo => {
            commands.push("cargo build".to_string());
            commands.push("cargo run".to_string());
        }
        PackageManager::MavenGradle => {
            commands.push("./mvnw clean install".to_string());
        }
        PackageManager::Unknown => {}
    }

    commands
}

/// Detects community links in the description and homepage
///
/// Fixed substring detection: a `discord.gg` mention yields the invite URL
/// extracted from the description, a `slack.com` mention yields the
/// homepage (or a placeholder when there is none). This is intentionally
/// shallow; the goal is "does this project have a place to ask questions",
/// not link validation.
pub fn detect_social_links(description: Option<&str>, homepage: Option<&str>) -> Vec<SocialLink> {
    let mut links = Vec::new();

    let combined = format!(
        "{} {}",
        description.unwrap_or_default(),
        homepage.unwrap_or_default()
    )
    .to_lowercase();

    if combined.contains("discord.gg") {
        if let Some(invite) = description.and_then(|text| DISCORD_INVITE.find(text)) {
            links.push(SocialLink {
                kind: SocialLinkKind::Discord,
                url: format!("https://{}", invite.as_str()),
            });
        }
    }

    if combined.contains("slack.com") {
        links.push(SocialLink {
            kind: SocialLinkKind::Slack,
            url: homepage.unwrap_or("#").to_string(),
        });
    }

    links
}
