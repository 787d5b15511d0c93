//! Fallback synthesizer
//!
//! Substitute data for every operation the upstream client can fail at.
//! The guarantee is structural, not statistical: a synthesized value
//! satisfies exactly the same schema as a genuine one, so callers never
//! need to distinguish the two to stay crash-free. Numeric fields are
//! pseudo-random within plausible bounds; determinism is not a goal.
//!
//! The explicit demo dataset lives here too, since it is the same kind of
//! canned data, just requested deliberately instead of reached through
//! failure.

use chrono::{Duration, Utc};
use rand::Rng;

use crate::onboard::issues::DifficultyTier;
use crate::onboard::providers::models::{
    AnalysisResult, Comment, HealthChecklist, Issue, IssueAuthor, IssueLabel, LanguageBreakdown,
    PackageManager, RepositoryIdentity, SocialLink, SocialLinkKind,
};

/// Marker prefix carried by every synthesized analysis description
pub const DEGRADED_MARKER: &str = "(Safe Mode)";

/// The canned result served when the caller explicitly requests demo mode
pub fn demo_analysis() -> AnalysisResult {
    AnalysisResult {
        repo: "demo/starter-kit".to_string(),
        description: Some("✨ Demo Mode: A perfect starter kit for beginners.".to_string()),
        stars: 12_450,
        forks: 3_420,
        open_issues: 42,
        primary_language: "TypeScript".to_string(),
        tech_stack: vec![
            "Next.js".to_string(),
            "React".to_string(),
            "Tailwind CSS".to_string(),
        ],
        package_manager: PackageManager::Npm,
        setup_commands: vec![
            "git clone https://github.com/demo/starter-kit".to_string(),
            "npm install".to_string(),
            "npm run dev".to_string(),
        ],
        languages: LanguageBreakdown::new(vec![
            ("TypeScript".to_string(), 85_000),
            ("JavaScript".to_string(), 23_000),
            ("CSS".to_string(), 12_000),
        ]),
        health_score: 98,
        health_checklist: HealthChecklist {
            readme: true,
            contributing: true,
            license: true,
            issues: true,
            pull_requests: true,
            code_of_conduct: false,
        },
        mentor_readiness: 95,
        social_links: vec![
            SocialLink {
                kind: SocialLinkKind::Discord,
                url: "https://discord.gg/onboardhub-demo".to_string(),
            },
            SocialLink {
                kind: SocialLinkKind::Slack,
                url: "https://slack.com/demo-community".to_string(),
            },
        ],
    }
}

/// Synthesizes a plausible analysis for a repository the upstream API could
/// not tell us about
///
/// The description always carries [`DEGRADED_MARKER`] so a human can tell
/// simulated insights from real ones; nothing else distinguishes them.
pub fn synthesize_analysis(identity: &RepositoryIdentity, repo_url: &str) -> AnalysisResult {
    let mut rng = rand::thread_rng();

    AnalysisResult {
        repo: identity.to_string(),
        description: Some(format!(
            "{} Analysis of {}. Real API unavailable, using simulated insights.",
            DEGRADED_MARKER, identity.name
        )),
        stars: rng.gen_range(50..550),
        forks: rng.gen_range(10..110),
        open_issues: rng.gen_range(5..55),
        primary_language: "TypeScript".to_string(),
        tech_stack: vec![
            "React".to_string(),
            "Node.js".to_string(),
            "Tailwind".to_string(),
        ],
        package_manager: PackageManager::Npm,
        setup_commands: vec![
            format!("git clone {}", repo_url),
            "npm install".to_string(),
            "npm run dev".to_string(),
        ],
        languages: LanguageBreakdown::new(vec![
            ("TypeScript".to_string(), 50_000),
            ("JavaScript".to_string(), 20_000),
        ]),
        health_score: 85,
        health_checklist: HealthChecklist {
            readme: true,
            contributing: true,
            license: true,
            issues: true,
            pull_requests: false,
            code_of_conduct: false,
        },
        mentor_readiness: 88,
        social_links: vec![SocialLink {
            kind: SocialLinkKind::Discord,
            url: "https://discord.gg/demo".to_string(),
        }],
    }
}

fn mock_issue(
    id: u64,
    number: u64,
    title: &str,
    body: &str,
    label: (&str, &str),
    comments: u64,
) -> Issue {
    let now = Utc::now().to_rfc3339();
    Issue {
        id,
        number,
        title: title.to_string(),
        body: body.to_string(),
        state: "open".to_string(),
        url: "#".to_string(),
        comments,
        created_at: now.clone(),
        updated_at: now,
        author: IssueAuthor {
            login: "mockuser".to_string(),
            avatar_url: String::new(),
        },
        labels: vec![IssueLabel {
            name: label.0.to_string(),
            color: label.1.to_string(),
        }],
        repo_url: None,
        repo_name: None,
        match_score: None,
    }
}

/// The tier-tagged mock issue corpus
///
/// Every tier has at least one entry so a tier-filtered request is never
/// empty.
fn mock_issue_corpus() -> Vec<(DifficultyTier, Issue)> {
    use DifficultyTier::{Beginner, Intermediate, Pro};

    vec![
        (
            Beginner,
            mock_issue(
                101,
                1,
                "Fix alignment in Dashboard",
                "The dashboard cards are currently not aligned on mobile devices. Need to update the flexbox configuration in `dashboard/page.tsx`.",
                ("good first issue", "7057ff"),
                2,
            ),
        ),
        (
            Beginner,
            mock_issue(
                102,
                4,
                "Update README.md with setup guide",
                "We need a more detailed environment setup guide for Windows users. Please add instructions for WSL2.",
                ("documentation", "0075ca"),
                0,
            ),
        ),
        (
            Beginner,
            mock_issue(
                105,
                18,
                "Fix typo in landing page",
                "There is a spelling mistake in the 'Workflow' section description. 'Effecient' should be 'Efficient'.",
                ("good first issue", "7057ff"),
                1,
            ),
        ),
        (
            Intermediate,
            mock_issue(
                103,
                12,
                "Add unit tests for API routes",
                "Current test coverage is below 50%. We need tests for the analyze and issues endpoints.",
                ("help wanted", "008672"),
                5,
            ),
        ),
        (
            Intermediate,
            mock_issue(
                106,
                22,
                "Refactor issue card component",
                "The `IssueCard` component is too large. Split it into smaller sub-components for better maintainability.",
                ("enhancement", "a2eeef"),
                3,
            ),
        ),
        (
            Intermediate,
            mock_issue(
                107,
                25,
                "Implement dark mode toggle state",
                "The dark mode preference is lost on page reload. Need to persist the state in `localStorage`.",
                ("bug", "d73a4a"),
                7,
            ),
        ),
        (
            Pro,
            mock_issue(
                104,
                45,
                "Migrate database to PostgreSQL",
                "SQLite is hitting performance bottlenecks. Plan and execute the migration to a production-grade PostgreSQL instance.",
                ("advanced", "d93f0b"),
                10,
            ),
        ),
        (
            Pro,
            mock_issue(
                108,
                50,
                "Optimize API response caching",
                "Large repository analysis takes too long. Implement Redis caching to store analysis results for 1 hour.",
                ("performance", "fbca04"),
                8,
            ),
        ),
        (
            Pro,
            mock_issue(
                109,
                66,
                "Implement WebSocket for real-time updates",
                "Users have to refresh to see new analysis progress. Add Socket.io for live updates from the backend.",
                ("feature", "0e8a16"),
                12,
            ),
        ),
    ]
}

/// Mock issues for the requested difficulty tier
pub fn mock_issues(tier: DifficultyTier) -> Vec<Issue> {
    mock_issue_corpus()
        .into_iter()
        .filter(|(level, _)| *level == tier)
        .map(|(_, issue)| issue)
        .collect()
}

/// Mock comments for an issue
///
/// Even issue numbers receive two comments, odd numbers all three, to keep
/// repeated fallback responses from looking copy-pasted.
pub fn mock_comments(issue_number: u64) -> Vec<Comment> {
    let now = Utc::now();
    let comments = vec![
        Comment {
            id: 1,
            author: IssueAuthor {
                login: "senior_dev".to_string(),
                avatar_url: "https://github.com/ghost.png".to_string(),
            },
            body: "This looks like a good start, but consider handling edge cases for null inputs."
                .to_string(),
            created_at: (now - Duration::days(1)).to_rfc3339(),
            html_url: "#".to_string(),
        },
        Comment {
            id: 2,
            author: IssueAuthor {
                login: "maintainer_bot".to_string(),
                avatar_url: "https://avatars.githubusercontent.com/in/29110".to_string(),
            },
            body: "Thanks for the report! We are looking into it.".to_string(),
            created_at: (now - Duration::hours(12)).to_rfc3339(),
            html_url: "#".to_string(),
        },
        Comment {
            id: 3,
            author: IssueAuthor {
                login: "contributor_new".to_string(),
                avatar_url: "https://github.com/octocat.png".to_string(),
            },
            body: "I can pick this up if no one else is working on it.".to_string(),
            created_at: now.to_rfc3339(),
            html_url: "#".to_string(),
        },
    ];

    if issue_number % 2 == 0 {
        comments.into_iter().take(2).collect()
    } else {
        comments
    }
}

fn mock_global_issue(
    id: u64,
    number: u64,
    title: &str,
    body: &str,
    label: (&str, &str),
    repo_name: &str,
    url: &str,
    comments: u64,
    login: &str,
) -> Issue {
    let now = Utc::now().to_rfc3339();
    Issue {
        id,
        number,
        title: title.to_string(),
        body: body.to_string(),
        state: "open".to_string(),
        url: url.to_string(),
        comments,
        created_at: now.clone(),
        updated_at: now,
        author: IssueAuthor {
            login: login.to_string(),
            avatar_url: String::new(),
        },
        labels: vec![IssueLabel {
            name: label.0.to_string(),
            color: label.1.to_string(),
        }],
        repo_url: None,
        repo_name: Some(repo_name.to_string()),
        match_score: None,
    }
}

fn mock_global_corpus() -> Vec<Issue> {
    vec![
        mock_global_issue(
            901,
            123,
            "Refactor React Components to Hooks",
            "Convert class-based components to functional components using hooks.",
            ("good first issue", "7057ff"),
            "facebook/react",
            "https://github.com/facebook/react/issues/123",
            5,
            "dan_abramov",
        ),
        mock_global_issue(
            902,
            456,
            "Fix CSS Grid Layout on Safari",
            "Grid items are misaligned on Safari 14. Need to add prefixes or adjust grid-template.",
            ("bug", "d73a4a"),
            "tailwindlabs/tailwindcss",
            "#",
            2,
            "adamwathan",
        ),
        mock_global_issue(
            903,
            789,
            "Add TypeScript definitions for API",
            "Missing types for the new /user/profile endpoint.",
            ("good first issue", "0075ca"),
            "microsoft/typescript",
            "#",
            8,
            "anders_h",
        ),
        mock_global_issue(
            904,
            101,
            "Documentation: Add Python examples",
            "The SDK documentation lacks Python usage examples.",
            ("documentation", "008672"),
            "python/cpython",
            "#",
            1,
            "guido",
        ),
    ]
}

/// Mock cross-repository search results, filtered by skill substring
///
/// Unlike the other fallbacks this one refuses to return an empty list:
/// when no mock entry matches the skills (or no skills were given), the
/// entire corpus comes back. An empty global search screen is worse than
/// an unrelated one.
pub fn mock_global_issues(skills: &[String]) -> Vec<Issue> {
    let corpus = mock_global_corpus();

    let lowered: Vec<String> = skills.iter().map(|skill| skill.to_lowercase()).collect();
    let matched: Vec<Issue> = corpus
        .iter()
        .filter(|issue| {
            lowered.iter().any(|skill| {
                issue.title.to_lowercase().contains(skill)
                    || issue.body.to_lowercase().contains(skill)
            })
        })
        .cloned()
        .collect();

    if matched.is_empty() { corpus } else { matched }
}
