//! Scoring engine
//!
//! Pure functions deriving the three composite scores from already-fetched
//! data. The exact weights are part of the behavioral contract: they are
//! not discoverable from data, and downstream consumers display the numbers
//! verbatim, so changing any of them is a breaking change.

use chrono::Utc;

use crate::onboard::providers::models::{HealthChecklist, Issue, RepositorySnapshot};

/// Computes the health score, a weighted-checklist metric in [0, 100]
///
/// Starts at a base of 50 and adds fixed bonuses:
///
/// | signal                  | bonus |
/// |-------------------------|-------|
/// | readme present          | +10   |
/// | contributing guide      | +15   |
/// | license                 | +10   |
/// | issue template          | +5    |
/// | pull request template   | +5    |
/// | more than 100 stars     | +5    |
/// | any open issues         | +5    |
///
/// All terms are non-negative, so only the upper bound needs clamping.
pub fn compute_health_score(snapshot: &RepositorySnapshot, checklist: &HealthChecklist) -> u8 {
    let mut score: u32 = 50;

    if checklist.readme {
        score += 10;
    }
    if checklist.contributing {
        score += 15;
    }
    if checklist.license {
        score += 10;
    }
    if checklist.issues {
        score += 5;
    }
    if checklist.pull_requests {
        score += 5;
    }
    if snapshot.stars > 100 {
        score += 5;
    }
    if snapshot.open_issues_count > 0 {
        score += 5;
    }

    score.min(100) as u8
}

/// Computes mentor readiness, a weighted activity/process metric in [0, 100]
///
/// Bonuses, all additive:
///
/// - push recency: < 7 days +40, < 30 days +25, < 90 days +10, otherwise
///   nothing (a repository that never pushed earns nothing)
/// - contributing guide +20, pull request template +10
/// - code of conduct +5 (the checklist flag is never populated by the fetch
///   path, so this bonus is inert; kept for parity, not usefulness)
/// - discussions feature enabled +15
/// - well-triaged heuristic: `openIssues / max(stars, 1) < 0.1` +10
pub fn compute_mentor_readiness(snapshot: &RepositorySnapshot, checklist: &HealthChecklist) -> u8 {
    let mut score: u32 = 0;

    if let Some(pushed_at) = snapshot.pushed_at {
        let days_since_push = (Utc::now() - pushed_at).num_days();
        if days_since_push < 7 {
            score += 40;
        } else if days_since_push < 30 {
            score += 25;
        } else if days_since_push < 90 {
            score += 10;
        }
    }

    if checklist.contributing {
        score += 20;
    }
    if checklist.pull_requests {
        score += 10;
    }
    if checklist.code_of_conduct {
        score += 5;
    }

    if snapshot.has_discussions {
        score += 15;
    }

    let issue_to_star_ratio = snapshot.open_issues_count as f64 / (snapshot.stars.max(1)) as f64;
    if issue_to_star_ratio < 0.1 {
        score += 10;
    }

    score.min(100) as u8
}

/// Computes the skill-match score for an issue, in [0, 100]
///
/// Case-insensitive substring containment (not word-boundary, not semantic)
/// of each skill against the issue title and body:
/// `round(100 * matched / total)`, clamped to 100. No declared skills means
/// a score of zero, not an error.
pub fn compute_match_score(issue: &Issue, skills: &[String]) -> u8 {
    if skills.is_empty() {
        return 0;
    }

    let haystack = format!("{} {}", issue.title, issue.body).to_lowercase();
    let matched = skills
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .count();

    let score = ((matched as f64 / skills.len() as f64) * 100.0).round() as u32;
    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboard::providers::models::IssueAuthor;
    use chrono::Duration;

    fn snapshot() -> RepositorySnapshot {
        RepositorySnapshot {
            description: None,
            stars: 0,
            forks: 0,
            open_issues_count: 0,
            pushed_at: None,
            homepage: None,
            has_discussions: false,
        }
    }

    fn empty_checklist() -> HealthChecklist {
        HealthChecklist {
            readme: false,
            contributing: false,
            license: false,
            issues: false,
            pull_requests: false,
            code_of_conduct: false,
        }
    }

    fn issue(title: &str, body: &str) -> Issue {
        Issue {
            id: 1,
            number: 1,
            title: title.to_string(),
            body: body.to_string(),
            state: "open".to_string(),
            url: "#".to_string(),
            comments: 0,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            author: IssueAuthor {
                login: "mockuser".to_string(),
                avatar_url: String::new(),
            },
            labels: vec![],
            repo_url: None,
            repo_name: None,
            match_score: None,
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn health_score_base_is_fifty() {
        // The ratio heuristic aside, an empty repository with no community
        // files sits exactly at the base.
        assert_eq!(compute_health_score(&snapshot(), &empty_checklist()), 50);
    }

    #[test]
    fn health_score_is_monotonic_in_each_checklist_flag() {
        let snap = snapshot();
        let base = compute_health_score(&snap, &empty_checklist());

        for flip in 0..5 {
            let mut checklist = empty_checklist();
            match flip {
                0 => checklist.readme = true,
                1 => checklist.contributing = true,
                2 => checklist.license = true,
                3 => checklist.issues = true,
                _ => checklist.pull_requests = true,
            }
            assert!(
                compute_health_score(&snap, &checklist) > base,
                "flag {} did not increase the score",
                flip
            );
        }
    }

    #[test]
    fn health_score_is_clamped_to_one_hundred() {
        let mut snap = snapshot();
        snap.stars = 10_000;
        snap.open_issues_count = 20;

        let checklist = HealthChecklist {
            readme: true,
            contributing: true,
            license: true,
            issues: true,
            pull_requests: true,
            code_of_conduct: true,
        };

        assert_eq!(compute_health_score(&snap, &checklist), 100);
    }

    #[test]
    fn mentor_readiness_recency_buckets() {
        let cases = [(3, 40 + 10), (20, 25 + 10), (60, 10 + 10), (200, 10)];
        for (days_ago, expected) in cases {
            let mut snap = snapshot();
            snap.pushed_at = Some(Utc::now() - Duration::days(days_ago));
            // Zero stars, zero issues: the ratio heuristic always grants +10
            assert_eq!(
                compute_mentor_readiness(&snap, &empty_checklist()),
                expected,
                "push {} days ago",
                days_ago
            );
        }
    }

    #[test]
    fn mentor_readiness_never_pushed_earns_no_recency() {
        let score = compute_mentor_readiness(&snapshot(), &empty_checklist());
        assert_eq!(score, 10); // ratio heuristic only
    }

    #[test]
    fn mentor_readiness_ratio_heuristic_requires_triage() {
        // 50 open issues against 100 stars is 0.5, no bonus
        let mut snap = snapshot();
        snap.stars = 100;
        snap.open_issues_count = 50;
        assert_eq!(compute_mentor_readiness(&snap, &empty_checklist()), 0);

        // 5 against 100 is 0.05, bonus granted
        snap.open_issues_count = 5;
        assert_eq!(compute_mentor_readiness(&snap, &empty_checklist()), 10);
    }

    #[test]
    fn mentor_readiness_is_within_bounds() {
        let mut snap = snapshot();
        snap.pushed_at = Some(Utc::now());
        snap.has_discussions = true;

        let checklist = HealthChecklist {
            readme: true,
            contributing: true,
            license: true,
            issues: true,
            pull_requests: true,
            code_of_conduct: true,
        };

        let score = compute_mentor_readiness(&snap, &checklist);
        assert!(score <= 100);
        assert_eq!(score, 100); // 40 + 20 + 10 + 5 + 15 + 10 clamps
    }

    #[test]
    fn match_score_no_skills_is_zero() {
        assert_eq!(compute_match_score(&issue("Fix the parser", ""), &[]), 0);
    }

    #[test]
    fn match_score_full_match_is_one_hundred() {
        let it = issue("Refactor React components to hooks", "");
        assert_eq!(compute_match_score(&it, &skills(&["REACT", "Hooks"])), 100);
    }

    #[test]
    fn match_score_counts_partial_matches() {
        let it = issue("Add TypeScript definitions", "missing types for the API");
        // typescript matches, rust does not, css does not
        assert_eq!(compute_match_score(&it, &skills(&["typescript", "rust", "css"])), 33);
    }

    #[test]
    fn match_score_searches_body_too() {
        let it = issue("Update docs", "needs new Python examples");
        assert_eq!(compute_match_score(&it, &skills(&["python"])), 100);
    }
}
