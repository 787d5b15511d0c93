//! Process-wide component instances
//!
//! The HTTP handlers and the CLI share one [`RepositoryAnalyzer`] and one
//! [`IssueFinder`] per process, so the credential is read exactly once and
//! the analysis cache actually spans requests. Initialization happens once
//! at startup; later init calls are ignored and later getters fall back to
//! unauthenticated defaults.

use once_cell::sync::OnceCell;

use super::RepositoryAnalyzer;
use crate::onboard::issues::IssueFinder;

static GLOBAL_ANALYZER: OnceCell<RepositoryAnalyzer> = OnceCell::new();
static GLOBAL_ISSUE_FINDER: OnceCell<IssueFinder> = OnceCell::new();

/// Initializes the global analyzer and issue finder with the given credential
///
/// Should be called once during process startup. If called multiple times,
/// only the first call has an effect; the credential of later calls is
/// silently ignored.
pub fn init_components(github_token: Option<String>) -> &'static RepositoryAnalyzer {
    let analyzer = GLOBAL_ANALYZER.get_or_init(|| {
        RepositoryAnalyzer::new(github_token.clone())
            .expect("failed to initialize global repository analyzer")
    });

    GLOBAL_ISSUE_FINDER.get_or_init(|| IssueFinder::new(analyzer.client().clone()));

    analyzer
}

/// The global analyzer, initializing it unauthenticated if nobody has yet
pub fn get_analyzer() -> &'static RepositoryAnalyzer {
    match GLOBAL_ANALYZER.get() {
        Some(analyzer) => analyzer,
        None => init_components(None),
    }
}

/// The global issue finder, initializing it unauthenticated if nobody has yet
pub fn get_issue_finder() -> &'static IssueFinder {
    if GLOBAL_ISSUE_FINDER.get().is_none() {
        init_components(None);
    }
    GLOBAL_ISSUE_FINDER
        .get()
        .expect("issue finder initialized by init_components")
}
