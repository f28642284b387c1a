use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::output::{aggregate_file, issues_file, OutputStore};
use crate::platform::types::{IssueQuery, RepoQuery, Repository};
use crate::platform::Platform;
use crate::queue::WorkerPool;

use super::issues::fetch_issues;
use super::repos::fetch_repositories;

/// Summary of one run. Failures are counted here and logged, never raised.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    /// Repositories listed for the user; `None` if the listing failed.
    pub repositories: Option<usize>,
    pub enriched: usize,
    pub failed: usize,
    /// Where the aggregate was written, if the write succeeded.
    pub aggregate_path: Option<PathBuf>,
}

/// Fetch `username`'s repositories, their open issues, and write the aggregate.
pub async fn run(platform: Arc<dyn Platform>, config: &AppConfig, username: &str) -> RunReport {
    tracing::info!(username, options = ?config, "Starting run");

    let store = Arc::new(OutputStore::new(config.output.dir.clone()));
    if let Err(e) = store.ensure_dir().await {
        tracing::error!(
            dir = %store.dir().display(),
            error = %e,
            "Failed to create output directory"
        );
    }

    let mut report = RunReport::default();

    let repo_query = RepoQuery {
        repo_type: config.fetch.repo_type,
        per_page: config.fetch.per_page,
        page: config.fetch.page,
    };

    let aggregate = match fetch_repositories(platform.as_ref(), &store, username, &repo_query).await
    {
        Ok(repos) => {
            report.repositories = Some(repos.len());
            let enriched = enrich_all(platform, Arc::clone(&store), config, repos).await;
            report.enriched = enriched.iter().filter(|r| r.is_some()).count();
            report.failed = enriched.len() - report.enriched;
            Some(enriched)
        }
        Err(e) => {
            tracing::error!(username, error = %e, "Failed to fetch repositories");
            None
        }
    };

    match store
        .write_wrapped(&aggregate_file(username), "data", &aggregate)
        .await
    {
        Ok(path) => report.aggregate_path = Some(path),
        Err(e) => tracing::error!(username, error = %e, "Failed to write aggregate"),
    }

    tracing::info!(
        username,
        repositories = ?report.repositories,
        enriched = report.enriched,
        failed = report.failed,
        "Run complete"
    );

    report
}

/// Fetch issues for every repository through the worker pool. Failed
/// fetches become `None` at their position.
async fn enrich_all(
    platform: Arc<dyn Platform>,
    store: Arc<OutputStore>,
    config: &AppConfig,
    repos: Vec<Repository>,
) -> Vec<Option<Repository>> {
    let names: Vec<String> = repos.iter().map(|r| r.full_name.clone()).collect();

    for short_name in colliding_short_names(&repos) {
        tracing::warn!(
            short_name = %short_name,
            file = %issues_file(&short_name),
            "Repositories share a short name, their raw issue files overwrite each other"
        );
    }

    let query = Arc::new(IssueQuery {
        per_page: config.fetch.per_page,
        page: config.fetch.page,
    });

    let pool = WorkerPool::new(
        config.fetch.concurrency,
        config.fetch.min_request_interval(),
    );

    let results = pool
        .run_all(repos, move |repo| {
            let platform = Arc::clone(&platform);
            let store = Arc::clone(&store);
            let query = Arc::clone(&query);
            async move { fetch_issues(platform.as_ref(), &store, repo, &query).await }
        })
        .await;

    tracing::info!(count = results.len(), "All issue fetches settled");

    results
        .into_iter()
        .zip(names)
        .map(|(result, repo)| match result.and_then(|inner| inner) {
            Ok(enriched) => Some(enriched),
            Err(e) => {
                tracing::error!(repo = %repo, error = %e, "Failed to fetch issues");
                None
            }
        })
        .collect()
}

/// Short names used by more than one repository, sorted.
fn colliding_short_names(repos: &[Repository]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for repo in repos {
        *counts.entry(repo.short_name()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
