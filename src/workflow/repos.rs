use serde_json::Value;

use crate::error::Result;
use crate::json::parse_json;
use crate::output::{repos_page_file, OutputStore};
use crate::platform::types::{RepoQuery, Repository};
use crate::platform::Platform;

use super::{expect_array, log_pagination};

/// Fetch one page of `username`'s repositories.
///
/// The raw response is persisted before it is interpreted, so the page file
/// exists even when the body turns out not to be a repository list.
pub async fn fetch_repositories(
    platform: &dyn Platform,
    store: &OutputStore,
    username: &str,
    query: &RepoQuery,
) -> Result<Vec<Repository>> {
    let page = platform.list_user_repos(username, query).await?;
    tracing::info!(url = %page.url, status = page.status, "Fetched repository list");

    let raw = parse_json(&page.body);
    store
        .write_wrapped(
            &repos_page_file(username, query.repo_type, query.page),
            "repos",
            &raw,
        )
        .await?;

    log_pagination(&page);

    let items = expect_array(raw, &page.url)?;
    let repos: Vec<Repository> = serde_json::from_value(Value::Array(items))?;

    tracing::info!(username, count = repos.len(), "Repositories decoded");
    Ok(repos)
}
