use crate::error::Result;
use crate::json::parse_json;
use crate::output::{issues_file, OutputStore};
use crate::platform::types::{IssueQuery, Repository};
use crate::platform::Platform;

use super::partition::split_issues_pull_requests;
use super::{expect_array, log_pagination};

/// Fetch the first page of open issues for `repo` and attach them, split
/// into issues and pull requests.
pub async fn fetch_issues(
    platform: &dyn Platform,
    store: &OutputStore,
    mut repo: Repository,
    query: &IssueQuery,
) -> Result<Repository> {
    let page = platform.list_repo_issues(&repo.full_name, query).await?;
    tracing::info!(url = %page.url, status = page.status, "Fetched issues");

    let raw = parse_json(&page.body);
    store
        .write_wrapped(&issues_file(repo.short_name()), "issues", &raw)
        .await?;

    log_pagination(&page);

    let items = expect_array(raw, &page.url)?;
    let split = split_issues_pull_requests(&items);

    tracing::debug!(
        repo = %repo.full_name,
        issues = split.issues.len(),
        pullrequests = split.pullrequests.len(),
        "Issues partitioned"
    );

    repo.issues = Some(split.issues);
    repo.pullrequests = Some(split.pullrequests);
    Ok(repo)
}
