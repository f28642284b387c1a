pub mod github;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch one page of a user's repositories.
    async fn list_user_repos(&self, username: &str, query: &RepoQuery) -> Result<ApiPage>;

    /// Fetch one page of a repository's issues (pull requests included).
    async fn list_repo_issues(&self, repo_full_name: &str, query: &IssueQuery) -> Result<ApiPage>;
}

#[cfg(test)]
pub mod fake;
