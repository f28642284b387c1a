//! In-memory `Platform` for exercising the fetch workflow without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

#[derive(Debug, Clone)]
pub enum FakeResponse {
    Ok { body: String, link: Option<String> },
    Status(u16),
}

impl FakeResponse {
    pub fn json(body: serde_json::Value) -> Self {
        FakeResponse::Ok {
            body: body.to_string(),
            link: None,
        }
    }

    pub fn raw(body: &str) -> Self {
        FakeResponse::Ok {
            body: body.to_string(),
            link: None,
        }
    }

    pub fn with_link(self, link: &str) -> Self {
        match self {
            FakeResponse::Ok { body, .. } => FakeResponse::Ok {
                body,
                link: Some(link.to_string()),
            },
            other => other,
        }
    }
}

#[derive(Default)]
pub struct FakePlatform {
    repos: Option<FakeResponse>,
    issues: HashMap<String, FakeResponse>,
    /// Every requested path, in call order.
    calls: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(mut self, response: FakeResponse) -> Self {
        self.repos = Some(response);
        self
    }

    pub fn with_issues(mut self, repo_full_name: &str, response: FakeResponse) -> Self {
        self.issues.insert(repo_full_name.to_string(), response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, path: String, response: Option<&FakeResponse>) -> Result<ApiPage> {
        self.calls.lock().unwrap().push(path.clone());
        let url = format!("https://fake.test{path}");
        match response {
            Some(FakeResponse::Ok { body, link }) => Ok(ApiPage {
                url,
                status: 200,
                link: link.clone(),
                body: body.clone(),
            }),
            Some(FakeResponse::Status(status)) => Err(AppError::GitHubApi(format!(
                "{url} returned {status}"
            ))),
            None => Err(AppError::GitHubApi(format!("{url} returned 404"))),
        }
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn list_user_repos(&self, username: &str, query: &RepoQuery) -> Result<ApiPage> {
        let path = format!("/users/{username}/repos?type={}", query.repo_type);
        self.respond(path, self.repos.as_ref())
    }

    async fn list_repo_issues(&self, repo_full_name: &str, _query: &IssueQuery) -> Result<ApiPage> {
        let path = format!("/repos/{repo_full_name}/issues");
        self.respond(path, self.issues.get(repo_full_name))
    }
}
