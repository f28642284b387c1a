use async_trait::async_trait;
use reqwest::{header, Client, Request, Url};

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::platform::types::*;
use crate::platform::Platform;

pub struct GitHubPlatform {
    client: Client,
    config: GitHubConfig,
}

impl GitHubPlatform {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn repos_url(&self, username: &str, query: &RepoQuery) -> Result<Url> {
        let base = format!(
            "{}/users/{}/repos",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(username)
        );
        Self::with_params(&base, &query.params())
    }

    fn issues_url(&self, repo_full_name: &str, query: &IssueQuery) -> Result<Url> {
        let path = repo_full_name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let base = format!(
            "{}/repos/{path}/issues",
            self.config.api_base.trim_end_matches('/')
        );
        Self::with_params(&base, &query.params())
    }

    fn with_params(base: &str, params: &[(&'static str, String)]) -> Result<Url> {
        Url::parse_with_params(base, params)
            .map_err(|e| AppError::Config(format!("Invalid API URL {base}: {e}")))
    }

    /// Build a GET for `url` with the endpoint's media type and token auth.
    fn request(&self, url: Url, media_type: &str) -> Result<Request> {
        let request = self
            .client
            .get(url)
            .header(header::ACCEPT, media_type)
            .header(header::AUTHORIZATION, format!("token {}", self.config.token))
            .build()?;
        Ok(request)
    }

    fn repos_request(&self, username: &str, query: &RepoQuery) -> Result<Request> {
        let url = self.repos_url(username, query)?;
        self.request(url, &self.config.repos_media_type)
    }

    fn issues_request(&self, repo_full_name: &str, query: &IssueQuery) -> Result<Request> {
        let url = self.issues_url(repo_full_name, query)?;
        self.request(url, &self.config.issues_media_type)
    }

    async fn get_page(&self, request: Request) -> Result<ApiPage> {
        let url = request.url().clone();
        tracing::debug!(url = %url, "Sending GitHub API request");

        let response = self.client.execute(request).await?;

        let status = response.status();
        let link = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GitHubApi(format!(
                "{url} returned {status}: {body}"
            )));
        }

        let body = response.text().await?;

        Ok(ApiPage {
            url: url.to_string(),
            status: status.as_u16(),
            link,
            body,
        })
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn list_user_repos(&self, username: &str, query: &RepoQuery) -> Result<ApiPage> {
        let request = self.repos_request(username, query)?;
        self.get_page(request).await
    }

    async fn list_repo_issues(&self, repo_full_name: &str, query: &IssueQuery) -> Result<ApiPage> {
        let request = self.issues_request(repo_full_name, query)?;
        self.get_page(request).await
    }
}
