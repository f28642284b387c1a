use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::platform::types::RepoType;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Clone)]
pub struct GitHubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Sent as `authorization: token <value>` even when empty.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_repos_media_type")]
    pub repos_media_type: String,
    /// The reactions preview type; kept configurable in case GitHub retires it.
    #[serde(default = "default_issues_media_type")]
    pub issues_media_type: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

// Manual Debug impl to avoid leaking the token
impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("repos_media_type", &self.repos_media_type)
            .field("issues_media_type", &self.issues_media_type)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            token: String::new(),
            username: None,
            repos_media_type: default_repos_media_type(),
            issues_media_type: default_issues_media_type(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub repo_type: RepoType,
    /// Upper bound on issue fetches in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Minimum spacing between issue fetch starts; 0 disables the limiter.
    #[serde(default)]
    pub min_request_interval_ms: u64,
}

impl FetchConfig {
    pub fn min_request_interval(&self) -> Option<Duration> {
        match self.min_request_interval_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
            repo_type: RepoType::default(),
            concurrency: default_concurrency(),
            min_request_interval_ms: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_repos_media_type() -> String {
    "application/vnd.github.v3+json".to_string()
}

fn default_issues_media_type() -> String {
    "application/vnd.github.squirrel-girl-preview".to_string()
}

fn default_per_page() -> u32 {
    40
}

fn default_page() -> u32 {
    1
}

fn default_concurrency() -> usize {
    8
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("repo-pulse").required(false));
        }

        // Environment variable overrides with REPO_PULSE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("REPO_PULSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if config.github.token.is_empty() {
            config.github.token = std::env::var("GITHUB_TOKEN").unwrap_or_default();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.concurrency == 0 {
            return Err(AppError::Config(
                "fetch.concurrency must be at least 1".to_string(),
            ));
        }
        if self.fetch.concurrency > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(AppError::Config(format!(
                "fetch.concurrency must be at most {}",
                tokio::sync::Semaphore::MAX_PERMITS
            )));
        }
        if self.fetch.per_page == 0 || self.fetch.page == 0 {
            return Err(AppError::Config(
                "fetch.per_page and fetch.page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The user whose repositories are fetched.
    pub fn username(&self) -> Result<&str> {
        self.github
            .username
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "No GitHub username configured (use --username or github.username)"
                        .to_string(),
                )
            })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.github.request_timeout_secs.map(Duration::from_secs)
    }
}
