use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which repositories of a user to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    #[default]
    All,
    Owner,
    Member,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::All => "all",
            RepoType::Owner => "owner",
            RepoType::Member => "member",
        }
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query for `GET /users/{username}/repos`.
#[derive(Debug, Clone)]
pub struct RepoQuery {
    pub repo_type: RepoType,
    pub per_page: u32,
    pub page: u32,
}

impl RepoQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.repo_type.to_string()),
            ("sort", "full_name".to_string()),
            ("direction", "asc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Query for `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone)]
pub struct IssueQuery {
    pub per_page: u32,
    pub page: u32,
}

impl IssueQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("state", "open".to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// One successful (2xx) API response, body still undecoded.
#[derive(Debug, Clone)]
pub struct ApiPage {
    pub url: String,
    pub status: u16,
    /// Raw `Link` header, present when more pages exist.
    pub link: Option<String>,
    pub body: String,
}

/// A repository as returned by the API, enriched in place with its open
/// issues and pull requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pullrequests: Option<Vec<Value>>,
    /// Every other field of the API record, written back out untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    /// Short name used in per-repository file names.
    pub fn short_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name;
        }
        self.full_name
            .rsplit_once('/')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }
}

/// Open issues split by whether they are pull requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partitioned {
    pub issues: Vec<Value>,
    pub pullrequests: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_keeps_unknown_fields() {
        let raw = json!({
            "full_name": "octocat/hello",
            "name": "hello",
            "stargazers_count": 7,
            "owner": {"login": "octocat"}
        });
        let repo: Repository = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(repo.full_name, "octocat/hello");
        assert_eq!(repo.extra["stargazers_count"], json!(7));
        assert!(repo.issues.is_none());

        // Not yet enriched: serializes back to the original record
        assert_eq!(serde_json::to_value(&repo).unwrap(), raw);
    }

    #[test]
    fn test_record_without_name_is_written_back_unchanged() {
        let body = r#"{"full_name":"a/b","z":1,"id":2}"#;
        let repo: Repository = serde_json::from_str(body).unwrap();
        assert!(repo.name.is_none());
        assert_eq!(repo.short_name(), "b");

        // No invented fields, API field order kept
        assert_eq!(serde_json::to_string(&repo).unwrap(), body);
    }

    #[test]
    fn test_unknown_fields_keep_response_order() {
        let body = r#"{"full_name":"a/b","name":"b","zeta":1,"alpha":2,"mid":3}"#;
        let repo: Repository = serde_json::from_str(body).unwrap();
        let keys: Vec<&str> = repo.extra.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&repo).unwrap(), body);
    }

    #[test]
    fn test_short_name_falls_back_to_full_name() {
        let repo: Repository = serde_json::from_value(json!({"full_name": "a/b"})).unwrap();
        assert_eq!(repo.short_name(), "b");
    }

    #[test]
    fn test_repo_query_params() {
        let query = RepoQuery {
            repo_type: RepoType::All,
            per_page: 40,
            page: 1,
        };
        let params = query.params();
        assert!(params.contains(&("type", "all".to_string())));
        assert!(params.contains(&("sort", "full_name".to_string())));
        assert!(params.contains(&("direction", "asc".to_string())));
        assert!(params.contains(&("per_page", "40".to_string())));
    }

    #[test]
    fn test_issue_query_params() {
        let query = IssueQuery {
            per_page: 40,
            page: 1,
        };
        let params = query.params();
        assert!(params.contains(&("state", "open".to_string())));
        assert!(params.contains(&("sort", "created".to_string())));
        assert!(params.contains(&("direction", "desc".to_string())));
    }
}
