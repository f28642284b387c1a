use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::platform::types::RepoType;

/// Raw repository list page: `repos-<username>-<type>-<page>.json`.
pub fn repos_page_file(username: &str, repo_type: RepoType, page: u32) -> String {
    format!("repos-{}-{repo_type}-{page}.json", sanitize(username))
}

/// Raw issue list of one repository: `issues-<repo short name>.json`.
pub fn issues_file(repo_name: &str) -> String {
    format!("issues-{}.json", sanitize(repo_name))
}

/// Final aggregate of enriched repositories: `repos-<username>.json`.
pub fn aggregate_file(username: &str) -> String {
    format!("repos-{}.json", sanitize(username))
}

/// Keep a name component from escaping the output directory.
fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect()
}

/// Writes pretty-printed JSON files, each wrapping its payload in a single key.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `{"<key>": value}` to `<dir>/<file_name>` and return the path.
    pub async fn write_wrapped<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        key: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let mut wrapper = Map::new();
        wrapper.insert(key.to_string(), serde_json::to_value(value)?);
        let contents = serde_json::to_string_pretty(&Value::Object(wrapper))?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, contents).await?;
        tracing::debug!(path = %path.display(), "Wrote output file");
        Ok(path)
    }
}
