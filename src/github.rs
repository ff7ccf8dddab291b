use crate::error::{PortfolioError, Result};
use crate::types::Repository;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const PER_PAGE: u32 = 100;
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("portfolio-page/", env!("CARGO_PKG_VERSION"));

/// Where the page gets its repository list from.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_user_repos(&self, username: &str) -> Result<Vec<Repository>>;
}

pub struct GitHubClient {
    client: Client,
    api_base: Url,
}

impl GitHubClient {
    pub fn new(api_base: &str) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Self::with_client(client, api_base)
    }

    /// Uses a caller-built reqwest client. It should set a `User-Agent`;
    /// GitHub refuses requests without one.
    pub fn with_client(client: Client, api_base: &str) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| PortfolioError::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(PortfolioError::InvalidUrl(api_base.to_string()));
        }

        Ok(GitHubClient { client, api_base })
    }

    /// User agent sent by clients built with [`GitHubClient::new`].
    pub fn user_agent() -> &'static str {
        USER_AGENT
    }

    /// `{api_base}/users/{username}/repos?per_page=100&sort=updated`, with
    /// the username percent-encoded as a single path segment.
    pub fn repos_url(&self, username: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| PortfolioError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(&["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("sort", "updated");
        Ok(url)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    /// Fetches the first page (up to 100) of a user's public repositories.
    async fn list_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.repos_url(username)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::ApiError(status));
        }

        let value: Value = response.json().await?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(PortfolioError::MalformedResponse(format!(
                    "expected a JSON array of repositories, got {}",
                    json_kind(&other)
                )));
            }
        };

        let repos = items
            .into_iter()
            .map(serde_json::from_value::<Repository>)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!("Fetched {} repositories for {}", repos.len(), username);
        Ok(repos)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
