use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::StatusCode;
use tracing::debug;

use crate::{
    config::Config,
    graphql::{
        create_pull_request_detail_query, create_search_query, create_viewer_query, into_data,
    },
    types::*,
};

pub const AUTHENTICATION_HINT: &str = "Authentication failed. Check that GITHUB_TOKEN is set to a valid token with the 'repo' scope.";

/// Non-2xx response from the GitHub API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiStatusError {
    pub status: StatusCode,
    pub message: String,
}

impl std::fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GitHub API returned {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiStatusError {}

fn into_api_error(err: octocrab::Error) -> anyhow::Error {
    match err {
        octocrab::Error::GitHub { source, .. } => ApiStatusError {
            status: source.status_code,
            message: source.message,
        }
        .into(),
        other => anyhow::Error::new(other),
    }
}

/// True when any error in the chain is an HTTP 401 from the API.
pub fn is_authentication_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ApiStatusError>()
            .is_some_and(|api| api.status == StatusCode::UNAUTHORIZED)
    })
}

/// Lines to log for a failure that aborted the run.
pub fn describe_failure(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("Error: {err:#}")];
    if is_authentication_error(err) {
        lines.push(AUTHENTICATION_HINT.to_string());
    }
    lines
}

/// Creates a GitHub client from the run configuration.
///
/// A missing token still yields a client; requests then fail with 401.
pub fn setup_github_client(config: &Config) -> Result<Octocrab> {
    let mut builder = Octocrab::builder();

    if let Some(token) = &config.token {
        builder = builder.personal_token(token.clone());
    }

    if let Some(api_url) = &config.api_url {
        builder = builder
            .base_uri(api_url.as_str())
            .with_context(|| format!("Invalid GitHub API URL: '{api_url}'"))?;
    }

    builder.build().context("Failed to create GitHub client")
}

/// [`Forge`] backed by GitHub's GraphQL API.
pub struct GitHub {
    client: Octocrab,
}

impl GitHub {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        setup_github_client(config).map(Self::new)
    }

    async fn run_query<T>(&self, query: &serde_json::Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response: GraphQLResponse<T> =
            self.client.graphql(query).await.map_err(into_api_error)?;
        into_data(response)
    }
}

#[async_trait]
impl Forge for GitHub {
    async fn viewer_login(&self) -> Result<String> {
        let data: ViewerData = self
            .run_query(&create_viewer_query())
            .await
            .context("Failed to resolve authenticated user")?;
        Ok(data.viewer.login)
    }

    async fn search_pull_requests(&self, query: &str) -> Result<SearchResults> {
        let data: SearchData = self
            .run_query(&create_search_query(query))
            .await
            .with_context(|| format!("Search failed for query '{query}'"))?;
        Ok(data.search)
    }

    async fn pull_request_detail(
        &self,
        owner: &str,
        name: &str,
        number: u64,
    ) -> Result<Option<GraphQLPullRequestDetail>> {
        debug!("Fetching review state for {owner}/{name}#{number}");

        let data: PullRequestDetailData = self
            .run_query(&create_pull_request_detail_query(owner, name, number))
            .await
            .with_context(|| format!("Failed to fetch {owner}/{name}#{number}"))?;

        Ok(data.repository.and_then(|repo| repo.pull_request))
    }
}
