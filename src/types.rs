use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Fixed page size for both the search and the per-PR review lookup.
pub const PAGE_SIZE: u32 = 100;

/// Open pull request returned by the author search.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestSummary {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub repo_full_name: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PullRequestSummary {
    /// Short `owner/repo#number` reference.
    pub fn reference(&self) -> String {
        format!("{}#{}", self.repo_full_name, self.number)
    }
}

/// Outcome of checking a single pull request for approvals.
///
/// A failed detail query is carried as a value rather than propagated so
/// one bad pull request never aborts the run.
#[derive(Debug)]
pub enum ApprovalStatus {
    Approved { approvals: u64 },
    NotApproved,
    Failed(anyhow::Error),
}

impl ApprovalStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalStatus::Approved { .. })
    }
}

/// A pull request that made it into the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub repo_full_name: String,
    pub approvals: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportEntry {
    pub fn new(pr: PullRequestSummary, approvals: u64) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            repo_full_name: pr.repo_full_name,
            approvals,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
        }
    }

    pub fn reference(&self) -> String {
        format!("{}#{}", self.repo_full_name, self.number)
    }
}

/// The three GraphQL round-trips the pipeline needs from a code forge.
///
/// Implementations return wire-level data; filtering and classification
/// happen in the callers so they behave the same against any backend.
#[async_trait]
pub trait Forge {
    /// Login of the authenticated principal.
    async fn viewer_login(&self) -> Result<String>;

    /// Runs an issue search and returns the raw result nodes.
    async fn search_pull_requests(&self, query: &str) -> Result<SearchResults>;

    /// Merge state and approved-review count for one pull request, or
    /// `None` when the repository or pull request does not resolve.
    async fn pull_request_detail(
        &self,
        owner: &str,
        name: &str,
        number: u64,
    ) -> Result<Option<GraphQLPullRequestDetail>>;
}

/// Standard GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: GraphQLViewer,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLViewer {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchResults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub issue_count: u64,
    pub nodes: Vec<Option<GraphQLSearchNode>>,
}

/// A search hit. Every field is optional because nodes that are not pull
/// requests come back as empty objects.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLSearchNode {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub repository: Option<GraphQLRepository>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRepository {
    pub name_with_owner: String,
    pub name: String,
    pub owner: GraphQLOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLOwner {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestDetailData {
    pub repository: Option<GraphQLRepositoryDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRepositoryDetail {
    pub pull_request: Option<GraphQLPullRequestDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLPullRequestDetail {
    pub merged: bool,
    pub reviews: GraphQLReviewConnection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLReviewConnection {
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_node_tolerates_non_pr_variant() {
        let json = r#"{"issueCount": 2, "nodes": [{}, null]}"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();

        assert_eq!(results.issue_count, 2);
        assert_eq!(results.nodes.len(), 2);
        assert!(results.nodes[0].as_ref().unwrap().number.is_none());
        assert!(results.nodes[1].is_none());
    }

    #[test]
    fn test_detail_with_missing_pull_request() {
        let json = r#"{"repository": {"pullRequest": null}}"#;
        let data: PullRequestDetailData = serde_json::from_str(json).unwrap();

        assert!(data.repository.unwrap().pull_request.is_none());
    }

    #[test]
    fn test_envelope_collects_errors() {
        let json = r#"{
            "data": {"repository": null},
            "errors": [{"type": "NOT_FOUND", "message": "Could not resolve to a Repository"}]
        }"#;
        let response: GraphQLResponse<PullRequestDetailData> = serde_json::from_str(json).unwrap();

        assert!(response.data.unwrap().repository.is_none());
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].kind.as_deref(), Some("NOT_FOUND"));
    }
}
