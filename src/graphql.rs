use anyhow::{Result, bail};

use crate::types::*;

const VIEWER_QUERY: &str = r#"
    query {
        viewer {
            login
        }
    }
"#;

const SEARCH_QUERY: &str = r#"
    query($query: String!, $first: Int!) {
        search(query: $query, type: ISSUE, first: $first) {
            issueCount
            nodes {
                ... on PullRequest {
                    number
                    title
                    url
                    createdAt
                    updatedAt
                    repository {
                        nameWithOwner
                        name
                        owner {
                            login
                        }
                    }
                }
            }
        }
    }
"#;

const PULL_REQUEST_DETAIL_QUERY: &str = r#"
    query($owner: String!, $name: String!, $number: Int!, $first: Int!) {
        repository(owner: $owner, name: $name) {
            pullRequest(number: $number) {
                merged
                reviews(states: APPROVED, first: $first) {
                    totalCount
                }
            }
        }
    }
"#;

pub fn create_viewer_query() -> serde_json::Value {
    serde_json::json!({ "query": VIEWER_QUERY })
}

pub fn create_search_query(search_query: &str) -> serde_json::Value {
    serde_json::json!({
        "query": SEARCH_QUERY,
        "variables": {
            "query": search_query,
            "first": PAGE_SIZE,
        }
    })
}

pub fn create_pull_request_detail_query(owner: &str, name: &str, number: u64) -> serde_json::Value {
    serde_json::json!({
        "query": PULL_REQUEST_DETAIL_QUERY,
        "variables": {
            "owner": owner,
            "name": name,
            "number": number,
            "first": PAGE_SIZE,
        }
    })
}

/// Unwraps a GraphQL envelope, turning a non-empty `errors` array into an
/// error that carries every message.
pub fn into_data<T>(response: GraphQLResponse<T>) -> Result<T> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response
            .errors
            .iter()
            .map(|err| err.message.as_str())
            .collect();
        bail!("GraphQL query failed: {}", messages.join("; "));
    }

    match response.data {
        Some(data) => Ok(data),
        None => bail!("GraphQL response contained no data"),
    }
}

/// Converts a search hit into a summary. Returns `None` for nodes without a
/// repository or that are not the pull-request variant.
pub fn convert_search_node(node: GraphQLSearchNode) -> Option<PullRequestSummary> {
    let repository = node.repository?;

    Some(PullRequestSummary {
        number: node.number?,
        title: node.title?,
        url: node.url?,
        repo_full_name: repository.name_with_owner,
        repo_owner: repository.owner.login,
        repo_name: repository.name,
        created_at: node.created_at?,
        updated_at: node.updated_at?,
    })
}

pub fn convert_search_results(results: SearchResults) -> Vec<PullRequestSummary> {
    results
        .nodes
        .into_iter()
        .flatten()
        .filter_map(convert_search_node)
        .collect()
}
