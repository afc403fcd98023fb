//! approved-prs: lists your open pull requests that are approved but not
//! yet merged.
//!
//! Resolves the authenticated GitHub user, searches their open pull
//! requests (optionally within one organization), checks each one's merge
//! state and approved reviews, and returns the ones ready to land.

pub mod approval;
pub mod config;
pub mod github;
pub mod graphql;
pub mod query;
pub mod search;
pub mod types;

pub use approval::{check_approval, classify};
pub use config::Config;
pub use github::{
    AUTHENTICATION_HINT, ApiStatusError, GitHub, describe_failure, is_authentication_error,
};
pub use query::find_approved_pull_requests;
pub use search::{build_author_search_query, fetch_open_pull_requests};
pub use types::{
    ApprovalStatus, Forge, GraphQLOwner, GraphQLPullRequestDetail, GraphQLRepository,
    GraphQLReviewConnection, GraphQLSearchNode, PullRequestSummary, ReportEntry, SearchResults,
};
