use anyhow::Result;
use tracing::{debug, info};

use crate::{
    graphql::convert_search_results,
    types::{Forge, PullRequestSummary},
};

#[derive(Debug, Default)]
pub struct SearchQueryBuilder {
    terms: Vec<String>,
}

impl SearchQueryBuilder {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn pr_type(&mut self) -> &mut Self {
        self.terms.push("is:pr".to_string());
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.terms.push("is:open".to_string());
        self
    }

    pub fn author(&mut self, login: &str) -> &mut Self {
        self.terms.push(format!("author:{}", login));
        self
    }

    pub fn org(&mut self, org: &str) -> &mut Self {
        self.terms.push(format!("org:{}", org));
        self
    }

    pub fn build(&self) -> String {
        self.terms.join(" ")
    }
}

/// Search expression for open pull requests by `login`, optionally scoped
/// to one organization.
pub fn build_author_search_query(login: &str, organization: Option<&str>) -> String {
    let mut builder = SearchQueryBuilder::new();
    builder.pr_type().open().author(login);

    if let Some(org) = organization {
        builder.org(org);
    }

    builder.build()
}

/// Runs the author search and keeps the hits that are pull requests with a
/// repository. Only the first page is fetched.
pub async fn fetch_open_pull_requests<F>(
    forge: &F,
    login: &str,
    organization: Option<&str>,
) -> Result<Vec<PullRequestSummary>>
where
    F: Forge + Sync,
{
    let query = build_author_search_query(login, organization);
    info!("Searching with query: {query}");

    let results = forge.search_pull_requests(&query).await?;
    let issue_count = results.issue_count;
    let prs = convert_search_results(results);

    info!("Found {} open PR(s)", prs.len());
    if issue_count > prs.len() as u64 {
        debug!(
            "Search matched {issue_count} issue(s); {} were usable on the first page",
            prs.len()
        );
    }

    Ok(prs)
}
