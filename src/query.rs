use anyhow::Result;
use tracing::{debug, info};

use crate::{
    approval::check_approval,
    config::Config,
    search::fetch_open_pull_requests,
    types::{ApprovalStatus, Forge, ReportEntry},
};

/// Finds the viewer's open pull requests that are approved but not merged.
///
/// Identity and search failures abort the run. Each pull request is then
/// checked in turn; a failed check only drops that pull request.
pub async fn find_approved_pull_requests<F>(config: &Config, forge: &F) -> Result<Vec<ReportEntry>>
where
    F: Forge + Sync,
{
    let login = forge.viewer_login().await?;
    info!("Authenticated as {login}");

    let prs = fetch_open_pull_requests(forge, &login, config.organization.as_deref()).await?;

    let mut entries = Vec::new();
    let mut not_approved = 0;
    let mut failed = 0;

    for pr in prs {
        info!("Checking {}", pr.reference());
        match check_approval(forge, &pr).await {
            ApprovalStatus::Approved { approvals } => entries.push(ReportEntry::new(pr, approvals)),
            ApprovalStatus::NotApproved => not_approved += 1,
            ApprovalStatus::Failed(_) => failed += 1,
        }
    }

    debug!(
        "{} approved, {not_approved} not approved, {failed} check(s) failed",
        entries.len()
    );

    Ok(entries)
}
