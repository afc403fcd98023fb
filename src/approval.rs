use tracing::{debug, warn};

use crate::types::{ApprovalStatus, Forge, GraphQLPullRequestDetail, PullRequestSummary};

/// Classifies a pull request's review state. A pull request that did not
/// resolve counts as not approved.
///
/// Any APPROVED review is enough; later CHANGES_REQUESTED reviews are not
/// taken into account.
pub fn classify(detail: Option<&GraphQLPullRequestDetail>) -> ApprovalStatus {
    match detail {
        Some(pr) if !pr.merged && pr.reviews.total_count > 0 => ApprovalStatus::Approved {
            approvals: pr.reviews.total_count,
        },
        _ => ApprovalStatus::NotApproved,
    }
}

/// Fetches and classifies the review state of one pull request.
///
/// Never fails: an error from the forge is logged and returned as
/// [`ApprovalStatus::Failed`].
pub async fn check_approval<F>(forge: &F, pr: &PullRequestSummary) -> ApprovalStatus
where
    F: Forge + Sync,
{
    match forge
        .pull_request_detail(&pr.repo_owner, &pr.repo_name, pr.number)
        .await
    {
        Ok(detail) => {
            if detail.is_none() {
                debug!("{} did not resolve", pr.reference());
            }
            classify(detail.as_ref())
        }
        Err(err) => {
            warn!("Error checking approval status for {}: {err:#}", pr.reference());
            ApprovalStatus::Failed(err)
        }
    }
}
