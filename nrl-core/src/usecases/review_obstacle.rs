use super::prelude::*;
use crate::util::validate::trimmed_non_empty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub id: ObstacleId,
    pub state: ObstacleState,
    pub comment: Option<String>,
}

impl ReviewOutcome {
    pub fn status_message(&self) -> &'static str {
        match self.state {
            ObstacleState::Approved => "The obstacle has been approved.",
            ObstacleState::Rejected => "The obstacle has been rejected.",
            ObstacleState::Draft | ObstacleState::Pending => "The obstacle has not been reviewed.",
        }
    }
}

/// Returns the reviewer if the caller may review obstacles at all.
pub fn authorize_review(auth: &AuthContext) -> Result<UserId> {
    let reviewer = auth.user_id().cloned().ok_or(Error::Unauthorized)?;
    if !auth.is_reviewer() {
        log::warn!("User {reviewer} is not allowed to review obstacles");
        return Err(Error::Forbidden);
    }
    Ok(reviewer)
}

/// Approve or reject a pending obstacle.
///
/// Only admins and approvers may review, independent of who owns the
/// obstacle. Roles are checked before anything is read or written.
/// Concurrent reviews are not coordinated, the last one wins.
pub fn review_obstacle<R>(
    repo: &R,
    auth: &AuthContext,
    id: ObstacleId,
    decision: ReviewDecision,
    comment: Option<&str>,
) -> Result<ReviewOutcome>
where
    R: ObstacleRepo + ?Sized,
{
    let reviewer = authorize_review(auth)?;
    let obstacle = repo.get_obstacle(id)?;
    let old_state = obstacle.state();
    let new_state = old_state.review(decision)?;
    let comment = trimmed_non_empty(comment);
    let review = ReviewAction {
        status: decision.status(),
        comment: comment.clone(),
        reviewer,
    };
    debug_assert_eq!(new_state.review_status(), Some(review.status));
    log::info!("Changing review status of obstacle {id} from {old_state} to {new_state}");
    repo.set_review_status(id, &review)?;
    Ok(ReviewOutcome {
        id,
        state: new_state,
        comment,
    })
}
