use strum::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

/// Review status of a submitted obstacle.
///
/// Drafts have no review status at all.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

/// Lifecycle state of an obstacle, combining the draft flag and the review status.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ObstacleState {
    Draft,
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    pub const fn status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("An obstacle in state {from} cannot be reviewed")]
pub struct InvalidReviewTransition {
    pub from: ObstacleState,
}

impl ObstacleState {
    /// Derive the state from the persisted columns.
    ///
    /// A record that is not a draft but lacks a review status
    /// predates the review workflow and is treated as pending.
    pub fn new(is_draft: bool, review_status: Option<ReviewStatus>) -> Self {
        if is_draft {
            return Self::Draft;
        }
        match review_status {
            None | Some(ReviewStatus::Pending) => Self::Pending,
            Some(ReviewStatus::Approved) => Self::Approved,
            Some(ReviewStatus::Rejected) => Self::Rejected,
        }
    }

    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// The review status column that belongs to this state.
    pub const fn review_status(self) -> Option<ReviewStatus> {
        match self {
            Self::Draft => None,
            Self::Pending => Some(ReviewStatus::Pending),
            Self::Approved => Some(ReviewStatus::Approved),
            Self::Rejected => Some(ReviewStatus::Rejected),
        }
    }

    /// `Draft -> Pending`, the only transition an owner may trigger.
    ///
    /// Submitting something that has already been submitted keeps its state.
    pub const fn submit(self) -> Self {
        match self {
            Self::Draft => Self::Pending,
            other => other,
        }
    }

    /// `Pending -> Approved | Rejected`. Everything else is rejected.
    pub fn review(self, decision: ReviewDecision) -> Result<Self, InvalidReviewTransition> {
        match self {
            Self::Pending => Ok(match decision {
                ReviewDecision::Approve => Self::Approved,
                ReviewDecision::Reject => Self::Rejected,
            }),
            from => Err(InvalidReviewTransition { from }),
        }
    }
}
