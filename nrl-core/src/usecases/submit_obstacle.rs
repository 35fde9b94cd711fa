use super::prelude::*;
use crate::util::{
    height::normalize_height,
    validate::{AutoCorrect as _, ObstacleMetadata, Validate as _},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionIntent {
    /// Keep the obstacle private to its owner.
    Draft,
    /// Hand the obstacle over for review.
    Final,
}

impl SubmissionIntent {
    /// Interpret the submit button that has been pressed and
    /// the explicit "save as draft" checkbox.
    pub fn from_action(action: Option<&str>, save_as_draft: bool) -> Self {
        let draft_action = action.is_some_and(|action| action.trim().eq_ignore_ascii_case("draft"));
        if save_as_draft || draft_action {
            Self::Draft
        } else {
            Self::Final
        }
    }

    pub const fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// The state of a draft after it has been stored with this intent.
    pub const fn state(self) -> ObstacleState {
        match self {
            Self::Draft => ObstacleState::Draft,
            Self::Final => ObstacleState::Draft.submit(),
        }
    }
}

/// Outcome of a completed wizard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub id: ObstacleId,
    pub draft: bool,
}

/// Returns the owner of new obstacles.
pub fn authorize_creation(auth: &AuthContext, policy: AccessPolicy) -> Result<Option<UserId>> {
    let user_id = auth.user_id().cloned();
    match policy {
        AccessPolicy::Open => Ok(user_id),
        AccessPolicy::Authenticated => user_id.map(Some).ok_or(Error::Unauthorized),
    }
}

/// Merge the metadata with the geometry of the first step.
///
/// Nothing is stored or cleared. On failure the user can correct
/// the input and retry without drawing the geometry again.
pub fn prepare_new_obstacle<D>(
    drafts: &D,
    session: &SessionId,
    auth: &AuthContext,
    policy: AccessPolicy,
    metadata: ObstacleMetadata,
    intent: SubmissionIntent,
) -> Result<NewObstacle>
where
    D: DraftGeometryStore + ?Sized,
{
    let created_by = authorize_creation(auth, policy)?;
    let geometry = drafts
        .load_geometry(session)
        .ok_or(Error::GeometryMissing)?;
    metadata.validate()?;
    let ObstacleMetadata {
        name,
        description,
        height_value,
        height_unit,
    } = metadata.auto_correct();
    // Presence has been validated
    let height_m = normalize_height(height_value.unwrap_or_default(), height_unit);
    let state = intent.state();
    Ok(NewObstacle {
        geometry,
        name,
        description,
        height_m,
        is_draft: state.is_draft(),
        review_status: state.review_status(),
        created_by,
        created_at: Timestamp::now(),
    })
}

pub fn store_new_obstacle<R>(repo: &R, new_obstacle: &NewObstacle) -> Result<ObstacleId>
where
    R: ObstacleRepo + ?Sized,
{
    let id = repo.create_obstacle(new_obstacle)?;
    if new_obstacle.is_draft {
        log::info!("Saved obstacle {id} as draft");
    } else {
        log::info!("Submitted obstacle {id} for review");
    }
    Ok(id)
}

/// Finish the wizard after the obstacle has been stored.
///
/// Must succeed before the stored obstacle is committed. Otherwise
/// the geometry would remain and could be submitted twice.
pub fn complete_submission<D>(
    drafts: &D,
    session: &SessionId,
    id: ObstacleId,
    new_obstacle: &NewObstacle,
) -> Result<Submission>
where
    D: DraftGeometryStore + ?Sized,
{
    drafts.clear(session).inspect_err(|err| {
        log::warn!("Failed to clear the geometry of session {session} after storing obstacle {id}: {err}");
    })?;
    Ok(Submission {
        id,
        draft: new_obstacle.is_draft,
    })
}
