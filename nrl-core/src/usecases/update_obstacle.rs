use super::prelude::*;
use crate::util::{
    height::normalize_height,
    validate::{AutoCorrect as _, ObstacleMetadata, Validate as _},
};

use super::SubmissionIntent;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateObstacle {
    /// A newly drawn geometry or `None` to keep the current one.
    pub geo_json: Option<String>,
    pub metadata: ObstacleMetadata,
    pub intent: SubmissionIntent,
}

/// Let an owner edit one of their drafts and optionally submit it.
///
/// Uses the same validation as the submission wizard. Obstacles of
/// other users, obstacles that have already been submitted, and ids that
/// do not exist all result in the same `NotOwnedOrMissing` error.
pub fn update_obstacle<R>(
    repo: &R,
    auth: &AuthContext,
    id: ObstacleId,
    update: UpdateObstacle,
) -> Result<ObstacleState>
where
    R: ObstacleRepo + ?Sized,
{
    let owner = auth.user_id().ok_or(Error::Unauthorized)?;
    let UpdateObstacle {
        geo_json,
        metadata,
        intent,
    } = update;
    let geometry = geo_json.as_deref().map(str::parse::<Geometry>).transpose()?;
    metadata.validate()?;
    let ObstacleMetadata {
        name,
        description,
        height_value,
        height_unit,
    } = metadata.auto_correct();
    let state = intent.state();
    let update = ObstacleUpdate {
        geometry,
        name,
        description,
        // Presence has been validated
        height_m: normalize_height(height_value.unwrap_or_default(), height_unit),
        is_draft: state.is_draft(),
        review_status: state.review_status(),
    };
    repo.update_owned_obstacle(id, owner, &update)
        .map_err(|err| {
            log::debug!("Failed to update obstacle {id} of {owner}: {err}");
            err
        })?;
    log::info!("Updated obstacle {id} ({state})");
    Ok(state)
}
