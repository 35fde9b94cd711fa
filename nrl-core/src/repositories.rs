// Low-level database access traits.
//
// Each repository is responsible for a single entity.
// Ownership and role checks that can be expressed as a
// query predicate belong here, everything else is decided
// by the use cases.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    // Either missing or owned by someone else, indistinguishable
    // for the caller.
    #[error("The requested object does not exist or is not owned by you")]
    NotOwnedOrMissing,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewObstacle {
    pub geometry: Geometry,
    pub name: String,
    pub description: Option<String>,
    pub height_m: u32,
    pub is_draft: bool,
    pub review_status: Option<ReviewStatus>,
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
}

/// Replaces the user-editable fields of an owned draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleUpdate {
    /// `None` keeps the stored geometry.
    pub geometry: Option<Geometry>,
    pub name: String,
    pub description: Option<String>,
    pub height_m: u32,
    pub is_draft: bool,
    pub review_status: Option<ReviewStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAction {
    pub status: ReviewStatus,
    pub comment: Option<String>,
    pub reviewer: UserId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleQuery {
    pub id: Option<ObstacleId>,
    // Case-insensitive substring
    pub name: Option<String>,
    pub min_height_m: Option<u32>,
    pub max_height_m: Option<u32>,
    pub state: Option<ObstacleState>,
    pub created_from: Option<Timestamp>, // inclusive
    pub created_to: Option<Timestamp>,   // inclusive
    pub created_by: Option<UserId>,
}

impl ObstacleQuery {
    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.created_by = Some(user_id);
        self
    }
}

pub trait ObstacleRepo {
    fn create_obstacle(&self, obstacle: &NewObstacle) -> Result<ObstacleId>;

    fn get_obstacle(&self, id: ObstacleId) -> Result<Obstacle>;

    // Newest first, i.e. ordered by id in descending order
    fn list_obstacles(&self, query: &ObstacleQuery) -> Result<Vec<ObstacleSummary>>;
    fn count_obstacles(&self) -> Result<usize>;

    // Only drafts created by the given owner are affected.
    // Err(NotOwnedOrMissing) => Nothing has been modified
    fn update_owned_obstacle(
        &self,
        id: ObstacleId,
        owner: &UserId,
        update: &ObstacleUpdate,
    ) -> Result<()>;
    fn delete_owned_obstacle(&self, id: ObstacleId, owner: &UserId) -> Result<()>;

    // Independent of the owner.
    // Err(NotFound) => Nothing has been modified
    fn set_review_status(&self, id: ObstacleId, review: &ReviewAction) -> Result<()>;
}
