use crate::{geometry::*, id::*, review::*, time::*};

/// A registered aviation obstacle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub geometry: Geometry,
    pub name: String,
    pub description: Option<String>,
    /// Height in whole meters. Only legacy records may lack it.
    pub height_m: Option<u32>,
    pub is_draft: bool,
    pub review_status: Option<ReviewStatus>,
    pub review_comment: Option<String>,
    pub created_by: Option<UserId>,
    pub assigned_to: Option<UserId>,
    pub created_at: Timestamp,
}

impl Obstacle {
    pub fn state(&self) -> ObstacleState {
        ObstacleState::new(self.is_draft, self.review_status)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.created_by.as_ref() == Some(user_id)
    }
}

// Everything needed for list views, i.e. without the geometry and the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleSummary {
    pub id: ObstacleId,
    pub name: String,
    pub height_m: Option<u32>,
    pub is_draft: bool,
    pub review_status: Option<ReviewStatus>,
    pub review_comment: Option<String>,
    pub created_by: Option<UserId>,
    pub assigned_to: Option<UserId>,
    pub created_at: Timestamp,
}

impl ObstacleSummary {
    pub fn state(&self) -> ObstacleState {
        ObstacleState::new(self.is_draft, self.review_status)
    }
}

impl From<Obstacle> for ObstacleSummary {
    fn from(from: Obstacle) -> Self {
        let Obstacle {
            id,
            geometry: _,
            name,
            description: _,
            height_m,
            is_draft,
            review_status,
            review_comment,
            created_by,
            assigned_to,
            created_at,
        } = from;
        Self {
            id,
            name,
            height_m,
            is_draft,
            review_status,
            review_comment,
            created_by,
            assigned_to,
            created_at,
        }
    }
}
