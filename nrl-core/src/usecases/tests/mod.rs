use super::prelude::*;
use crate::util::validate::ObstacleMetadata;

use anyhow::anyhow;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    result,
};

type RepoResult<T> = result::Result<T, RepoError>;

pub const POINT: &str = r#"{"type":"Point","coordinates":[10.4,63.4]}"#;

pub fn metadata(name: &str, height_value: f64, height_unit: HeightUnit) -> ObstacleMetadata {
    ObstacleMetadata {
        name: name.into(),
        description: None,
        height_value: Some(height_value),
        height_unit,
    }
}

pub fn drafts_with_point() -> (MockDraftStore, SessionId) {
    let drafts = MockDraftStore::default();
    let session = SessionId::new();
    drafts.save_geometry(&session, POINT.parse().unwrap()).unwrap();
    (drafts, session)
}

#[derive(Default)]
pub struct MockDraftStore {
    geometries: RefCell<HashMap<SessionId, Geometry>>,
    pub fail_writes: Cell<bool>,
}

impl MockDraftStore {
    fn check_writes(&self) -> result::Result<(), DraftStoreError> {
        if self.fail_writes.get() {
            return Err(anyhow!("no space left on device").into());
        }
        Ok(())
    }
}

impl DraftGeometryStore for MockDraftStore {
    fn save_geometry(
        &self,
        session: &SessionId,
        geometry: Geometry,
    ) -> result::Result<(), DraftStoreError> {
        self.check_writes()?;
        self.geometries
            .borrow_mut()
            .insert(session.clone(), geometry);
        Ok(())
    }

    fn load_geometry(&self, session: &SessionId) -> Option<Geometry> {
        self.geometries.borrow().get(session).cloned()
    }

    fn clear(&self, session: &SessionId) -> result::Result<(), DraftStoreError> {
        self.check_writes()?;
        self.geometries.borrow_mut().remove(session);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockDb {
    pub obstacles: RefCell<Vec<Obstacle>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl MockDb {
    pub fn insert(&self, obstacle: Obstacle) {
        self.obstacles.borrow_mut().push(obstacle);
    }

    fn check_reads(&self) -> RepoResult<()> {
        if self.fail_reads.get() {
            return Err(anyhow!("database is not available").into());
        }
        Ok(())
    }

    fn check_writes(&self) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(anyhow!("database is read-only").into());
        }
        Ok(())
    }
}

fn matches_query(query: &ObstacleQuery, obstacle: &Obstacle) -> bool {
    let ObstacleQuery {
        id,
        name,
        min_height_m,
        max_height_m,
        state,
        created_from,
        created_to,
        created_by,
    } = query;
    id.map_or(true, |id| obstacle.id == id)
        && name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or(true, |name| {
                obstacle.name.to_lowercase().contains(&name.to_lowercase())
            })
        && min_height_m.map_or(true, |min| obstacle.height_m.is_some_and(|h| h >= min))
        && max_height_m.map_or(true, |max| obstacle.height_m.is_some_and(|h| h <= max))
        && state.map_or(true, |state| obstacle.state() == state)
        && created_from.map_or(true, |from| obstacle.created_at >= from)
        && created_to.map_or(true, |to| obstacle.created_at <= to)
        && created_by
            .as_ref()
            .map_or(true, |user_id| obstacle.is_owned_by(user_id))
}

impl ObstacleRepo for MockDb {
    fn create_obstacle(&self, new_obstacle: &NewObstacle) -> RepoResult<ObstacleId> {
        self.check_writes()?;
        let NewObstacle {
            geometry,
            name,
            description,
            height_m,
            is_draft,
            review_status,
            created_by,
            created_at,
        } = new_obstacle.clone();
        let id = self
            .obstacles
            .borrow()
            .iter()
            .map(|o| o.id.to_inner())
            .max()
            .unwrap_or_default()
            + 1;
        let id = ObstacleId::new(id);
        self.insert(Obstacle {
            id,
            geometry,
            name,
            description,
            height_m: Some(height_m),
            is_draft,
            review_status,
            review_comment: None,
            created_by,
            assigned_to: None,
            created_at,
        });
        Ok(id)
    }

    fn get_obstacle(&self, id: ObstacleId) -> RepoResult<Obstacle> {
        self.check_reads()?;
        self.obstacles
            .borrow()
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn list_obstacles(&self, query: &ObstacleQuery) -> RepoResult<Vec<ObstacleSummary>> {
        self.check_reads()?;
        let mut obstacles: Vec<_> = self
            .obstacles
            .borrow()
            .iter()
            .filter(|o| matches_query(query, o))
            .cloned()
            .map(ObstacleSummary::from)
            .collect();
        obstacles.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(obstacles)
    }

    fn count_obstacles(&self) -> RepoResult<usize> {
        self.check_reads()?;
        Ok(self.obstacles.borrow().len())
    }

    fn update_owned_obstacle(
        &self,
        id: ObstacleId,
        owner: &UserId,
        update: &ObstacleUpdate,
    ) -> RepoResult<()> {
        self.check_writes()?;
        let mut obstacles = self.obstacles.borrow_mut();
        let obstacle = obstacles
            .iter_mut()
            .find(|o| o.id == id && o.is_owned_by(owner) && o.is_draft)
            .ok_or(RepoError::NotOwnedOrMissing)?;
        if let Some(geometry) = &update.geometry {
            obstacle.geometry = geometry.clone();
        }
        obstacle.name = update.name.clone();
        obstacle.description = update.description.clone();
        obstacle.height_m = Some(update.height_m);
        obstacle.is_draft = update.is_draft;
        obstacle.review_status = update.review_status;
        Ok(())
    }

    fn delete_owned_obstacle(&self, id: ObstacleId, owner: &UserId) -> RepoResult<()> {
        self.check_writes()?;
        let mut obstacles = self.obstacles.borrow_mut();
        let len_before = obstacles.len();
        obstacles.retain(|o| !(o.id == id && o.is_owned_by(owner) && o.is_draft));
        if obstacles.len() == len_before {
            return Err(RepoError::NotOwnedOrMissing);
        }
        Ok(())
    }

    fn set_review_status(&self, id: ObstacleId, review: &ReviewAction) -> RepoResult<()> {
        self.check_writes()?;
        let mut obstacles = self.obstacles.borrow_mut();
        let obstacle = obstacles
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepoError::NotFound)?;
        obstacle.review_status = Some(review.status);
        obstacle.review_comment = review.comment.clone();
        obstacle.assigned_to = Some(review.reviewer.clone());
        Ok(())
    }
}

#[test]
fn clearing_the_draft_store_twice_is_a_no_op() {
    let (drafts, session) = drafts_with_point();
    drafts.clear(&session).unwrap();
    assert!(drafts.load_geometry(&session).is_none());
    drafts.clear(&session).unwrap();
    assert!(drafts.load_geometry(&session).is_none());
}
