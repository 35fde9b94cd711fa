use super::prelude::*;

/// Load a single obstacle if the caller is allowed to see it.
///
/// With [`AccessPolicy::Authenticated`] only the owner and reviewers
/// may see an obstacle. Everyone else gets `NotOwnedOrMissing` for
/// both foreign and missing obstacles.
pub fn get_obstacle<R>(
    repo: &R,
    auth: &AuthContext,
    policy: AccessPolicy,
    id: ObstacleId,
) -> Result<Obstacle>
where
    R: ObstacleRepo + ?Sized,
{
    match policy {
        AccessPolicy::Open => Ok(repo.get_obstacle(id)?),
        AccessPolicy::Authenticated => {
            let user_id = auth.user_id().ok_or(Error::Unauthorized)?;
            if auth.is_reviewer() {
                return Ok(repo.get_obstacle(id)?);
            }
            match repo.get_obstacle(id) {
                Ok(obstacle) if obstacle.is_owned_by(user_id) => Ok(obstacle),
                Ok(_) | Err(RepoError::NotFound) => Err(RepoError::NotOwnedOrMissing.into()),
                Err(err) => Err(err.into()),
            }
        }
    }
}

/// List obstacles visible to the caller, newest first.
pub fn list_obstacles<R>(
    repo: &R,
    auth: &AuthContext,
    policy: AccessPolicy,
    query: ObstacleQuery,
) -> Result<Vec<ObstacleSummary>>
where
    R: ObstacleRepo + ?Sized,
{
    let query = match policy {
        AccessPolicy::Open => query,
        AccessPolicy::Authenticated => {
            let user_id = auth.user_id().ok_or(Error::Unauthorized)?;
            if auth.is_reviewer() {
                query
            } else {
                query.owned_by(user_id.clone())
            }
        }
    };
    Ok(repo.list_obstacles(&query)?)
}
