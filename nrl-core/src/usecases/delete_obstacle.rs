use super::prelude::*;

/// Delete a draft of the calling user.
///
/// Fails with `NotOwnedOrMissing` without revealing whether the obstacle exists.
pub fn delete_obstacle<R>(repo: &R, auth: &AuthContext, id: ObstacleId) -> Result<()>
where
    R: ObstacleRepo + ?Sized,
{
    let owner = auth.user_id().ok_or(Error::Unauthorized)?;
    repo.delete_owned_obstacle(id, owner)?;
    log::info!("Deleted obstacle {id}");
    Ok(())
}
