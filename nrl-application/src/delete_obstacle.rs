use super::*;

pub fn delete_obstacle(
    connections: &sqlite::Connections,
    auth: &AuthContext,
    id: ObstacleId,
) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_obstacle(conn, auth, id).map_err(|err| {
            warn!("Failed to delete obstacle {}: {}", id, err);
            err
        })
    })?)
}
