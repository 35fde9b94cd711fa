use super::*;

pub fn update_obstacle(
    connections: &sqlite::Connections,
    auth: &AuthContext,
    id: ObstacleId,
    update: usecases::UpdateObstacle,
) -> Result<ObstacleState> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::update_obstacle(conn, auth, id, update).map_err(|err| {
            warn!("Failed to update obstacle {}: {}", id, err);
            err
        })
    })?)
}
