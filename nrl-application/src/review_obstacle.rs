use super::*;

pub fn review_obstacle(
    connections: &sqlite::Connections,
    auth: &AuthContext,
    id: ObstacleId,
    decision: ReviewDecision,
    comment: Option<&str>,
) -> Result<usecases::ReviewOutcome> {
    // Unprivileged callers must not wait for or block other writers
    usecases::authorize_review(auth)?;
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::review_obstacle(conn, auth, id, decision, comment).map_err(|err| {
            warn!("Failed to review obstacle {}: {}", id, err);
            err
        })
    })?)
}
