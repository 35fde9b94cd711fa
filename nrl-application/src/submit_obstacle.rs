use super::*;

/// Complete the metadata step of the wizard.
///
/// The drawn geometry is only discarded after the obstacle
/// has been stored successfully and vice versa.
pub fn submit_obstacle(
    connections: &sqlite::Connections,
    drafts: &dyn DraftGeometryStore,
    session: &SessionId,
    auth: &AuthContext,
    policy: AccessPolicy,
    metadata: usecases::ObstacleMetadata,
    intent: usecases::SubmissionIntent,
) -> Result<usecases::Submission> {
    let new_obstacle =
        usecases::prepare_new_obstacle(drafts, session, auth, policy, metadata, intent)?;
    let stored = connections.exclusive()?.transaction(|conn| {
        let id = usecases::store_new_obstacle(conn, &new_obstacle).map_err(|err| {
            warn!("Failed to store new obstacle: {}", err);
            err
        })?;
        usecases::complete_submission(drafts, session, id, &new_obstacle)
    });
    stored.map_err(|err| {
        // The commit might have failed after clearing the geometry
        if drafts.load_geometry(session).is_none() {
            if let Err(err) = drafts.save_geometry(session, new_obstacle.geometry.clone()) {
                error!("Failed to restore the geometry of session {session}: {err}");
            }
        }
        err.into()
    })
}
