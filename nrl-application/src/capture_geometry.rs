use super::*;

pub fn capture_geometry(
    drafts: &dyn DraftGeometryStore,
    session: &SessionId,
    geo_json: &str,
) -> Result<usecases::WizardStep> {
    Ok(usecases::capture_geometry(drafts, session, geo_json)?)
}

pub fn enter_metadata_step(
    drafts: &dyn DraftGeometryStore,
    session: &SessionId,
) -> usecases::WizardStep {
    let step = usecases::enter_metadata_step(drafts, session);
    if step == usecases::WizardStep::AwaitingGeometry {
        debug!("No geometry drawn in session {session}, returning to the map");
    }
    step
}

pub fn abandon_submission(drafts: &dyn DraftGeometryStore, session: &SessionId) -> Result<()> {
    Ok(usecases::abandon_submission(drafts, session)?)
}
