use super::prelude::*;

/// Steps of the submission wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    AwaitingGeometry,
    AwaitingMetadata,
    Submitted,
}

/// Complete the first wizard step by storing the drawn geometry.
///
/// Returns the step to continue with.
pub fn capture_geometry<D>(drafts: &D, session: &SessionId, geo_json: &str) -> Result<WizardStep>
where
    D: DraftGeometryStore + ?Sized,
{
    let geometry = geo_json.parse::<Geometry>().map_err(|err| {
        log::debug!("Rejected geometry of session {session}: {err}");
        err
    })?;
    drafts.save_geometry(session, geometry)?;
    Ok(WizardStep::AwaitingMetadata)
}

/// Decide whether the metadata step can be shown or the user
/// has to be sent back to draw a geometry first.
pub fn enter_metadata_step<D>(drafts: &D, session: &SessionId) -> WizardStep
where
    D: DraftGeometryStore + ?Sized,
{
    if drafts.load_geometry(session).is_some() {
        WizardStep::AwaitingMetadata
    } else {
        WizardStep::AwaitingGeometry
    }
}

pub fn abandon_submission<D>(drafts: &D, session: &SessionId) -> Result<()>
where
    D: DraftGeometryStore + ?Sized,
{
    log::debug!("Abandoning submission of session {session}");
    Ok(drafts.clear(session)?)
}
