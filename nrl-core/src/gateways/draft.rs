use crate::entities::{Geometry, SessionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid session id '{0}'")]
    InvalidSession(SessionId),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Session-scoped storage for the geometry drawn in the first wizard step.
///
/// Values are never shared between sessions and never outlive the session.
/// Reading a session without stored geometry is not an error, it only means
/// that the wizard has not been completed yet.
pub trait DraftGeometryStore {
    /// Stores the geometry, replacing any previous value of the session.
    fn save_geometry(&self, session: &SessionId, geometry: Geometry) -> Result<()>;

    /// Unreadable values are reported as missing.
    fn load_geometry(&self, session: &SessionId) -> Option<Geometry>;

    /// Removing nothing is not an error.
    fn clear(&self, session: &SessionId) -> Result<()>;
}
