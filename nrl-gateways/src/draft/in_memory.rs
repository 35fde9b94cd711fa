use std::collections::HashMap;

use nrl_core::{
    entities::{Geometry, SessionId},
    gateways::draft::DraftGeometryStore,
    DraftStoreError,
};
use parking_lot::{RwLock, RwLockWriteGuard};

/// Keeps drafts in process memory, e.g. for a long running server
/// that owns all sessions.
#[derive(Debug, Default)]
pub struct InMemoryDraftStore(RwLock<HashMap<SessionId, Geometry>>);

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    fn write(&self) -> RwLockWriteGuard<HashMap<SessionId, Geometry>> {
        self.0.write()
    }
}

impl DraftGeometryStore for InMemoryDraftStore {
    fn save_geometry(
        &self,
        session: &SessionId,
        geometry: Geometry,
    ) -> Result<(), DraftStoreError> {
        self.write().insert(session.clone(), geometry);
        Ok(())
    }

    fn load_geometry(&self, session: &SessionId) -> Option<Geometry> {
        self.0.read().get(session).cloned()
    }

    fn clear(&self, session: &SessionId) -> Result<(), DraftStoreError> {
        if self.write().remove(session).is_some() {
            log::debug!("Cleared draft geometry of session {session}");
        }
        Ok(())
    }
}
