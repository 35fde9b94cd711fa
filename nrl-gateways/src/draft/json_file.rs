use std::{io, path::Path};

use anyhow::anyhow;
use jfs::Store;
use nrl_core::{
    entities::{Geometry, SessionId},
    gateways::draft::DraftGeometryStore,
    DraftStoreError,
};
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, DraftStoreError>;

/// Keeps one JSON file per session in a directory.
///
/// Used by the command line frontend where every invocation
/// is a separate process.
pub struct JsonFileDraftStore {
    json_store: Store,
}

impl JsonFileDraftStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonDraft {
    geo_json: String,
}

// Session ids are used as file names.
fn file_key(session: &SessionId) -> Result<&str> {
    if !session.is_valid() {
        return Err(DraftStoreError::InvalidSession(session.clone()));
    }
    Ok(session.as_str())
}

impl DraftGeometryStore for JsonFileDraftStore {
    fn save_geometry(&self, session: &SessionId, geometry: Geometry) -> Result<()> {
        let key = file_key(session)?;
        let draft = JsonDraft {
            geo_json: geometry.into(),
        };
        self.json_store
            .save_with_id(&draft, key)
            .map_err(|err| anyhow!("Unable to save draft of session {session}: {err}"))?;
        Ok(())
    }

    fn load_geometry(&self, session: &SessionId) -> Option<Geometry> {
        let key = file_key(session)
            .inspect_err(|err| log::warn!("Unable to load draft: {err}"))
            .ok()?;
        let draft = match self.json_store.get::<JsonDraft>(key) {
            Ok(draft) => draft,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("Unable to load draft of session {session} from JSON file: {err}");
                return None;
            }
        };
        // The file might have been edited by hand
        draft
            .geo_json
            .parse()
            .inspect_err(|err| log::warn!("Discarding invalid draft of session {session}: {err}"))
            .ok()
    }

    fn clear(&self, session: &SessionId) -> Result<()> {
        let key = file_key(session)?;
        match self.json_store.delete(key) {
            Ok(()) => log::debug!("Cleared draft geometry of session {session}"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => (),
            Err(err) => {
                return Err(anyhow!("Unable to delete draft of session {session}: {err}").into());
            }
        }
        Ok(())
    }
}
