pub mod prelude {

    pub const POINT: &str = r#"{"type":"Point","coordinates":[10.4,63.4]}"#;

    pub fn metadata(
        name: &str,
        height_value: f64,
        height_unit: HeightUnit,
    ) -> usecases::ObstacleMetadata {
        usecases::ObstacleMetadata {
            name: name.into(),
            description: None,
            height_value: Some(height_value),
            height_unit,
        }
    }

    pub use nrl_core::{
        entities::*,
        gateways::draft::DraftGeometryStore,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError, ErrorKind},
        prelude as flows,
    };

    use nrl_gateways::draft::InMemoryDraftStore;

    /// Fails to clear any session.
    #[derive(Default)]
    pub struct UnclearableDraftStore(InMemoryDraftStore);

    impl DraftGeometryStore for UnclearableDraftStore {
        fn save_geometry(
            &self,
            session: &SessionId,
            geometry: Geometry,
        ) -> Result<(), nrl_core::DraftStoreError> {
            self.0.save_geometry(session, geometry)
        }

        fn load_geometry(&self, session: &SessionId) -> Option<Geometry> {
            self.0.load_geometry(session)
        }

        fn clear(&self, _session: &SessionId) -> Result<(), nrl_core::DraftStoreError> {
            Err(anyhow::anyhow!("permission denied").into())
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub drafts: InMemoryDraftStore,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            nrl_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self {
                db_connections,
                drafts: InMemoryDraftStore::new(),
            }
        }

        /// Complete the first wizard step in a new session.
        pub fn draw(&self, geo_json: &str) -> SessionId {
            let session = SessionId::new();
            flows::capture_geometry(&self.drafts, &session, geo_json).unwrap();
            session
        }

        pub fn create_obstacle(&self, owner: &str, intent: usecases::SubmissionIntent) -> ObstacleId {
            let session = self.draw(POINT);
            flows::submit_obstacle(
                &self.db_connections,
                &self.drafts,
                &session,
                &AuthContext::user(owner),
                AccessPolicy::Authenticated,
                metadata("Mast", 15.0, HeightUnit::Meters),
                intent,
            )
            .unwrap()
            .id
        }

        pub fn get_obstacle(&self, id: ObstacleId) -> Obstacle {
            self.db_connections
                .shared()
                .unwrap()
                .get_obstacle(id)
                .unwrap()
        }

        pub fn count_obstacles(&self) -> usize {
            self.db_connections
                .shared()
                .unwrap()
                .count_obstacles()
                .unwrap()
        }
    }
}
