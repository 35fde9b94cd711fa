pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::obstacle_builder::*;

pub mod obstacle_builder {

    use super::*;
    use crate::{geometry::*, id::*, obstacle::*, review::*, time::*};

    #[derive(Debug)]
    pub struct ObstacleBuild {
        obstacle: Obstacle,
    }

    impl ObstacleBuild {
        pub fn id(mut self, id: i64) -> Self {
            self.obstacle.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.obstacle.name = name.into();
            self
        }
        pub fn description(mut self, desc: Option<&str>) -> Self {
            self.obstacle.description = desc.map(Into::into);
            self
        }
        pub fn geometry(mut self, geometry: &str) -> Self {
            self.obstacle.geometry = geometry.parse().unwrap();
            self
        }
        pub fn height_m(mut self, height_m: Option<u32>) -> Self {
            self.obstacle.height_m = height_m;
            self
        }
        pub fn state(mut self, state: ObstacleState) -> Self {
            self.obstacle.is_draft = state.is_draft();
            self.obstacle.review_status = state.review_status();
            self
        }
        pub fn created_by(mut self, user_id: Option<&str>) -> Self {
            self.obstacle.created_by = user_id.map(Into::into);
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.obstacle.created_at = created_at;
            self
        }
        pub fn finish(self) -> Obstacle {
            self.obstacle
        }
    }

    impl Builder for Obstacle {
        type Build = ObstacleBuild;
        fn build() -> Self::Build {
            let geometry: Geometry = r#"{"type":"Point","coordinates":[10.4,63.4]}"#
                .parse()
                .unwrap();
            ObstacleBuild {
                obstacle: Obstacle {
                    id: ObstacleId::new(1),
                    geometry,
                    name: "Mast".into(),
                    description: None,
                    height_m: Some(15),
                    is_draft: true,
                    review_status: None,
                    review_comment: None,
                    created_by: None,
                    assigned_to: None,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}
