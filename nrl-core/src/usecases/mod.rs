mod capture_geometry;
mod delete_obstacle;
mod error;
mod load_obstacles;
mod review_obstacle;
mod submit_obstacle;
mod update_obstacle;

#[cfg(test)]
pub mod tests;

pub use self::{
    capture_geometry::*, delete_obstacle::*, error::Error, load_obstacles::*, review_obstacle::*,
    submit_obstacle::*, update_obstacle::*,
};

pub use crate::util::validate::{MetadataField, MetadataInvalidation, ObstacleMetadata};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::draft::*, repositories::*, DraftStoreError, RepoError};
}
