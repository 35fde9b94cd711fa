#[macro_use]
extern crate log;

mod capture_geometry;
mod delete_obstacle;
mod load_obstacles;
mod review_obstacle;
mod submit_obstacle;
mod update_obstacle;

pub mod prelude {
    pub use super::{
        capture_geometry::*, delete_obstacle::*, load_obstacles::*, review_obstacle::*,
        submit_obstacle::*, update_obstacle::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use nrl_core::{
    entities::*, gateways::draft::DraftGeometryStore, repositories::ObstacleQuery, usecases,
};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use nrl_db_sqlite::Connections;
}
