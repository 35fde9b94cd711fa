pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use nrl_entities::{
        authorization::*, geometry::*, height::*, id::*, obstacle::*, review::*, session::*,
        time::*,
    };
}

pub use self::{gateways::draft::Error as DraftStoreError, repositories::Error as RepoError};
