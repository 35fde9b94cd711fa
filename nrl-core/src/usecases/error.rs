use crate::{
    entities::{GeometryParseError, InvalidReviewTransition},
    gateways::draft,
    repositories,
    util::validate::MetadataInvalidation,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryParseError),
    #[error("No geometry has been drawn yet")]
    GeometryMissing,
    #[error(transparent)]
    Metadata(#[from] MetadataInvalidation),
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("This is not allowed")]
    Forbidden,
    #[error(transparent)]
    ReviewTransition(#[from] InvalidReviewTransition),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Draft geometry storage failed: {0}")]
    DraftStore(#[from] draft::Error),
}

impl Error {
    /// Errors the user can fix by correcting the input.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Geometry(_) | Self::Metadata(_) | Self::DraftStore(draft::Error::InvalidSession(_))
        )
    }
}
