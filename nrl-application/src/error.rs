use nrl_core::{
    repositories::Error as RepoError, usecases::Error as ParameterError, DraftStoreError,
};
use thiserror::Error;

pub use nrl_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

/// Coarse classification for presenting errors to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input that can be corrected and resubmitted.
    Validation,
    /// The wizard has to start over with drawing a geometry.
    GeometryMissing,
    NotFound,
    NotOwnedOrMissing,
    Unauthorized,
    Forbidden,
    /// The obstacle is not in a state that permits the operation.
    InvalidState,
    /// Storage failed, nothing has been changed.
    Persistence,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Business(BError::Parameter(err)) => parameter_error_kind(err),
            Self::Business(BError::Repo(err)) => repo_error_kind(err),
            Self::Other(_) => ErrorKind::Persistence,
        }
    }
}

fn parameter_error_kind(err: &ParameterError) -> ErrorKind {
    match err {
        ParameterError::Geometry(_) | ParameterError::Metadata(_) => ErrorKind::Validation,
        ParameterError::GeometryMissing => ErrorKind::GeometryMissing,
        ParameterError::Unauthorized => ErrorKind::Unauthorized,
        ParameterError::Forbidden => ErrorKind::Forbidden,
        ParameterError::ReviewTransition(_) => ErrorKind::InvalidState,
        ParameterError::Repo(err) => repo_error_kind(err),
        ParameterError::DraftStore(DraftStoreError::InvalidSession(_)) => ErrorKind::Validation,
        ParameterError::DraftStore(DraftStoreError::Other(_)) => ErrorKind::Persistence,
    }
}

fn repo_error_kind(err: &RepoError) -> ErrorKind {
    match err {
        RepoError::NotFound => ErrorKind::NotFound,
        RepoError::NotOwnedOrMissing => ErrorKind::NotOwnedOrMissing,
        RepoError::Other(_) => ErrorKind::Persistence,
    }
}
