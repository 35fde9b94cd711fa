// NOTE:
// All timestamps are stored as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};

use nrl_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod obstacle;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, ref info) => {
            log::warn!("Rejected invalid row: {}", info.message());
            repo::Error::Other(err.into())
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_violation() -> repo::Error {
    anyhow!("Writing is not allowed on a read-only connection").into()
}

fn load_review_status(status: &str) -> Result<ReviewStatus> {
    status
        .parse()
        .map_err(|_| anyhow!("Invalid review status: {status}").into())
}

fn store_review_status(status: ReviewStatus) -> String {
    status.to_string()
}
