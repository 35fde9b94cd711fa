#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # nrl-entities
//!
//! Reusable, agnostic domain entities for the NRL obstacle registry.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod authorization;
pub mod geometry;
pub mod height;
pub mod id;
pub mod obstacle;
pub mod review;
pub mod session;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
