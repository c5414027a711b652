//! Core parcel tracking logic.
//!
//! Owns the parcel lifecycle rules and their SQLite persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging};
pub use model::parcel::{
    ClientId, Parcel, ParcelNumber, ParcelStatus, ParseParcelStatusError, UNASSIGNED_NUMBER,
};
pub use repo::parcel_repo::{
    GuardedAction, ParcelRepository, RepoError, RepoResult, SqliteParcelRepository,
};
pub use service::narrator::{Narrator, RecordingNarrator, StdoutNarrator};
pub use service::parcel_service::ParcelService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
