//! Repository layer for parcel persistence.
//!
//! # Responsibility
//! - Define the storage contract consumed by services.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `InvalidState`) in
//!   addition to storage transport errors.

pub mod parcel_repo;
