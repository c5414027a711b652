//! Domain model for tracked parcels.
//!
//! # Responsibility
//! - Define the parcel record and its status lifecycle.
//!
//! # Invariants
//! - Status transitions are expressed only through `ParcelStatus::next`.

pub mod parcel;
