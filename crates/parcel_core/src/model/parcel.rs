//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical parcel record persisted by the store.
//! - Own the status lifecycle and its single transition function.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused after deletion.
//! - `status` only moves forward: `registered -> sent -> delivered`.
//! - `address` is free-form text, stored as given.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Opaque owner identifier. No client entity is modeled.
pub type ClientId = i64;

/// Number carried by a parcel that has not been persisted yet.
pub const UNASSIGNED_NUMBER: ParcelNumber = 0;

/// Lifecycle stage of a parcel.
///
/// Variants are declared in lifecycle order so `Ord` follows progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    /// Accepted but not yet handed to the carrier.
    Registered,
    /// In transit.
    Sent,
    /// Final state.
    Delivered,
}

impl ParcelStatus {
    /// Returns the following lifecycle stage, or `None` once delivered.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Stable lowercase form used in storage and narration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a known parcel status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParcelStatusError(String);

impl Display for ParseParcelStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown parcel status `{}`; expected registered|sent|delivered",
            self.0
        )
    }
}

impl Error for ParseParcelStatusError {}

impl FromStr for ParcelStatus {
    type Err = ParseParcelStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParseParcelStatusError(other.to_string())),
        }
    }
}

/// Canonical parcel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// `UNASSIGNED_NUMBER` until the store assigns one.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    /// Free-form delivery destination.
    pub address: String,
    /// UTC RFC 3339 with seconds precision, e.g. `2026-10-16T08:30:00Z`.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unpersisted parcel in `registered` state stamped with the
    /// current UTC time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            number: UNASSIGNED_NUMBER,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: now_timestamp(),
        }
    }
}

impl Display for Parcel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parcel #{} to {} for client {} registered at {}, status {}",
            self.number, self.address, self.client, self.created_at, self.status
        )
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
