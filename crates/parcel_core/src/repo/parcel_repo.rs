//! Parcel repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate parcel CRUD calls into SQL over the `parcel` table.
//! - Map rows back into typed `Parcel` records, rejecting unknown statuses.
//!
//! # Invariants
//! - Addresses are free-form and stored as given; only the status guard
//!   decides whether an address change or deletion applies.
//! - Address changes and deletion carry the `status = 'registered'` guard in
//!   the same statement as the mutation.
//! - A guarded statement matching zero rows is an `InvalidState` error; a
//!   missing parcel and a non-registered parcel are not told apart here.
//! - `set_status` does not check transition legality.

use crate::db::DbError;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

pub type RepoResult<T> = Result<T, RepoError>;

/// Mutations that are only allowed while a parcel is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    ChangeAddress,
    Delete,
}

impl Display for GuardedAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChangeAddress => f.write_str("change address of"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// Repository error for parcel persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// No row for the requested number.
    NotFound(ParcelNumber),
    /// Guarded mutation matched no registered row.
    InvalidState {
        number: ParcelNumber,
        action: GuardedAction,
    },
    /// Underlying SQLite or bootstrap failure.
    Db(DbError),
    /// Persisted row could not be mapped into a `Parcel`.
    InvalidData(String),
}

impl RepoError {
    /// Whether this error originates from the storage engine or stored data
    /// rather than from domain rules.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Db(_) | Self::InvalidData(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::InvalidState { number, action } => write!(
                f,
                "cannot {action} parcel {number}: parcel is not registered or not found"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted parcel data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidState { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for parcel records.
pub trait ParcelRepository {
    /// Persists a new parcel and returns the assigned number. The caller's
    /// `number` field is ignored.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Returns every parcel of `client`, ordered by number. Empty when none.
    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>>;
    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()>;
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel repository borrowing a migrated connection.
pub struct SqliteParcelRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ParcelRepository for SqliteParcelRepository<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                parcel.client,
                parcel.status.as_str(),
                parcel.address.as_str(),
                parcel.created_at.as_str(),
            ],
        )?;

        let number = self.conn.last_insert_rowid();
        debug!("event=parcel_insert module=repo status=ok number={number}");
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PARCEL_SELECT_SQL} WHERE number = ?1;"))?;

        let mut rows = stmt.query([number])?;
        if let Some(row) = rows.next()? {
            return parse_parcel_row(row);
        }

        Err(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL} WHERE client = ?1 ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query([client])?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel SET status = ?1 WHERE number = ?2;",
            params![status.as_str(), number],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(number));
        }

        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel
             SET address = ?1
             WHERE number = ?2 AND status = ?3;",
            params![address, number, ParcelStatus::Registered.as_str()],
        )?;

        guard_outcome(number, GuardedAction::ChangeAddress, changed)
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parcel WHERE number = ?1 AND status = ?2;",
            params![number, ParcelStatus::Registered.as_str()],
        )?;

        guard_outcome(number, GuardedAction::Delete, changed)
    }
}

fn guard_outcome(number: ParcelNumber, action: GuardedAction, changed: usize) -> RepoResult<()> {
    if changed == 0 {
        warn!("event=parcel_guard module=repo status=rejected number={number} action={action:?}");
        return Err(RepoError::InvalidState { number, action });
    }
    Ok(())
}

fn parse_parcel_row(row: &Row<'_>) -> RepoResult<Parcel> {
    let number: ParcelNumber = row.get("number")?;

    let status_text: String = row.get("status")?;
    let status = status_text.parse::<ParcelStatus>().map_err(|err| {
        RepoError::InvalidData(format!("parcel {number}: {err} in parcel.status"))
    })?;

    Ok(Parcel {
        number,
        client: row.get("client")?,
        status,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}
