//! Parcel use-case service.
//!
//! # Responsibility
//! - Orchestrate repository calls into the parcel lifecycle use-cases.
//! - Own the status transition policy (one step per call, never backwards).
//! - Narrate user-facing confirmations.
//!
//! # Invariants
//! - Repository errors are returned unchanged.
//! - A delivered parcel is never written again by `next_status`.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use crate::service::narrator::{Narrator, StdoutNarrator};
use log::info;

/// Use-case service wrapper over a parcel repository.
pub struct ParcelService<R: ParcelRepository, N: Narrator = StdoutNarrator> {
    repo: R,
    narrator: N,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service narrating to stdout.
    pub fn new(repo: R) -> Self {
        Self::with_narrator(repo, StdoutNarrator)
    }
}

impl<R: ParcelRepository, N: Narrator> ParcelService<R, N> {
    pub fn with_narrator(repo: R, narrator: N) -> Self {
        Self { repo, narrator }
    }

    /// Registers a new parcel for `client` and returns it with its assigned
    /// number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.repo.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        self.narrator.narrate(&format!(
            "New parcel #{} to {} for client {} registered at {}",
            parcel.number, parcel.address, parcel.client, parcel.created_at
        ));

        Ok(parcel)
    }

    /// Advances the parcel one lifecycle step and returns the resulting status.
    ///
    /// # Contract
    /// - `registered -> sent`, `sent -> delivered`.
    /// - `delivered` is returned as-is without touching storage or narrating.
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<ParcelStatus> {
        let parcel = self.repo.get(number)?;

        let Some(next) = parcel.status.next() else {
            return Ok(parcel.status);
        };

        self.repo.set_status(number, next)?;

        info!(
            "event=parcel_status module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        self.narrator
            .narrate(&format!("Parcel #{number} has new status: {next}"));

        Ok(next)
    }

    /// Changes the delivery address of a registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        self.repo.set_address(number, address)?;
        info!("event=parcel_address module=service status=ok number={number}");
        Ok(())
    }

    /// Deletes a registered parcel.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        self.repo.delete(number)?;
        info!("event=parcel_delete module=service status=ok number={number}");
        Ok(())
    }

    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }

    /// Narrates every parcel of `client`, followed by a blank line, and
    /// returns the parcels that were listed.
    pub fn print_client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let parcels = self.repo.get_by_client(client)?;

        self.narrator
            .narrate(&format!("Parcels of client {client}:"));
        for parcel in &parcels {
            self.narrator.narrate(&parcel.to_string());
        }
        self.narrator.narrate("");

        Ok(parcels)
    }
}
