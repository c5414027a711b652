//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into parcel use-cases.
//! - Keep callers decoupled from storage details.

pub mod narrator;
pub mod parcel_service;
