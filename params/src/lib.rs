// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Shared vocabulary for the threshold BLS scheme.
//!
//! This crate holds the pieces every party agrees upon before any signing happens:
//! - [`PartyId`] and [`EvalPoint`], the external and the Shamir view of a signer
//! - [`PublicParams`], the published bundle of party list, public key shares and
//!   threshold public key, together with its DAG-CBOR codec
//! - [`api::Verifier`], the facade contract consumed by callers that only hold bytes
//!
//! The evaluation point of a party is its 1-based position in [`PublicParams::parties`].
//! Reordering the party list between bundle versions therefore changes every party's
//! evaluation point and invalidates previously dealt shares against the new mapping.

pub mod api;
mod error;
mod params;

pub use error::ParamsError;
pub use params::{PartyEvalMap, PublicParams};

// re-exports
pub use fvm_ipld_encoding::Error as CborError;

/// `PartyId` is the stable, externally assigned identifier of a signer.
pub type PartyId = u16;

/// `EvalPoint` is the x-coordinate of a party's share on the secret polynomial.
///
/// Zero is reserved for the secret itself, dealt shares always use `1..=n`.
pub type EvalPoint = u64;
