// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Threshold BLS signatures over BLS12-381.
//!
//! A dealer splits a master secret into `n` Shamir shares of which any `t` can jointly
//! produce a signature that verifies under the single threshold public key.
//! Partial signatures are combined by Lagrange interpolation on curve points, so the
//! master secret is never reconstructed.
//!
//! It uses G1 for signatures and G2 for public keys. Digests are mapped to G1 with the
//! standardized hash-to-curve suite.

pub mod keygen;
pub mod lagrange;
pub mod points;
pub mod signer;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod error;
mod verifier;

pub use error::BLSError;
pub use keygen::{KeySet, SecretShare};
pub use verifier::{ThresholdVerifier, VerifierError};

// re-exports
pub use bls12_381::{G1Affine, G2Affine, Scalar};
