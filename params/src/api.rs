// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::PartyId;

/// Verifier trait for threshold signature aggregation and verification
pub trait Verifier {
    /// Error type returned by every operation of the verifier.
    type Error;

    /// Combines partial signatures into a signature valid under the threshold public key
    ///
    /// The result is only meaningful when at least `t` distinct parties contributed.
    /// The verifier does not know `t`, so callers must enforce the quorum.
    ///
    /// This method must be safe for concurrent use.
    ///
    /// # Arguments
    /// * `sigs` - The encoded partial signatures
    /// * `signers` - The party that produced each signature, in the same order
    ///
    /// # Returns
    /// A Result containing the encoded aggregate signature
    fn aggregate(&self, sigs: &[Vec<u8>], signers: &[PartyId]) -> Result<Vec<u8>, Self::Error>;

    /// Verifies a signature against the threshold public key
    ///
    /// This method must be safe for concurrent use.
    ///
    /// # Arguments
    /// * `digest` - The digest that was signed
    /// * `sig` - The encoded signature to verify
    fn verify(&self, digest: &[u8], sig: &[u8]) -> Result<(), Self::Error>;
}
