// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use bls12_381::G2Affine;
use parking_lot::RwLock;
use tbls_params::api::Verifier;
use tbls_params::{EvalPoint, ParamsError, PartyEvalMap, PartyId, PublicParams};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::BLSError;
use crate::points::{public_key_from_bytes, signature_from_bytes, signature_to_bytes};
use crate::{lagrange, signer};

#[cfg(test)]
mod tests;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error(transparent)]
    BLS(#[from] BLSError),
    #[error("no signers provided")]
    EmptySignerSet,
    #[error("mismatched number of signers and signatures: {signers} != {sigs}")]
    ArityMismatch { signers: usize, sigs: usize },
    #[error("unknown party {0}")]
    UnknownSigner(PartyId),
}

/// Decoded public parameters. Never mutated once built.
struct VerifierState {
    parties: Vec<PartyId>,
    /// Public key share of each party, indexed by `eval_point - 1`
    public_keys: Vec<G2Affine>,
    threshold_public_key: G2Affine,
    eval_points: PartyEvalMap,
}

impl VerifierState {
    fn decode(raw: &[u8]) -> Result<Self, VerifierError> {
        let params = PublicParams::decode(raw)?;
        let threshold_public_key = public_key_from_bytes(&params.threshold_public_key)?;
        let public_keys = params
            .public_keys
            .iter()
            .map(|pub_key| public_key_from_bytes(pub_key))
            .collect::<Result<Vec<_>, _>>()?;
        let eval_points = params.eval_points();

        Ok(Self {
            parties: params.parties,
            public_keys,
            threshold_public_key,
            eval_points,
        })
    }

    fn eval_point(&self, party: PartyId) -> Result<EvalPoint, VerifierError> {
        self.eval_points.get(&party).copied().ok_or_else(|| {
            warn!(party, "unknown party");
            VerifierError::UnknownSigner(party)
        })
    }

    fn public_key(&self, eval_point: EvalPoint) -> G2Affine {
        self.public_keys[eval_point as usize - 1]
    }
}

/// Aggregates and verifies threshold signatures against published public parameters
///
/// The parameters are held as an immutable snapshot. [`ThresholdVerifier::init`] swaps
/// in a fully decoded snapshot, so concurrent readers see either the old or the new
/// parameters and never a mix of both.
pub struct ThresholdVerifier {
    state: RwLock<Arc<VerifierState>>,
}

impl ThresholdVerifier {
    /// Creates a verifier from an encoded [`PublicParams`] bundle
    pub fn new(raw_params: &[u8]) -> Result<Self, VerifierError> {
        Ok(Self {
            state: RwLock::new(Arc::new(VerifierState::decode(raw_params)?)),
        })
    }

    /// Replaces all parameters with the ones in `raw_params`
    ///
    /// On error the previous parameters stay in place.
    #[instrument(skip_all)]
    pub fn init(&self, raw_params: &[u8]) -> Result<(), VerifierError> {
        let state = VerifierState::decode(raw_params)?;
        debug!(parties = state.parties.len(), "loaded public parameters");
        *self.state.write() = Arc::new(state);
        Ok(())
    }

    fn snapshot(&self) -> Arc<VerifierState> {
        self.state.read().clone()
    }

    /// Combines partial signatures of `signers` into a threshold signature
    pub fn aggregate_signatures(
        &self,
        sigs: &[Vec<u8>],
        signers: &[PartyId],
    ) -> Result<Vec<u8>, VerifierError> {
        if signers.is_empty() {
            return Err(VerifierError::EmptySignerSet);
        }
        if sigs.len() != signers.len() {
            return Err(VerifierError::ArityMismatch {
                signers: signers.len(),
                sigs: sigs.len(),
            });
        }

        let state = self.snapshot();
        let mut points = Vec::with_capacity(sigs.len());
        for (sig, party) in sigs.iter().zip(signers) {
            let sig = signature_from_bytes(sig)?;
            points.push((state.eval_point(*party)?, sig));
        }

        let agg_sig = lagrange::aggregate_signatures(&points)?;
        debug!(signers = signers.len(), "aggregated partial signatures");
        Ok(signature_to_bytes(&agg_sig))
    }

    /// Reconstructs the threshold public key from the key shares of `signers`
    pub fn aggregate_public_keys(&self, signers: &[PartyId]) -> Result<G2Affine, VerifierError> {
        if signers.is_empty() {
            return Err(VerifierError::EmptySignerSet);
        }

        let state = self.snapshot();
        let points = signers
            .iter()
            .map(|party| {
                let eval_point = state.eval_point(*party)?;
                Ok((eval_point, state.public_key(eval_point)))
            })
            .collect::<Result<Vec<_>, VerifierError>>()?;
        Ok(lagrange::aggregate_public_keys(&points)?)
    }

    /// Verifies a signature against the threshold public key
    pub fn verify(&self, digest: &[u8], sig: &[u8]) -> Result<(), VerifierError> {
        let sig = signature_from_bytes(sig)?;
        let state = self.snapshot();
        signer::verify(&state.threshold_public_key, digest, &sig).inspect_err(|_| {
            debug!("threshold signature mismatch");
        })?;
        Ok(())
    }

    /// Verifies a partial signature against the public key share of `party`
    pub fn verify_share(
        &self,
        party: PartyId,
        digest: &[u8],
        sig: &[u8],
    ) -> Result<(), VerifierError> {
        let sig = signature_from_bytes(sig)?;
        let state = self.snapshot();
        let pub_key = state.public_key(state.eval_point(party)?);
        signer::verify(&pub_key, digest, &sig).inspect_err(|_| {
            debug!(party, "partial signature mismatch");
        })?;
        Ok(())
    }

    pub fn threshold_public_key(&self) -> G2Affine {
        self.snapshot().threshold_public_key
    }

    /// Evaluation point of `party`, if it is part of the current parameters
    pub fn eval_point(&self, party: PartyId) -> Option<EvalPoint> {
        self.snapshot().eval_points.get(&party).copied()
    }

    pub fn parties(&self) -> Vec<PartyId> {
        self.snapshot().parties.clone()
    }
}

impl Verifier for ThresholdVerifier {
    type Error = VerifierError;

    fn aggregate(&self, sigs: &[Vec<u8>], signers: &[PartyId]) -> Result<Vec<u8>, Self::Error> {
        self.aggregate_signatures(sigs, signers)
    }

    fn verify(&self, digest: &[u8], sig: &[u8]) -> Result<(), Self::Error> {
        ThresholdVerifier::verify(self, digest, sig)
    }
}
