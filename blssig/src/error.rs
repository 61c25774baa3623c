// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tbls_params::EvalPoint;
use thiserror::Error;

use crate::points::{G1_COMPRESSED_LEN, G2_COMPRESSED_LEN};

#[derive(Error, Debug)]
pub enum BLSError {
    #[error("invalid threshold {threshold} for {shares} shares")]
    InvalidThreshold { threshold: usize, shares: usize },
    #[error("randomness source unavailable: {0}")]
    RandomnessUnavailable(rand_core::Error),
    #[error("invalid public key length: expected {G2_COMPRESSED_LEN} bytes, got {0}")]
    InvalidPublicKeyLength(usize),
    #[error("failed to deserialize public key: not a valid G2 point")]
    PublicKeyDeserialization,
    #[error("public key is the identity element")]
    IdentityPublicKey,
    #[error("invalid signature length: expected {G1_COMPRESSED_LEN} bytes, got {0}")]
    InvalidSignatureLength(usize),
    #[error("failed to deserialize signature: not a valid G1 point")]
    SignatureDeserialization,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("empty point set provided")]
    EmptyPointSet,
    #[error("evaluation point {0} appears more than once")]
    DuplicateEvaluationPoint(EvalPoint),
}

impl BLSError {
    /// Returns true if the error stems from a malformed point encoding.
    pub fn is_point_decode(&self) -> bool {
        matches!(
            self,
            BLSError::InvalidPublicKeyLength(_)
                | BLSError::PublicKeyDeserialization
                | BLSError::IdentityPublicKey
                | BLSError::InvalidSignatureLength(_)
                | BLSError::SignatureDeserialization
        )
    }
}
