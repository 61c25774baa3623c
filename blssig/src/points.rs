// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Fixed-size encodings of signatures (G1) and public keys (G2).
//!
//! Decoding goes through the checked compressed decoders, which reject
//! points that are off the curve or outside the prime-order subgroup.
//! Public keys must also not be the identity, which would accept any message.

use bls12_381::{G1Affine, G2Affine};

use crate::BLSError;

/// Compressed G1 (signature) length in bytes
pub const G1_COMPRESSED_LEN: usize = 48;

/// Compressed G2 (public key) length in bytes
pub const G2_COMPRESSED_LEN: usize = 96;

pub fn signature_from_bytes(sig: &[u8]) -> Result<G1Affine, BLSError> {
    let bytes: &[u8; G1_COMPRESSED_LEN] = sig
        .try_into()
        .map_err(|_| BLSError::InvalidSignatureLength(sig.len()))?;
    Option::from(G1Affine::from_compressed(bytes)).ok_or(BLSError::SignatureDeserialization)
}

pub fn signature_to_bytes(sig: &G1Affine) -> Vec<u8> {
    sig.to_compressed().to_vec()
}

pub fn public_key_from_bytes(pub_key: &[u8]) -> Result<G2Affine, BLSError> {
    let bytes: &[u8; G2_COMPRESSED_LEN] = pub_key
        .try_into()
        .map_err(|_| BLSError::InvalidPublicKeyLength(pub_key.len()))?;
    let pub_key: G2Affine = Option::from(G2Affine::from_compressed(bytes))
        .ok_or(BLSError::PublicKeyDeserialization)?;
    if bool::from(pub_key.is_identity()) {
        return Err(BLSError::IdentityPublicKey);
    }
    Ok(pub_key)
}

pub fn public_key_to_bytes(pub_key: &G2Affine) -> Vec<u8> {
    pub_key.to_compressed().to_vec()
}
