// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{G1Affine, G1Projective, G2Affine, Scalar, pairing};
use sha2::{Digest, Sha256};

use crate::BLSError;
use crate::points::{public_key_from_bytes, signature_from_bytes};

/// Domain separation tag of the hash-to-curve suite (signatures in G1)
pub const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// SHA-256 digest of a message, the value parties agree to sign
pub fn digest(message: &[u8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(message));
    digest
}

/// Maps a digest to G1 with the standardized hash-to-curve
///
/// `ExpandMsgXmd` takes a `digest` 0.9 hasher.
pub fn hash_to_g1(digest: &[u8]) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<sha2_09::Sha256>>>::hash_to_curve(digest, DST)
}

/// Signs a digest with a full key or a key share.
///
/// Signing is deterministic: the same scalar and digest always yield the same point.
pub fn sign(scalar: &Scalar, digest: &[u8]) -> G1Affine {
    G1Affine::from(hash_to_g1(digest) * scalar)
}

/// Checks `e(sig, g2) == e(H(digest), pub_key)`.
///
/// Any failure is reported as [`BLSError::SignatureMismatch`], regardless of its cause.
pub fn verify(pub_key: &G2Affine, digest: &[u8], sig: &G1Affine) -> Result<(), BLSError> {
    let hashed = G1Affine::from(hash_to_g1(digest));
    if pairing(sig, &G2Affine::generator()) == pairing(&hashed, pub_key) {
        Ok(())
    } else {
        Err(BLSError::SignatureMismatch)
    }
}

/// [`verify`] over encoded points
pub fn verify_bytes(pub_key: &[u8], digest: &[u8], sig: &[u8]) -> Result<(), BLSError> {
    let pub_key = public_key_from_bytes(pub_key)?;
    let sig = signature_from_bytes(sig)?;
    verify(&pub_key, digest, &sig)
}
