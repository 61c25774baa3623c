// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Trusted-dealer key generation.
//!
//! The dealer samples a random polynomial `f` of degree `t - 1`, keeps `f(0)` as the
//! master secret and hands out `f(1), ..., f(n)` as shares. Delivering the shares to
//! their owners over a secure channel is up to the caller.

use std::fmt;

use bls12_381::{G1Affine, G2Affine, G2Projective, Scalar};
use ff::Field;
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use tbls_params::{EvalPoint, ParamsError, PartyId, PublicParams};
use tracing::{debug, instrument};

use crate::BLSError;
use crate::points::public_key_to_bytes;
use crate::signer;

/// One point `(x, f(x))` on the secret polynomial, owned by a single party.
#[derive(Clone)]
pub struct SecretShare {
    eval_point: EvalPoint,
    scalar: Scalar,
}

impl SecretShare {
    pub fn new(eval_point: EvalPoint, scalar: Scalar) -> Self {
        Self { eval_point, scalar }
    }

    pub fn eval_point(&self) -> EvalPoint {
        self.eval_point
    }

    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Public key share: the G2 generator scaled by this share
    pub fn public_key(&self) -> G2Affine {
        public_key(&self.scalar)
    }

    /// Produces this party's partial signature over `digest`
    pub fn sign(&self, digest: &[u8]) -> G1Affine {
        signer::sign(&self.scalar, digest)
    }
}

impl fmt::Debug for SecretShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretShare")
            .field("eval_point", &self.eval_point)
            .field("scalar", &"<redacted>")
            .finish()
    }
}

/// Everything produced by a single dealing.
#[derive(Debug, Clone)]
pub struct KeySet {
    /// Number of shares required to sign
    pub threshold: usize,
    /// Secret shares, `shares[i]` evaluated at `i + 1`
    pub shares: Vec<SecretShare>,
    /// Public key share of each secret share, in the same order
    pub public_keys: Vec<G2Affine>,
    /// Public key of the master secret
    pub threshold_public_key: G2Affine,
}

impl KeySet {
    /// Builds the published bundle, assigning `shares[i]` to `parties[i]`.
    pub fn public_params(&self, parties: &[PartyId]) -> Result<PublicParams, ParamsError> {
        PublicParams::new(
            parties.to_vec(),
            self.public_keys.iter().map(public_key_to_bytes).collect(),
            public_key_to_bytes(&self.threshold_public_key),
        )
    }
}

/// Computes the public key for a secret scalar
pub fn public_key(scalar: &Scalar) -> G2Affine {
    G2Affine::from(G2Projective::generator() * scalar)
}

pub fn derive_public_key_shares(shares: &[SecretShare]) -> Vec<G2Affine> {
    shares.iter().map(SecretShare::public_key).collect()
}

/// Splits a fresh random secret into `n` shares, any `t` of which can sign.
///
/// # Errors
/// - [`BLSError::InvalidThreshold`] unless `1 <= t <= n <= u16::MAX`
/// - [`BLSError::RandomnessUnavailable`] if `rng` fails; there is no retry
#[instrument(skip(rng))]
pub fn generate<R: RngCore + CryptoRng>(
    rng: &mut R,
    n: usize,
    t: usize,
) -> Result<KeySet, BLSError> {
    if t == 0 || t > n || n > usize::from(u16::MAX) {
        return Err(BLSError::InvalidThreshold {
            threshold: t,
            shares: n,
        });
    }

    let coefficients = (0..t)
        .map(|_| random_scalar(rng))
        .collect::<Result<Vec<_>, _>>()?;

    let shares: Vec<SecretShare> = (1..=n as EvalPoint)
        .map(|x| SecretShare::new(x, evaluate(&coefficients, x)))
        .collect();
    let public_keys = derive_public_key_shares(&shares);
    let threshold_public_key = public_key(&coefficients[0]);

    debug!(n, t, "dealt threshold key");
    Ok(KeySet {
        threshold: t,
        shares,
        public_keys,
        threshold_public_key,
    })
}

/// [`generate`] backed by the operating system's CSPRNG
pub fn generate_with_os_rng(n: usize, t: usize) -> Result<KeySet, BLSError> {
    generate(&mut OsRng, n, t)
}

/// Samples a uniform scalar from 64 random bytes.
fn random_scalar<R: RngCore>(rng: &mut R) -> Result<Scalar, BLSError> {
    let mut wide = [0u8; 64];
    rng.try_fill_bytes(&mut wide)
        .map_err(BLSError::RandomnessUnavailable)?;
    Ok(Scalar::from_bytes_wide(&wide))
}

/// Horner evaluation of the polynomial at `x`
fn evaluate(coefficients: &[Scalar], x: EvalPoint) -> Scalar {
    let x = Scalar::from(x);
    coefficients
        .iter()
        .rev()
        .fold(Scalar::ZERO, |acc, coefficient| acc * x + coefficient)
}
