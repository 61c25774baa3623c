// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Lagrange interpolation in the exponent.
//!
//! Given values `f(x_i) * P` for a set of distinct evaluation points, reconstructs
//! `f(target) * P` without learning any scalar. The same routine serves signatures
//! (G1) and public keys (G2).
//!
//! The result equals `f(target) * P` only if at least `t` points are supplied, where
//! `t - 1` is the degree of `f`. Fewer points produce a well-defined but meaningless
//! group element; this module does not know `t` and cannot detect that case.

use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Group;
use tbls_params::EvalPoint;

use crate::BLSError;

/// Computes `λ_i = Π_{j≠i} (target - x_j) / (x_i - x_j)` for every `x_i`
pub fn coefficients(xs: &[EvalPoint], target: EvalPoint) -> Result<Vec<Scalar>, BLSError> {
    if xs.is_empty() {
        return Err(BLSError::EmptyPointSet);
    }
    let target = Scalar::from(target);

    xs.iter()
        .enumerate()
        .map(|(i, &x_i)| {
            let mut numerator = Scalar::ONE;
            let mut denominator = Scalar::ONE;
            for (j, &x_j) in xs.iter().enumerate() {
                if i == j {
                    continue;
                }
                if x_i == x_j {
                    return Err(BLSError::DuplicateEvaluationPoint(x_i));
                }
                numerator *= target - Scalar::from(x_j);
                denominator *= Scalar::from(x_i) - Scalar::from(x_j);
            }
            let inverse = Option::<Scalar>::from(denominator.invert())
                .ok_or(BLSError::DuplicateEvaluationPoint(x_i))?;
            Ok(numerator * inverse)
        })
        .collect()
}

/// Returns `Σ λ_i · value_i` for the given `(x_i, value_i)` pairs
pub fn combine<G>(points: &[(EvalPoint, G)], target: EvalPoint) -> Result<G, BLSError>
where
    G: Group<Scalar = Scalar>,
{
    let xs: Vec<EvalPoint> = points.iter().map(|(x, _)| *x).collect();
    let coefficients = coefficients(&xs, target)?;
    Ok(points
        .iter()
        .zip(coefficients)
        .map(|((_, value), coefficient)| *value * coefficient)
        .sum())
}

/// Combines partial signatures into the signature of the master secret
pub fn aggregate_signatures(sigs: &[(EvalPoint, G1Affine)]) -> Result<G1Affine, BLSError> {
    let points: Vec<(EvalPoint, G1Projective)> = sigs
        .iter()
        .map(|(x, sig)| (*x, G1Projective::from(sig)))
        .collect();
    combine(&points, 0).map(G1Affine::from)
}

/// Combines public key shares into the threshold public key
pub fn aggregate_public_keys(pub_keys: &[(EvalPoint, G2Affine)]) -> Result<G2Affine, BLSError> {
    let points: Vec<(EvalPoint, G2Projective)> = pub_keys
        .iter()
        .map(|(x, pub_key)| (*x, G2Projective::from(pub_key)))
        .collect();
    combine(&points, 0).map(G2Affine::from)
}
