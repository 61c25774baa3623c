// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{ThresholdVerifier, VerifierError};
use crate::{BLSError, G1Affine, G2Affine};
use crate::keygen::KeySet;
use crate::points::{public_key_to_bytes, signature_to_bytes};
use crate::signer;
use crate::test_utils::{TEST_MESSAGE, deal, encoded_params};
use tbls_params::api::Verifier;
use tbls_params::{ParamsError, PartyId, PublicParams};

const PARTIES: [PartyId; 5] = [101, 102, 103, 104, 105];

/// Partial signatures of the shares at `indices`, with the parties that hold them
fn sign_with(keys: &KeySet, indices: &[usize], digest: &[u8]) -> (Vec<Vec<u8>>, Vec<PartyId>) {
    indices
        .iter()
        .map(|&i| (signature_to_bytes(&keys.shares[i].sign(digest)), PARTIES[i]))
        .unzip()
}

/// All `k`-element subsets of `0..n`
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![vec![]];
    }
    (k - 1..n)
        .flat_map(|last| {
            subsets(last, k - 1).into_iter().map(move |mut subset| {
                subset.push(last);
                subset
            })
        })
        .collect()
}

fn setup(n: usize, t: usize, seed: u64) -> (KeySet, ThresholdVerifier) {
    let keys = deal(n, t, seed);
    let verifier = ThresholdVerifier::new(&encoded_params(&keys, &PARTIES[..n])).unwrap();
    (keys, verifier)
}

/// Two of three parties sign and the combined signature verifies
#[test]
fn test_two_of_three() -> anyhow::Result<()> {
    let (keys, verifier) = setup(3, 2, 0);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs, signers) = sign_with(&keys, &[0, 1], &digest);
    for (sig, signer) in sigs.iter().zip(&signers) {
        verifier.verify_share(*signer, &digest, sig)?;
    }

    let threshold_sig = verifier.aggregate_signatures(&sigs, &signers)?;
    verifier.verify(&digest, &threshold_sig)?;

    // any two public key shares reconstruct the threshold key
    assert_eq!(
        verifier.aggregate_public_keys(&signers)?,
        keys.threshold_public_key
    );
    assert_eq!(verifier.threshold_public_key(), keys.threshold_public_key);

    let other = signer::digest(b"the little fox hops over the lazy dog");
    let (other_sigs, _) = sign_with(&keys, &[0, 1], &other);
    let other_sig = verifier.aggregate_signatures(&other_sigs, &signers)?;
    assert!(matches!(
        verifier.verify(&digest, &other_sig),
        Err(VerifierError::BLS(BLSError::SignatureMismatch))
    ));
    Ok(())
}

/// Every t-sized quorum produces the same verifying signature
#[test]
fn test_every_quorum_agrees() -> anyhow::Result<()> {
    let digest = signer::digest(TEST_MESSAGE);
    for (n, t) in [(1, 1), (4, 1), (4, 4), (5, 3)] {
        let (keys, verifier) = setup(n, t, n as u64 * 10 + t as u64);

        let mut expected = None;
        for subset in subsets(n, t) {
            let (sigs, signers) = sign_with(&keys, &subset, &digest);
            let threshold_sig = verifier.aggregate_signatures(&sigs, &signers)?;
            verifier.verify(&digest, &threshold_sig)?;

            let expected = expected.get_or_insert_with(|| threshold_sig.clone());
            assert_eq!(*expected, threshold_sig, "subset {subset:?} of {t}-of-{n}");
        }
    }
    Ok(())
}

#[test]
fn test_signer_order_is_irrelevant() -> anyhow::Result<()> {
    let (keys, verifier) = setup(5, 3, 1);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs, signers) = sign_with(&keys, &[4, 0, 2], &digest);
    let (sorted_sigs, sorted_signers) = sign_with(&keys, &[0, 2, 4], &digest);
    assert_eq!(
        verifier.aggregate_signatures(&sigs, &signers)?,
        verifier.aggregate_signatures(&sorted_sigs, &sorted_signers)?
    );
    Ok(())
}

#[test]
fn test_more_than_threshold_signers() -> anyhow::Result<()> {
    let (keys, verifier) = setup(5, 3, 2);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs, signers) = sign_with(&keys, &[0, 1, 2, 3, 4], &digest);
    verifier.verify(&digest, &verifier.aggregate_signatures(&sigs, &signers)?)?;
    Ok(())
}

#[test]
fn test_insufficient_signers() -> anyhow::Result<()> {
    let (keys, verifier) = setup(5, 3, 3);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs, signers) = sign_with(&keys, &[1, 3], &digest);
    let sig = verifier.aggregate_signatures(&sigs, &signers)?;
    assert!(matches!(
        verifier.verify(&digest, &sig),
        Err(VerifierError::BLS(BLSError::SignatureMismatch))
    ));
    Ok(())
}

#[test]
fn test_arity_mismatch() {
    let (keys, verifier) = setup(3, 2, 4);
    let (sigs, _) = sign_with(&keys, &[0, 1], &signer::digest(TEST_MESSAGE));
    assert!(matches!(
        verifier.aggregate_signatures(&sigs, &[101, 102, 103]),
        Err(VerifierError::ArityMismatch {
            signers: 3,
            sigs: 2
        })
    ));
}

#[test]
fn test_empty_signer_set() {
    let (_, verifier) = setup(3, 2, 5);
    assert!(matches!(
        verifier.aggregate_signatures(&[], &[]),
        Err(VerifierError::EmptySignerSet)
    ));
    assert!(matches!(
        verifier.aggregate_public_keys(&[]),
        Err(VerifierError::EmptySignerSet)
    ));
}

#[test]
fn test_unknown_signer() {
    let (keys, verifier) = setup(3, 2, 6);
    let (sigs, _) = sign_with(&keys, &[0, 1], &signer::digest(TEST_MESSAGE));
    assert!(matches!(
        verifier.aggregate_signatures(&sigs, &[101, 999]),
        Err(VerifierError::UnknownSigner(999))
    ));
    assert!(matches!(
        verifier.verify_share(999, &signer::digest(TEST_MESSAGE), &sigs[0]),
        Err(VerifierError::UnknownSigner(999))
    ));
}

#[test]
fn test_duplicate_signer() {
    let (keys, verifier) = setup(3, 2, 7);
    let (sigs, _) = sign_with(&keys, &[0, 0], &signer::digest(TEST_MESSAGE));
    assert!(matches!(
        verifier.aggregate_signatures(&sigs, &[101, 101]),
        Err(VerifierError::BLS(BLSError::DuplicateEvaluationPoint(1)))
    ));
}

#[test]
fn test_malformed_signature() {
    let (keys, verifier) = setup(3, 2, 8);
    let digest = signer::digest(TEST_MESSAGE);
    let (mut sigs, signers) = sign_with(&keys, &[0, 1], &digest);

    sigs[1].truncate(3);
    assert!(matches!(
        verifier.aggregate_signatures(&sigs, &signers),
        Err(VerifierError::BLS(BLSError::InvalidSignatureLength(3)))
    ));
    assert!(matches!(
        verifier.verify(&digest, &[0u8; 48]),
        Err(VerifierError::BLS(BLSError::SignatureDeserialization))
    ));
}

/// A party that signed something else is pinpointed by its share
#[test]
fn test_verify_share_detects_bad_signer() -> anyhow::Result<()> {
    let (keys, verifier) = setup(3, 2, 9);
    let digest = signer::digest(TEST_MESSAGE);
    let wrong = signer::digest(b"something else");

    let good = signature_to_bytes(&keys.shares[0].sign(&digest));
    let bad = signature_to_bytes(&keys.shares[1].sign(&wrong));
    verifier.verify_share(101, &digest, &good)?;
    assert!(matches!(
        verifier.verify_share(102, &digest, &bad),
        Err(VerifierError::BLS(BLSError::SignatureMismatch))
    ));
    // a valid share signature presented under another party's name
    assert!(matches!(
        verifier.verify_share(103, &digest, &good),
        Err(VerifierError::BLS(BLSError::SignatureMismatch))
    ));

    let sig = verifier.aggregate_signatures(&[good, bad], &[101, 102])?;
    assert!(verifier.verify(&digest, &sig).is_err());
    Ok(())
}

#[test]
fn test_invalid_params() {
    assert!(matches!(
        ThresholdVerifier::new(&[0x01, 0x02]),
        Err(VerifierError::Params(ParamsError::Decode(_)))
    ));

    let keys = deal(3, 2, 10);
    let mut params = keys.public_params(&PARTIES[..3]).unwrap();
    params.public_keys[2] = vec![0u8; 96];
    assert!(matches!(
        ThresholdVerifier::new(&params.encode().unwrap()),
        Err(VerifierError::BLS(BLSError::PublicKeyDeserialization))
    ));

    params.threshold_public_key.pop();
    assert!(matches!(
        ThresholdVerifier::new(&params.encode().unwrap()),
        Err(VerifierError::BLS(BLSError::InvalidPublicKeyLength(95)))
    ));
}

/// An identity threshold key would accept the identity signature for any digest
#[test]
fn test_identity_threshold_key_rejected() {
    let keys = deal(3, 2, 17);
    let mut params = keys.public_params(&PARTIES[..3]).unwrap();
    params.threshold_public_key = public_key_to_bytes(&G2Affine::identity());
    assert!(matches!(
        ThresholdVerifier::new(&params.encode().unwrap()),
        Err(VerifierError::BLS(BLSError::IdentityPublicKey))
    ));

    let verifier = ThresholdVerifier::new(&encoded_params(&keys, &PARTIES[..3])).unwrap();
    let identity_sig = signature_to_bytes(&G1Affine::identity());
    assert!(verifier.init(&params.encode().unwrap()).is_err());
    assert!(matches!(
        verifier.verify(&signer::digest(TEST_MESSAGE), &identity_sig),
        Err(VerifierError::BLS(BLSError::SignatureMismatch))
    ));
}

#[test]
fn test_reinit_replaces_state() -> anyhow::Result<()> {
    let (keys_a, verifier) = setup(3, 2, 11);
    let keys_b = deal(3, 2, 12);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs_a, signers) = sign_with(&keys_a, &[0, 2], &digest);
    let sig_a = verifier.aggregate_signatures(&sigs_a, &signers)?;
    verifier.verify(&digest, &sig_a)?;

    // the same shares, handed to the parties in reverse order
    let reversed: Vec<PartyId> = PARTIES[..3].iter().rev().copied().collect();
    verifier.init(&encoded_params(&keys_b, &reversed))?;
    assert_eq!(verifier.parties(), reversed);
    assert_eq!(verifier.eval_point(103), Some(1));
    assert_eq!(verifier.eval_point(101), Some(3));
    assert!(verifier.verify(&digest, &sig_a).is_err());

    let sigs_b: Vec<Vec<u8>> = [0, 2]
        .iter()
        .map(|&i: &usize| signature_to_bytes(&keys_b.shares[i].sign(&digest)))
        .collect();
    let sig_b = verifier.aggregate_signatures(&sigs_b, &[103, 101])?;
    verifier.verify(&digest, &sig_b)?;

    // a rejected bundle leaves the current parameters in place
    assert!(verifier.init(b"not a bundle").is_err());
    assert_eq!(verifier.threshold_public_key(), keys_b.threshold_public_key);
    verifier.verify(&digest, &sig_b)?;
    Ok(())
}

#[test]
fn test_concurrent_readers() -> anyhow::Result<()> {
    let (keys_a, verifier) = setup(3, 2, 13);
    let keys_b = deal(3, 2, 14);
    let params_a = encoded_params(&keys_a, &PARTIES[..3]);
    let params_b = encoded_params(&keys_b, &PARTIES[..3]);
    let digest = signer::digest(TEST_MESSAGE);

    let (sigs, signers) = sign_with(&keys_a, &[0, 1], &digest);
    let sig_a = verifier.aggregate_signatures(&sigs, &signers)?;

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10 {
                    let pub_key = verifier.threshold_public_key();
                    assert!(
                        pub_key == keys_a.threshold_public_key
                            || pub_key == keys_b.threshold_public_key
                    );
                    match verifier.verify(&digest, &sig_a) {
                        Ok(()) | Err(VerifierError::BLS(BLSError::SignatureMismatch)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            });
        }
        for i in 0..10 {
            let params = if i % 2 == 0 { &params_b } else { &params_a };
            verifier.init(params).unwrap();
        }
    });

    verifier.verify(&digest, &sig_a)?;
    Ok(())
}

/// Callers holding only bytes go through the `Verifier` trait
#[test]
fn test_verifier_trait() -> anyhow::Result<()> {
    fn aggregate_and_verify<V: Verifier>(
        verifier: &V,
        digest: &[u8],
        sigs: &[Vec<u8>],
        signers: &[PartyId],
    ) -> Result<(), V::Error> {
        let sig = verifier.aggregate(sigs, signers)?;
        verifier.verify(digest, &sig)
    }

    let (keys, verifier) = setup(4, 3, 15);
    let digest = signer::digest(TEST_MESSAGE);
    let (sigs, signers) = sign_with(&keys, &[1, 2, 3], &digest);
    aggregate_and_verify(&verifier, &digest, &sigs, &signers)?;
    Ok(())
}

#[test]
fn test_bundle_round_trip_through_params() -> anyhow::Result<()> {
    let keys = deal(3, 2, 16);
    let params = PublicParams::new(
        PARTIES[..3].to_vec(),
        keys.public_keys.iter().map(public_key_to_bytes).collect(),
        public_key_to_bytes(&keys.threshold_public_key),
    )?;
    let verifier = ThresholdVerifier::new(&params.encode()?)?;
    assert_eq!(verifier.eval_point(102), Some(2));
    assert_eq!(verifier.eval_point(106), None);
    Ok(())
}
