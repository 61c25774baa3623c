// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use rand::SeedableRng;
use rand::rngs::StdRng;
use tbls_params::PartyId;

use crate::keygen::{KeySet, generate};

pub const TEST_MESSAGE: &[u8] = b"the little fox jumps over the lazy dog";

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Deals a reproducible `t`-of-`n` key
pub fn deal(n: usize, t: usize, seed: u64) -> KeySet {
    // Unwrap is fine here as a seeded rng never fails.
    generate(&mut seeded_rng(seed), n, t).unwrap()
}

/// Encodes the public parameters of `keys`, assigning shares to `parties` in order
pub fn encoded_params(keys: &KeySet, parties: &[PartyId]) -> Vec<u8> {
    keys.public_params(parties).unwrap().encode().unwrap()
}
