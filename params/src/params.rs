// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use ahash::{HashMap, HashSet};
use fvm_ipld_encoding::RawBytes;
use fvm_ipld_encoding::tuple::*;

use crate::{EvalPoint, ParamsError, PartyId};

/// Mapping from a party to the evaluation point of its share.
pub type PartyEvalMap = HashMap<PartyId, EvalPoint>;

/// The public parameters of a threshold key, as published by the dealer.
///
/// Points are kept in their raw encoded form; this crate does not know the curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicParams {
    /// Ordered party list. The position of a party defines its evaluation point.
    pub parties: Vec<PartyId>,
    /// Encoded public key share of each party, parallel to `parties`
    pub public_keys: Vec<Vec<u8>>,
    /// Encoded threshold public key
    pub threshold_public_key: Vec<u8>,
}

/// Wire form of [`PublicParams`]: `[parties, public_keys, threshold_public_key]`.
#[derive(Serialize_tuple, Deserialize_tuple)]
struct PublicParamsTuple {
    parties: Vec<PartyId>,
    public_keys: Vec<RawBytes>,
    threshold_public_key: RawBytes,
}

impl PublicParams {
    /// Creates validated public parameters
    ///
    /// # Errors
    /// Fails if the party list is empty, contains duplicates, or is not parallel
    /// to the public key list.
    pub fn new(
        parties: Vec<PartyId>,
        public_keys: Vec<Vec<u8>>,
        threshold_public_key: Vec<u8>,
    ) -> Result<Self, ParamsError> {
        let params = Self {
            parties,
            public_keys,
            threshold_public_key,
        };
        params.validate()?;
        Ok(params)
    }

    /// Decodes and validates a DAG-CBOR encoded bundle
    pub fn decode(raw: &[u8]) -> Result<Self, ParamsError> {
        let tuple: PublicParamsTuple = fvm_ipld_encoding::from_slice(raw)?;
        Self::new(
            tuple.parties,
            tuple.public_keys.into_iter().map(Vec::from).collect(),
            tuple.threshold_public_key.into(),
        )
    }

    /// Encodes the bundle as DAG-CBOR
    pub fn encode(&self) -> Result<Vec<u8>, ParamsError> {
        let tuple = PublicParamsTuple {
            parties: self.parties.clone(),
            public_keys: self
                .public_keys
                .iter()
                .cloned()
                .map(RawBytes::new)
                .collect(),
            threshold_public_key: RawBytes::new(self.threshold_public_key.clone()),
        };
        fvm_ipld_encoding::to_vec(&tuple).map_err(ParamsError::Encode)
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.parties.is_empty() {
            return Err(ParamsError::EmptyParties);
        }
        if self.parties.len() != self.public_keys.len() {
            return Err(ParamsError::PartyCountMismatch {
                parties: self.parties.len(),
                public_keys: self.public_keys.len(),
            });
        }

        let mut seen = HashSet::default();
        for party in &self.parties {
            if !seen.insert(*party) {
                return Err(ParamsError::DuplicateParty(*party));
            }
        }
        Ok(())
    }

    /// Builds the party to evaluation point mapping from list order (1-based).
    pub fn eval_points(&self) -> PartyEvalMap {
        self.parties
            .iter()
            .zip(1..)
            .map(|(party, eval_point)| (*party, eval_point))
            .collect()
    }
}
