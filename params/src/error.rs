// Copyright 2019-2024 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::{CborError, PartyId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParamsError {
    /// The bundle is not a well-formed CBOR tuple.
    #[error("failed to decode public parameters: {0}")]
    Decode(#[from] CborError),

    /// The bundle could not be encoded.
    #[error("failed to encode public parameters: {0}")]
    Encode(CborError),

    #[error("public parameters contain no parties")]
    EmptyParties,

    /// The party list and the public key share list are not parallel.
    #[error("mismatched number of parties and public keys: {parties} != {public_keys}")]
    PartyCountMismatch { parties: usize, public_keys: usize },

    #[error("party {0} is listed more than once")]
    DuplicateParty(PartyId),
}
