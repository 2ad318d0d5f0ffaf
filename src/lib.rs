// Rust Elements Library
// Written in 2018 by
//   Andrew Poelstra <apoelstra@blockstream.com>
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Elements Blinding Library
//!
//! Computes the confidential-transaction blinding material of a Partially
//! Signed Elements Transaction (PSET): asset generators, Pedersen value
//! commitments, rangeproofs and asset surjection proofs, with the value
//! blinding factors balanced so that the commitments of the inputs and
//! outputs of each asset sum to the same point.
//!
//! The entry point is [`pset::PartiallySignedTransaction::blind`]; the
//! building blocks it drives live in [`blind`] and [`confidential`].
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

/// Re-export of the `bitcoin` crate.
pub extern crate bitcoin;
/// Re-export of the `secp256k1-zkp` crate.
pub extern crate secp256k1_zkp;

#[macro_use]
mod internal_macros;
pub mod blind;
pub mod confidential;
mod fast_merkle_root;
pub mod issuance;
pub mod pset;
mod transaction;

/// Re-export of the hashes used throughout this crate.
pub use bitcoin::hashes;
/// Script type of Elements outputs.
pub use bitcoin::ScriptBuf as Script;
pub use bitcoin::{OutPoint, Txid};

// export everything at the top level so it can be used as `elements_blind::TxOut` etc.
pub use crate::blind::{
    BlindAssetProofs, BlindValueProofs, ConfidentialTxOutError, RangeProofMessage,
    RangeProofPolicy, SurjectionInput, TxOutError, TxOutSecrets, UnblindError,
};
pub use crate::fast_merkle_root::fast_merkle_root;
pub use crate::issuance::{AssetId, ContractHash};
pub use crate::pset::{
    blind_pset, BlindingRequest, BlindingSecrets, BlindingStatus, IssuanceBlindingKeys,
    PartiallySignedTransaction,
};
pub use crate::transaction::{TxOut, TxOutWitness};
