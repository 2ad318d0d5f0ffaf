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

//! # Transaction outputs
//!

use secp256k1_zkp::{RangeProof, SurjectionProof};

use crate::confidential;
use crate::issuance::AssetId;
use crate::Script;

/// Transaction output
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct TxOut {
    /// Committed asset
    pub asset: confidential::Asset,
    /// Committed amount
    pub value: confidential::Value,
    /// Nonce (ECDH key passed to recipient)
    pub nonce: confidential::Nonce,
    /// Scriptpubkey
    pub script_pubkey: Script,
    /// Witness data, logically part of the output but carried separately
    /// by its containing transaction.
    pub witness: TxOutWitness,
}

/// Transaction output witness
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct TxOutWitness {
    /// Surjection proof showing that the asset commitment is legitimate
    pub surjection_proof: Option<Box<SurjectionProof>>,
    /// Rangeproof showing that the value commitment is legitimate
    pub rangeproof: Option<Box<RangeProof>>,
}

impl TxOutWitness {
    /// Whether this witness is null
    pub fn is_empty(&self) -> bool {
        self.surjection_proof.is_none() && self.rangeproof.is_none()
    }
}

impl TxOut {
    /// Create a new explicit output.
    pub fn new_explicit(amount: u64, asset: AssetId, script_pubkey: Script) -> TxOut {
        TxOut {
            asset: confidential::Asset::Explicit(asset),
            value: confidential::Value::Explicit(amount),
            nonce: confidential::Nonce::Null,
            script_pubkey,
            witness: TxOutWitness::default(),
        }
    }

    /// Create a new fee output.
    pub fn new_fee(amount: u64, asset: AssetId) -> TxOut {
        TxOut::new_explicit(amount, asset, Script::new())
    }

    /// Whether or not this output is a fee output
    pub fn is_fee(&self) -> bool {
        self.script_pubkey.is_empty() && self.value.is_explicit() && self.asset.is_explicit()
    }

    /// Whether this output has a confidential asset or value but not both.
    pub fn is_partially_blinded(&self) -> bool {
        self.asset.is_confidential() != self.value.is_confidential()
    }
}
