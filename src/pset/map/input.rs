// Rust Bitcoin Library
// Written by
//   The Rust Bitcoin developers
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

use bitcoin::hashes::sha256;
use secp256k1_zkp::{PedersenCommitment, RangeProof, Tweak, ZERO_TWEAK};

use crate::confidential;
use crate::issuance::{AssetId, ContractHash};
use crate::pset;
use crate::{OutPoint, TxOut, Txid};

/// A key-value map for an input of the corresponding index in the unsigned
/// transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    /// The transaction output this input spends. Required to blind, since
    /// its asset generator is part of every surjection proof domain.
    pub witness_utxo: Option<TxOut>,
    /// Prevout TXID of the input
    pub previous_txid: Txid,
    /// Prevout vout of the input
    pub previous_output_index: u32,
    /// Issuance value amount
    pub issuance_value_amount: Option<u64>,
    /// Issuance value commitment
    pub issuance_value_comm: Option<PedersenCommitment>,
    /// Issuance value rangeproof
    pub issuance_value_rangeproof: Option<Box<RangeProof>>,
    /// Issuance keys rangeproof
    pub issuance_keys_rangeproof: Option<Box<RangeProof>>,
    /// Issuance inflation keys amount
    pub issuance_inflation_keys: Option<u64>,
    /// Issuance inflation keys commitment
    pub issuance_inflation_keys_comm: Option<PedersenCommitment>,
    /// Issuance blinding nonce, non zero for reissuances
    pub issuance_blinding_nonce: Option<Tweak>,
    /// Issuance asset entropy. The contract hash for a new issuance, the
    /// asset entropy for a reissuance.
    pub issuance_asset_entropy: Option<[u8; 32]>,
    /// Proof that the blinded issuance value matches the explicit amount
    pub in_issuance_blind_value_proof: Option<Box<RangeProof>>,
    /// Proof that the blinded inflation keys match the explicit amount
    pub in_issuance_blind_inflation_keys_proof: Option<Box<RangeProof>>,
}

impl Input {
    /// Create a pset input spending `outpoint`
    pub fn from_prevout(outpoint: OutPoint) -> Self {
        Input {
            witness_utxo: None,
            previous_txid: outpoint.txid,
            previous_output_index: outpoint.vout,
            issuance_value_amount: None,
            issuance_value_comm: None,
            issuance_value_rangeproof: None,
            issuance_keys_rangeproof: None,
            issuance_inflation_keys: None,
            issuance_inflation_keys_comm: None,
            issuance_blinding_nonce: None,
            issuance_asset_entropy: None,
            in_issuance_blind_value_proof: None,
            in_issuance_blind_inflation_keys_proof: None,
        }
    }

    /// The outpoint this input spends
    pub fn previous_outpoint(&self) -> OutPoint {
        OutPoint {
            txid: self.previous_txid,
            vout: self.previous_output_index,
        }
    }

    /// The issued amount. An explicit zero is treated as no issuance.
    pub fn issuance_amount(&self) -> confidential::Value {
        Self::issuance_field(self.issuance_value_amount, self.issuance_value_comm)
    }

    /// The issued reissuance token amount. An explicit zero is treated as no
    /// token issuance.
    pub fn issuance_inflation_keys_amount(&self) -> confidential::Value {
        Self::issuance_field(self.issuance_inflation_keys, self.issuance_inflation_keys_comm)
    }

    fn issuance_field(amount: Option<u64>, comm: Option<PedersenCommitment>) -> confidential::Value {
        match (amount, comm) {
            (_, Some(comm)) => confidential::Value::Confidential(comm),
            (Some(0), None) | (None, None) => confidential::Value::Null,
            (Some(x), None) => confidential::Value::Explicit(x),
        }
    }

    /// If the pset input has issuance
    pub fn has_issuance(&self) -> bool {
        !self.issuance_amount().is_null() || !self.issuance_inflation_keys_amount().is_null()
    }

    /// Whether this issuance reissues an existing asset
    pub fn is_reissuance(&self) -> bool {
        self.issuance_blinding_nonce.map_or(false, |n| n != ZERO_TWEAK)
    }

    /// The asset entropy of this issuance
    pub fn issuance_entropy(&self) -> sha256::Midstate {
        let entropy = self.issuance_asset_entropy.unwrap_or_default();
        if self.is_reissuance() {
            sha256::Midstate::from_byte_array(entropy)
        } else {
            let contract_hash = ContractHash::from_byte_array(entropy);
            AssetId::generate_asset_entropy(self.previous_outpoint(), contract_hash)
        }
    }

    /// Returns the issued asset id and the reissuance token id of this
    /// issuance.
    ///
    /// The token id depends on whether the issued amount is confidential,
    /// which is passed in by the caller since the amount may be about to be
    /// blinded.
    pub fn issuance_ids(&self, confidential_amount: bool) -> (AssetId, AssetId) {
        let entropy = self.issuance_entropy();
        let asset_id = AssetId::from_entropy(entropy);
        let token_id = AssetId::reissuance_token_from_entropy(entropy, confidential_amount);

        (asset_id, token_id)
    }

    /// Merge another input spending the same prevout into this one
    pub fn merge(&mut self, other: Self) -> Result<(), pset::Error> {
        // The prev txids and output must be the same.
        // because unique ids are the same

        merge!(witness_utxo, self, other);

        merge!(issuance_value_amount, self, other);
        merge_strict!(issuance_value_comm, self, other);
        merge!(issuance_value_rangeproof, self, other);
        merge!(issuance_keys_rangeproof, self, other);
        merge!(issuance_inflation_keys, self, other);
        merge_strict!(issuance_inflation_keys_comm, self, other);
        merge!(issuance_blinding_nonce, self, other);
        merge!(issuance_asset_entropy, self, other);
        merge!(in_issuance_blind_value_proof, self, other);
        merge!(in_issuance_blind_inflation_keys_proof, self, other);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn prevout() -> OutPoint {
        OutPoint::from_str("05a047c98e82a848dee94efcf32462b065198bebf2404d201ba2e06db30b28f4:0")
            .unwrap()
    }

    #[test]
    fn issuance_presence() {
        let mut inp = Input::from_prevout(prevout());
        assert!(!inp.has_issuance());
        inp.issuance_value_amount = Some(0);
        assert!(!inp.has_issuance());
        inp.issuance_inflation_keys = Some(1);
        assert!(inp.has_issuance());
        assert_eq!(inp.issuance_inflation_keys_amount(), confidential::Value::Explicit(1));
        assert!(!inp.is_reissuance());
    }

    #[test]
    fn issuance_ids_match_entropy() {
        let mut inp = Input::from_prevout(prevout());
        inp.issuance_value_amount = Some(1_000);
        let entropy = AssetId::generate_asset_entropy(prevout(), ContractHash::default());
        let (asset, token) = inp.issuance_ids(false);
        assert_eq!(asset, AssetId::from_entropy(entropy));
        assert_eq!(token, AssetId::reissuance_token_from_entropy(entropy, false));
        assert_ne!(inp.issuance_ids(true).1, token);

        // a reissuance carries its entropy directly
        inp.issuance_blinding_nonce = Some(Tweak::from_inner([1; 32]).unwrap());
        inp.issuance_asset_entropy = Some(entropy.to_byte_array());
        assert!(inp.is_reissuance());
        assert_eq!(inp.issuance_ids(false).0, asset);
    }

    #[test]
    fn merge_fills_missing_fields() {
        let mut a = Input::from_prevout(prevout());
        let mut b = a.clone();
        b.issuance_value_amount = Some(5);
        b.witness_utxo = Some(TxOut::default());
        a.merge(b.clone()).unwrap();
        assert_eq!(a, b);
    }
}
