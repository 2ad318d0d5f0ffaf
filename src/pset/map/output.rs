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

use bitcoin::PublicKey;
use secp256k1_zkp::{Generator, PedersenCommitment, RangeProof, SurjectionProof};

use crate::confidential;
use crate::issuance::AssetId;
use crate::pset;
use crate::{Script, TxOut, TxOutWitness};

/// A key-value map for an output of the corresponding index in the unsigned
/// transaction.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Output {
    /// The output's amount in satoshis
    pub amount: Option<u64>,
    /// The script for this output, also known as the scriptPubKey.
    pub script_pubkey: Script,
    /// The output's asset
    pub asset: Option<AssetId>,
    /// Output value commitment
    pub amount_comm: Option<PedersenCommitment>,
    /// Output asset commitment
    pub asset_comm: Option<Generator>,
    /// Output value rangeproof
    pub value_rangeproof: Option<Box<RangeProof>>,
    /// Output Asset surjection proof
    pub asset_surjection_proof: Option<Box<SurjectionProof>>,
    /// Blinding pubkey which is used in receiving address
    pub blinding_key: Option<PublicKey>,
    /// The ephemeral pk sampled by sender
    pub ecdh_pubkey: Option<PublicKey>,
    /// The index of the input whose owner should blind this output
    pub blinder_index: Option<u32>,
    /// The explicit value proof that proves that the value commitment
    /// matches the explicit amount.
    pub blind_value_proof: Option<Box<RangeProof>>,
    /// The explicit asset proof that proves that the asset commitment
    /// matches the explicit asset.
    pub blind_asset_proof: Option<Box<SurjectionProof>>,
}

impl Output {
    /// Create a new explicit pset output
    pub fn new_explicit(
        script: Script,
        amount: u64,
        asset: AssetId,
        blinding_key: Option<PublicKey>,
    ) -> Self {
        Self {
            script_pubkey: script,
            amount: Some(amount),
            blinding_key,
            asset: Some(asset),
            ..Default::default()
        }
    }

    /// Create a pset output from a transaction output
    pub fn from_txout(txout: TxOut) -> Self {
        let mut rv = Self {
            script_pubkey: txout.script_pubkey,
            value_rangeproof: txout.witness.rangeproof,
            asset_surjection_proof: txout.witness.surjection_proof,
            ..Default::default()
        };

        match txout.value {
            confidential::Value::Null => {}
            confidential::Value::Explicit(x) => rv.amount = Some(x),
            confidential::Value::Confidential(comm) => rv.amount_comm = Some(comm),
        }
        match txout.asset {
            confidential::Asset::Null => {}
            confidential::Asset::Explicit(x) => rv.asset = Some(x),
            confidential::Asset::Confidential(comm) => rv.asset_comm = Some(comm),
        }
        if let confidential::Nonce::Confidential(pk) = txout.nonce {
            rv.ecdh_pubkey = Some(PublicKey::new(pk));
        }
        rv
    }

    /// Convert to the transaction output it will become. Commitments take
    /// precedence over the explicit fields.
    pub fn to_txout(&self) -> TxOut {
        TxOut {
            asset: match (self.asset_comm, self.asset) {
                (Some(gen), _) => confidential::Asset::Confidential(gen),
                (None, Some(asset)) => confidential::Asset::Explicit(asset),
                (None, None) => confidential::Asset::Null,
            },
            value: match (self.amount_comm, self.amount) {
                (Some(comm), _) => confidential::Value::Confidential(comm),
                (None, Some(x)) => confidential::Value::Explicit(x),
                (None, None) => confidential::Value::Null,
            },
            nonce: self
                .ecdh_pubkey
                .map(|pk| confidential::Nonce::Confidential(pk.inner))
                .unwrap_or_default(),
            script_pubkey: self.script_pubkey.clone(),
            witness: TxOutWitness {
                surjection_proof: self.asset_surjection_proof.clone(),
                rangeproof: self.value_rangeproof.clone(),
            },
        }
    }

    /// IsBlinded from elements core
    /// This indicates whether the output is marked for blinding
    pub fn is_marked_for_blinding(&self) -> bool {
        self.blinding_key.is_some()
    }

    /// IsPartiallyBlinded from elements core
    pub fn is_partially_blinded(&self) -> bool {
        self.is_marked_for_blinding()
            && (self.amount_comm.is_some()
                || self.asset_comm.is_some()
                || self.value_rangeproof.is_some()
                || self.asset_surjection_proof.is_some()
                || self.ecdh_pubkey.is_some())
    }

    /// IsFullyBlinded from elements core
    pub fn is_fully_blinded(&self) -> bool {
        self.is_marked_for_blinding()
            && self.amount_comm.is_some()
            && self.asset_comm.is_some()
            && self.value_rangeproof.is_some()
            && self.asset_surjection_proof.is_some()
            && self.ecdh_pubkey.is_some()
    }

    /// Merge another output of the same transaction into this one
    pub fn merge(&mut self, other: Self) -> Result<(), pset::Error> {
        merge!(amount, self, other);
        merge!(asset, self, other);
        merge!(blinding_key, self, other);
        merge!(blinder_index, self, other);

        // the blinding fields come as a set from a single blinder
        if self.amount_comm.is_some() && other.amount_comm.is_some() {
            if self.amount_comm != other.amount_comm || self.asset_comm != other.asset_comm {
                return Err(pset::Error::MergeConflict(
                    "output blinded by two parties".to_owned(),
                ));
            }
        } else if self.amount_comm.is_none() && other.amount_comm.is_some() {
            self.amount_comm = other.amount_comm;
            self.asset_comm = other.asset_comm;
            self.ecdh_pubkey = other.ecdh_pubkey;
            self.value_rangeproof = other.value_rangeproof;
            self.asset_surjection_proof = other.asset_surjection_proof;
            self.blind_value_proof = other.blind_value_proof;
            self.blind_asset_proof = other.blind_asset_proof;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn key() -> PublicKey {
        PublicKey::from_str("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
            .unwrap()
    }

    #[test]
    fn explicit_roundtrip_through_txout() {
        let spk = Script::from(vec![0x51]);
        let out = Output::new_explicit(spk.clone(), 10, AssetId::LIQUID_BTC, Some(key()));
        assert!(out.is_marked_for_blinding());
        assert!(!out.is_partially_blinded());
        assert!(!out.is_fully_blinded());

        let txout = out.to_txout();
        assert_eq!(txout, TxOut::new_explicit(10, AssetId::LIQUID_BTC, spk));
        let back = Output::from_txout(txout);
        assert_eq!(back.amount, Some(10));
        assert_eq!(back.asset, Some(AssetId::LIQUID_BTC));
        assert_eq!(back.blinding_key, None);
    }

    #[test]
    fn merge_takes_blinding_from_other() {
        let mut a = Output::new_explicit(Script::new(), 10, AssetId::LIQUID_BTC, Some(key()));
        let mut b = a.clone();
        b.ecdh_pubkey = Some(key());
        b.blinder_index = Some(0);
        a.merge(b.clone()).unwrap();
        // no commitment, so the blinding set is not taken
        assert_eq!(a.ecdh_pubkey, None);
        assert_eq!(a.blinder_index, Some(0));
    }
}
