// Rust Elements Library
// Written in 2019 by
//   The Elements developers
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

//! Asset Issuance

use bitcoin::hex::HexToArrayError;
use bitcoin::OutPoint;
use secp256k1_zkp::Tag;

use crate::fast_merkle_root::fast_merkle_root;
use crate::hashes::{sha256, sha256d, Hash};

/// The zero hash.
const ZERO32: [u8; 32] = [0; 32];
/// The one hash.
const ONE32: [u8; 32] = {
    let mut one = [0; 32];
    one[0] = 1;
    one
};
/// The two hash.
const TWO32: [u8; 32] = {
    let mut two = [0; 32];
    two[0] = 2;
    two
};

/// An issued asset ID.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct AssetId([u8; 32]);

/// The hash of an issuance contract. The all-zero hash means no contract.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct ContractHash([u8; 32]);

display_from_str_reversed_hex!(
    AssetId,
    HexToArrayError,
    |a: &AssetId| a.0,
    |b| Ok::<_, HexToArrayError>(AssetId(b))
);
serde_string_impl!(AssetId, "a hex-encoded asset id");

display_from_str_reversed_hex!(
    ContractHash,
    HexToArrayError,
    |c: &ContractHash| c.0,
    |b| Ok::<_, HexToArrayError>(ContractHash(b))
);
serde_string_impl!(ContractHash, "a hex-encoded contract hash");

impl ContractHash {
    /// Wrap the raw bytes of a contract hash.
    pub const fn from_byte_array(bytes: [u8; 32]) -> ContractHash {
        ContractHash(bytes)
    }

    /// The raw bytes of this contract hash.
    pub const fn to_byte_array(self) -> [u8; 32] {
        self.0
    }
}

impl AssetId {
    /// The asset ID of Liquid Bitcoin (L-BTC) on the Liquid network.
    pub const LIQUID_BTC: AssetId = AssetId([
        0x6d, 0x52, 0x1c, 0x38, 0xec, 0x1e, 0xa1, 0x57, 0x34, 0xae, 0x22, 0xb7, 0xc4, 0x60, 0x64,
        0x41, 0x28, 0x29, 0xc0, 0xd0, 0x57, 0x9f, 0x0a, 0x71, 0x3d, 0x1c, 0x04, 0xed, 0xe9, 0x79,
        0x02, 0x6f,
    ]);

    /// Create an [`AssetId`] from its raw bytes.
    pub const fn from_byte_array(bytes: [u8; 32]) -> AssetId {
        AssetId(bytes)
    }

    /// The raw bytes of this [`AssetId`].
    pub const fn to_byte_array(self) -> [u8; 32] {
        self.0
    }

    /// Whether this is the all-zero asset, which never names a real asset.
    pub fn is_null(&self) -> bool {
        self.0 == ZERO32
    }

    /// Generate the asset entropy from the issuance prevout and the contract hash.
    pub fn generate_asset_entropy(prevout: OutPoint, contract_hash: ContractHash) -> sha256::Midstate {
        // E : entropy
        // I : prevout
        // C : contract
        // E = H( H(I) || H(C) )
        let prevout_hash = sha256d::Hash::hash(&bitcoin::consensus::serialize(&prevout));
        sha256::Midstate::from_byte_array(fast_merkle_root(&[
            prevout_hash.to_byte_array(),
            contract_hash.to_byte_array(),
        ]))
    }

    /// Calculate the asset ID from the asset entropy.
    pub fn from_entropy(entropy: sha256::Midstate) -> AssetId {
        // H_a : asset tag
        // E   : entropy
        // H_a = H( E || 0 )
        AssetId(fast_merkle_root(&[entropy.to_byte_array(), ZERO32]))
    }

    /// Calculate the reissuance token asset ID from the asset entropy.
    pub fn reissuance_token_from_entropy(entropy: sha256::Midstate, confidential: bool) -> AssetId {
        // H_a : asset reissuance tag
        // E   : entropy
        // if not fConfidential:
        //     H_a = H( E || 1 )
        // else
        //     H_a = H( E || 2 )
        let second = if confidential { TWO32 } else { ONE32 };
        AssetId(fast_merkle_root(&[entropy.to_byte_array(), second]))
    }

    /// Convert the asset ID into a [`Tag`] for use in generators and surjection proofs.
    pub fn into_tag(self) -> Tag {
        Tag::from(self.0)
    }
}
