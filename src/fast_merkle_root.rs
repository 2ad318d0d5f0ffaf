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

use crate::hashes::{sha256, Hash, HashEngine};

/// A single SHA256 compression of `left || right`, without padding.
fn compress(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    engine.input(left);
    engine.input(right);
    engine.midstate().to_byte_array()
}

/// Compute the Merkle root of the given leaves using SHA256 midstates only.
///
/// This is the tree used by Elements for issuance entropy and asset ids. It
/// is *not* the double-SHA256 Bitcoin merkle tree: a node without a sibling
/// is promoted unchanged rather than hashed with itself, so the tree over `n`
/// leaves is the tree over the largest power of two below `n` joined with
/// the tree over the remainder. The root of no leaves is all zeroes.
pub fn fast_merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    match leaves.len() {
        0 => [0; 32],
        1 => leaves[0],
        n => {
            // largest power of two strictly below n
            let split = 1usize << (usize::BITS - 1 - (n - 1).leading_zeros());
            let (left, right) = leaves.split_at(split);
            compress(&fast_merkle_root(left), &fast_merkle_root(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compress, fast_merkle_root};
    use bitcoin::hex::FromHex;

    fn leaf(b: u8) -> [u8; 32] {
        [b; 32]
    }

    fn reversed_hex(s: &str) -> [u8; 32] {
        let mut bytes = <[u8; 32]>::from_hex(s).unwrap();
        bytes.reverse();
        bytes
    }

    #[test]
    fn elements_core_vectors() {
        let test_leaves = [
            "b66b041650db0f297b53f8d93c0e8706925bf3323f8c59c14a6fac37bfdcd06f",
            "99cb2fa68b2294ae133550a9f765fc755d71baa7b24389fed67d1ef3e5cb0255",
            "257e1b2fa49dd15724c67bac4df7911d44f6689860aa9f65a881ae0a2f40a303",
            "b67b0b9f093fa83d5e44b707ab962502b7ac58630e556951136196e65483bb80",
        ];
        let test_roots = [
            "0000000000000000000000000000000000000000000000000000000000000000",
            "b66b041650db0f297b53f8d93c0e8706925bf3323f8c59c14a6fac37bfdcd06f",
            "f752938da0cb71c051aabdd5a86658e8d0b7ac00e1c2074202d8d2a79d8a6cf6",
            "245d364a28e9ad20d522c4a25ffc6a7369ab182f884e1c7dcd01aa3d32896bd3",
            "317d6498574b6ca75ee0368ec3faec75e096e245bdd5f36e8726fa693f775dfc",
        ];

        let mut leaves = vec![];
        for (i, root) in test_roots.iter().enumerate() {
            assert_eq!(fast_merkle_root(&leaves), reversed_hex(root), "root #{}", i);
            if let Some(l) = test_leaves.get(i) {
                leaves.push(reversed_hex(l));
            }
        }
    }

    #[test]
    fn odd_nodes_are_promoted() {
        let ab = compress(&leaf(1), &leaf(2));
        let cd = compress(&leaf(3), &leaf(4));
        let abcd = compress(&ab, &cd);

        assert_eq!(fast_merkle_root(&[leaf(1), leaf(2), leaf(3)]), compress(&ab, &leaf(3)));
        assert_eq!(
            fast_merkle_root(&[leaf(1), leaf(2), leaf(3), leaf(4), leaf(5)]),
            compress(&abcd, &leaf(5))
        );
        assert_eq!(
            fast_merkle_root(&[leaf(1), leaf(2), leaf(3), leaf(4), leaf(5), leaf(6)]),
            compress(&abcd, &compress(&leaf(5), &leaf(6)))
        );
    }
}
