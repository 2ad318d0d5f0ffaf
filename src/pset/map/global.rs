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

use secp256k1_zkp::Tweak;

use crate::pset;

/// Global data of a version 2 PSET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Global {
    /// Transaction version. Must be 2.
    pub tx_version: u32,
    /// Scalar offsets published by blinders that did not balance the
    /// transaction themselves. The final blinder folds them into its last
    /// value blinding factor.
    pub scalars: Vec<Tweak>,
}

impl Default for Global {
    fn default() -> Self {
        Global {
            tx_version: 2,
            scalars: Vec::new(),
        }
    }
}

impl Global {
    /// Merge another global map into this one. Scalars are a set.
    pub fn merge(&mut self, other: Self) -> Result<(), pset::Error> {
        if self.tx_version != other.tx_version {
            return Err(pset::Error::MergeConflict(format!(
                "tx version {} and {}",
                self.tx_version, other.tx_version
            )));
        }
        for scalar in other.scalars {
            if !self.scalars.contains(&scalar) {
                self.scalars.push(scalar);
            }
        }
        Ok(())
    }
}
