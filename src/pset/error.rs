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

use std::{error, fmt};

use crate::Txid;

/// Ways that building or combining a Partially Signed Transaction might fail.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Input index is out of range for this PSET
    InputIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of inputs
        n_inputs: usize,
    },
    /// Output index is out of range for this PSET
    OutputIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of outputs
        n_outputs: usize,
    },
    /// Attempting to merge with a PSET spending different prevouts.
    UniqueIdMismatch {
        /// Expected
        expected: Vec<(Txid, u32)>,
        /// Actual
        actual: Vec<(Txid, u32)>,
    },
    /// Data inconsistency/conflicting data during merge procedure
    MergeConflict(String),
    /// Output Count Mismatch
    OutputCountMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InputIndexOutOfRange { index, n_inputs } => write!(
                f,
                "input index {} out of range for PSET with {} inputs",
                index, n_inputs
            ),
            Error::OutputIndexOutOfRange { index, n_outputs } => write!(
                f,
                "output index {} out of range for PSET with {} outputs",
                index, n_outputs
            ),
            Error::UniqueIdMismatch {
                expected: ref e,
                actual: ref a,
            } => write!(f, "different prevouts: expected {:?}, actual {:?}", e, a),
            Error::MergeConflict(ref s) => {
                write!(f, "Merge conflict: {}", s)
            }
            Error::OutputCountMismatch => {
                f.write_str("PSETs to merge have a different number of outputs")
            }
        }
    }
}

impl error::Error for Error {}

/// Outcome of blinding a Partially Signed Transaction.
///
/// Every failing variant guarantees the PSET was left untouched.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum BlindingStatus {
    /// All outputs were blinded.
    Ok,
    /// An input is missing the UTXO data required to blind.
    NeedsUtxos,
    /// An asset is missing, null, or not among the inputs.
    InvalidAsset,
    /// An asset commitment could not be built or does not match its secrets.
    InvalidAssetCommitment,
    /// The blinding scalars could not be balanced.
    ScalarUnable,
    /// A value blinding factor is invalid or does not match its commitment.
    InvalidBlinder,
    /// A rangeproof or asset surjection proof could not be created.
    AspUnable,
}

impl BlindingStatus {
    /// The fixed human readable text of this status.
    pub fn error_string(self) -> &'static str {
        match self {
            BlindingStatus::Ok => "No error",
            BlindingStatus::NeedsUtxos => "Inputs are missing UTXO information",
            BlindingStatus::InvalidAsset => "Input asset is invalid",
            BlindingStatus::InvalidAssetCommitment => "Input asset commitment is invalid",
            BlindingStatus::ScalarUnable => "Unable to compute scalar offset",
            BlindingStatus::InvalidBlinder => "Provided blinder is invalid",
            BlindingStatus::AspUnable => "Unable to create asset surjection proof",
        }
    }

    /// Whether this is [`BlindingStatus::Ok`].
    pub fn is_ok(self) -> bool {
        self == BlindingStatus::Ok
    }
}

impl fmt::Display for BlindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.error_string())
    }
}

impl error::Error for BlindingStatus {}
