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

//! # Partially Signed Elements Transactions (PSET)
//!
//! In-memory model of a version 2 PSET, as defined in BIP370 and extended
//! by Elements, restricted to the fields that take part in blinding. Parsing
//! and serializing the container is left to other crates.

mod blind;
mod error;
#[macro_use]
mod macros;
mod map;

use crate::{OutPoint, Txid};

pub use self::blind::{blind_pset, BlindingRequest, BlindingSecrets, IssuanceBlindingKeys};
pub use self::error::{BlindingStatus, Error};
pub use self::map::{Global, Input, Output};

/// A Partially Signed Transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartiallySignedTransaction {
    /// The key-value pairs for all global data.
    pub global: Global,
    /// The corresponding key-value map for each input in the unsigned
    /// transaction.
    pub inputs: Vec<Input>,
    /// The corresponding key-value map for each output in the unsigned
    /// transaction.
    pub outputs: Vec<Output>,
}

impl PartiallySignedTransaction {
    /// Create an empty version 2 PSET
    pub fn new_v2() -> Self {
        PartiallySignedTransaction::default()
    }

    /// Add an input to pset.
    pub fn add_input(&mut self, inp: Input) {
        self.inputs.push(inp);
    }

    /// Add an output to pset.
    pub fn add_output(&mut self, out: Output) {
        self.outputs.push(out);
    }

    /// Accessor for the number of inputs currently in the PSET
    pub fn n_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Accessor for the number of outputs currently in the PSET
    pub fn n_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Accessor for the inputs of the PSET
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Mutable accessor for the inputs of the PSET
    pub fn inputs_mut(&mut self) -> &mut [Input] {
        &mut self.inputs
    }

    /// Accessor for the outputs of the PSET
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Mutable accessor for the outputs of the PSET
    pub fn outputs_mut(&mut self) -> &mut [Output] {
        &mut self.outputs
    }

    /// Get the input at `index`
    pub fn input(&self, index: usize) -> Result<&Input, Error> {
        self.inputs.get(index).ok_or(Error::InputIndexOutOfRange {
            index,
            n_inputs: self.inputs.len(),
        })
    }

    /// Get the output at `index`
    pub fn output(&self, index: usize) -> Result<&Output, Error> {
        self.outputs.get(index).ok_or(Error::OutputIndexOutOfRange {
            index,
            n_outputs: self.outputs.len(),
        })
    }

    /// Accessor for the "unique identifier" of this PSET, to be used when merging
    pub fn unique_id(&self) -> Vec<(Txid, u32)> {
        self.inputs
            .iter()
            .map(|i| (i.previous_txid, i.previous_output_index))
            .collect()
    }

    /// The outpoints spent by this PSET
    pub fn previous_outpoints(&self) -> Vec<OutPoint> {
        self.inputs.iter().map(Input::previous_outpoint).collect()
    }

    /// Attempt to merge with another `PartiallySignedTransaction`.
    ///
    /// Both must spend the same prevouts in the same order and have the same
    /// number of outputs. This is how the blinders of a multi-party
    /// transaction combine their work.
    pub fn merge(&mut self, other: Self) -> Result<(), self::Error> {
        if self.unique_id() != other.unique_id() {
            return Err(Error::UniqueIdMismatch {
                expected: self.unique_id(),
                actual: other.unique_id(),
            });
        }
        if self.n_outputs() != other.n_outputs() {
            return Err(Error::OutputCountMismatch);
        }

        self.global.merge(other.global)?;

        for (self_input, other_input) in self.inputs.iter_mut().zip(other.inputs.into_iter()) {
            self_input.merge(other_input)?;
        }

        for (self_output, other_output) in self.outputs.iter_mut().zip(other.outputs.into_iter()) {
            self_output.merge(other_output)?;
        }

        Ok(())
    }
}
