// Rust Elements Library
// Written in 2018 by
//   Sanket K <sanket1729@blockstream.com>
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

//! # Output Blinding
//!
//! The building blocks of confidential outputs: asset and value commitments,
//! the ECDH rangeproof nonce, rangeproofs and asset surjection proofs.
//!

use std::{self, fmt};

use log::trace;
use secp256k1_zkp::{
    self,
    rand::{CryptoRng, RngCore},
    Generator, PedersenCommitment, PublicKey, RangeProof, Secp256k1, SecretKey, Signing,
    SurjectionProof, Tag, Tweak, Verification, ZERO_TWEAK,
};

use crate::confidential::{Asset, AssetBlindingFactor, Nonce, Value, ValueBlindingFactor};
use crate::pset::BlindingStatus;
use crate::{AssetId, Script, TxOut};

/// Transaction Output related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TxOutError {
    /// Unexpected Null asset
    UnExpectedNullAsset,
}

impl std::error::Error for TxOutError {}

impl fmt::Display for TxOutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            TxOutError::UnExpectedNullAsset => write!(f, "UnExpected Null Asset"),
        }
    }
}

/// Errors encountered when constructing confidential transaction outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidentialTxOutError {
    /// Error originated in `secp256k1_zkp`.
    Upstream(secp256k1_zkp::Error),
    /// General TxOut errors
    TxOutError(usize, TxOutError),
    /// None of the surjection inputs is known to carry the output asset
    NoMatchingInput,
    /// The surjection proof does not verify against its own domain
    SurjectionProofInvalid,
}

impl fmt::Display for ConfidentialTxOutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConfidentialTxOutError::Upstream(e) => write!(f, "{}", e),
            ConfidentialTxOutError::TxOutError(i, e) => {
                write!(f, "Txout error {} at index: {}", e, i)
            }
            ConfidentialTxOutError::NoMatchingInput => {
                write!(f, "No known input carries the output asset")
            }
            ConfidentialTxOutError::SurjectionProofInvalid => {
                write!(f, "Created surjection proof does not verify")
            }
        }
    }
}

impl std::error::Error for ConfidentialTxOutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfidentialTxOutError::Upstream(e) => Some(e),
            ConfidentialTxOutError::TxOutError(_, e) => Some(e),
            _ => None,
        }
    }
}

impl From<secp256k1_zkp::Error> for ConfidentialTxOutError {
    fn from(from: secp256k1_zkp::Error) -> Self {
        ConfidentialTxOutError::Upstream(from)
    }
}

impl From<ConfidentialTxOutError> for BlindingStatus {
    fn from(e: ConfidentialTxOutError) -> Self {
        match e {
            ConfidentialTxOutError::NoMatchingInput
            | ConfidentialTxOutError::TxOutError(_, TxOutError::UnExpectedNullAsset) => {
                BlindingStatus::InvalidAsset
            }
            _ => BlindingStatus::AspUnable,
        }
    }
}

/// The Rangeproof message
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RangeProofMessage {
    /// The asset id
    pub asset: AssetId,
    /// The asset blinding factor
    pub bf: AssetBlindingFactor,
}

impl RangeProofMessage {
    /// Converts the message to bytes
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut message = [0u8; 64];

        message[..32].copy_from_slice(&self.asset.to_byte_array());
        message[32..].copy_from_slice(&self.bf.to_byte_array());

        message
    }
}

/// Parameters of the rangeproofs attached to blinded outputs.
#[cfg_attr(
    feature = "serde",
    derive(actual_serde::Serialize, actual_serde::Deserialize),
    serde(crate = "actual_serde")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeProofPolicy {
    /// Smallest value the proof covers
    pub min_value: u64,
    /// Base 10 exponent of the proven range
    pub exp: i32,
    /// Minimum number of private mantissa bits
    pub min_bits: u8,
}

impl Default for RangeProofPolicy {
    fn default() -> Self {
        RangeProofPolicy {
            min_value: TxOut::RANGEPROOF_MIN_VALUE,
            exp: TxOut::RANGEPROOF_EXP_SHIFT,
            min_bits: TxOut::RANGEPROOF_MIN_PRIV_BITS,
        }
    }
}

/// Information about Transaction Input Asset
#[cfg_attr(
    feature = "serde",
    derive(actual_serde::Serialize, actual_serde::Deserialize),
    serde(crate = "actual_serde")
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TxOutSecrets {
    /// Asset
    pub asset: AssetId,
    /// Asset Blinding Factor
    pub asset_bf: AssetBlindingFactor,
    /// Value
    pub value: u64,
    /// Value Blinding factor
    pub value_bf: ValueBlindingFactor,
}

impl TxOutSecrets {
    /// Create a new [`TxOutSecrets`]
    pub fn new(
        asset: AssetId,
        asset_bf: AssetBlindingFactor,
        value: u64,
        value_bf: ValueBlindingFactor,
    ) -> Self {
        Self {
            asset,
            asset_bf,
            value,
            value_bf,
        }
    }

    /// Secrets of an explicit output, whose blinding factors are zero.
    pub fn explicit(asset: AssetId, value: u64) -> Self {
        Self::new(asset, AssetBlindingFactor::zero(), value, ValueBlindingFactor::zero())
    }

    /// Gets the surjection inputs from [`TxOutSecrets`]
    pub fn surjection_inputs<C: Signing>(&self, secp: &Secp256k1<C>) -> (Generator, Tag, Tweak) {
        let tag = self.asset.into_tag();
        let bf = self.asset_bf.into_inner();
        let gen = Generator::new_blinded(secp, tag, bf);
        (gen, tag, bf)
    }

    /// Gets the required fields for last value blinding factor calculation from [`TxOutSecrets`]
    pub fn value_blind_inputs(&self) -> (u64, AssetBlindingFactor, ValueBlindingFactor) {
        (self.value, self.asset_bf, self.value_bf)
    }

    /// The scalar offset `value * asset_bf + value_bf` of the commitment
    /// these secrets open.
    pub fn scalar_offset(&self) -> Result<ValueBlindingFactor, secp256k1_zkp::Error> {
        ValueBlindingFactor::scalar_offset(self.value, self.asset_bf, self.value_bf)
    }
}

/// Data structure used to provide inputs to [`SurjectionProof`] methods.
/// Inputs for which we don't know the secrets can be [`SurjectionInput::Unknown`],
/// while inputs from user's wallet should be [`SurjectionInput::Known`]
///
/// Explicit assets can be provided as [`SurjectionInput::Unknown`]. There is no
/// need to construct a `Known` variant with secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurjectionInput {
    /// Unknown inputs for whom we don't know the secrets(asset tags/blinding factors)
    Unknown(Asset),
    /// Known inputs for whom we know blinding factors
    Known {
        /// Asset
        asset: AssetId,
        /// Asset Blinding Factor
        asset_bf: AssetBlindingFactor,
    },
}

impl From<TxOutSecrets> for SurjectionInput {
    fn from(v: TxOutSecrets) -> Self {
        Self::Known {
            asset: v.asset,
            asset_bf: v.asset_bf,
        }
    }
}

impl From<Asset> for SurjectionInput {
    fn from(v: Asset) -> Self {
        Self::Unknown(v)
    }
}

impl SurjectionInput {
    /// Handy method to convert [`SurjectionInput`] into a surjection target
    /// that can be used while creating a new [`SurjectionProof`].
    ///
    /// Only errors when the input asset is Null.
    pub fn surjection_target<C: Signing>(
        &self,
        secp: &Secp256k1<C>,
    ) -> Result<(Generator, Tag, Tweak), TxOutError> {
        match self {
            SurjectionInput::Unknown(asset) => {
                let gen = asset
                    .into_asset_gen(secp)
                    .ok_or(TxOutError::UnExpectedNullAsset)?;
                // Return the input as 0 tag and 0 tweak. This also correctly handles explicit case
                Ok((gen, Tag::default(), ZERO_TWEAK))
            }
            SurjectionInput::Known { asset, asset_bf } => {
                let tag = asset.into_tag();
                let bf = asset_bf.into_inner();
                let gen = Generator::new_blinded(secp, tag, bf);
                Ok((gen, tag, bf))
            }
        }
    }

    /// The plaintext asset, if known.
    fn known_asset(&self) -> Option<AssetId> {
        match self {
            SurjectionInput::Known { asset, .. } => Some(*asset),
            SurjectionInput::Unknown(_) => None,
        }
    }
}

/// Create the asset commitment (generator) of `asset` blinded by `asset_bf`.
///
/// Returns the confidential asset field together with the bare generator.
pub fn create_asset_commitment<C: Signing>(
    secp: &Secp256k1<C>,
    asset: AssetId,
    asset_bf: AssetBlindingFactor,
) -> Result<(Asset, Generator), BlindingStatus> {
    if asset.is_null() {
        return Err(BlindingStatus::InvalidAsset);
    }
    let conf = Asset::new_confidential(secp, asset, asset_bf);
    let gen = conf.commitment().ok_or(BlindingStatus::InvalidAssetCommitment)?;
    Ok((conf, gen))
}

/// Create the Pedersen commitment to `amount` over the asset generator
/// `asset_gen`, blinded by `value_bf`.
pub fn create_value_commitment<C: Signing>(
    secp: &Secp256k1<C>,
    value_bf: ValueBlindingFactor,
    asset_gen: Generator,
    amount: u64,
) -> (Value, PedersenCommitment) {
    let comm = PedersenCommitment::new(secp, amount, value_bf.into_inner(), asset_gen);
    (Value::Confidential(comm), comm)
}

/// Sample a fresh ephemeral key and derive the rangeproof nonce shared with
/// the owner of `recipient_pk`.
///
/// Returns the ephemeral public key, which goes into the output nonce field,
/// and the nonce.
pub fn generate_rangeproof_ecdh_key<R: RngCore + CryptoRng, C: Signing>(
    rng: &mut R,
    secp: &Secp256k1<C>,
    recipient_pk: &PublicKey,
) -> Result<(PublicKey, SecretKey), BlindingStatus> {
    let (nonce, shared_secret) = Nonce::new_confidential(rng, secp, recipient_pk)
        .map_err(|_| BlindingStatus::AspUnable)?;
    let ephemeral_pk = nonce.commitment().ok_or(BlindingStatus::AspUnable)?;
    Ok((ephemeral_pk, shared_secret))
}

/// Create the rangeproof of a value commitment.
///
/// The proof is rewindable with `nonce` and embeds `asset || asset_bf`
/// as its message. It commits to `spk` and to the output asset generator.
pub fn create_value_rangeproof<C: Signing>(
    secp: &Secp256k1<C>,
    policy: &RangeProofPolicy,
    value_bf: ValueBlindingFactor,
    nonce: SecretKey,
    amount: u64,
    spk: &Script,
    value_commit: PedersenCommitment,
    asset_gen: Generator,
    asset: AssetId,
    asset_bf: AssetBlindingFactor,
) -> Result<RangeProof, BlindingStatus> {
    let msg = RangeProofMessage { asset, bf: asset_bf };
    RangeProof::new(
        secp,
        policy.min_value,
        value_commit,
        amount,
        value_bf.into_inner(),
        &msg.to_bytes(),
        spk.as_bytes(),
        nonce,
        policy.exp,
        policy.min_bits,
        asset_gen,
    )
    .map_err(|_| BlindingStatus::AspUnable)
}

/// Create the asset surjection proof of an output.
///
/// The domain of the proof is the generator of every input. Among the known
/// inputs carrying `asset` one is chosen uniformly at random; the prover only
/// learns the secrets of that one, so the proof is made against it.
pub fn create_asset_surjection_proof<R: RngCore + CryptoRng, C: Signing + Verification>(
    rng: &mut R,
    secp: &Secp256k1<C>,
    inputs: &[SurjectionInput],
    output_asset_bf: AssetBlindingFactor,
    output_gen: Generator,
    asset: AssetId,
) -> Result<SurjectionProof, BlindingStatus> {
    surjection_proof(rng, secp, inputs, output_asset_bf, output_gen, asset)
        .map_err(BlindingStatus::from)
}

/// How many times proving a surjection is retried with a fresh seed
const SURJECTION_PROOF_MAX_ATTEMPTS: usize = 32;

fn surjection_proof<R: RngCore + CryptoRng, C: Signing + Verification>(
    rng: &mut R,
    secp: &Secp256k1<C>,
    inputs: &[SurjectionInput],
    output_asset_bf: AssetBlindingFactor,
    output_gen: Generator,
    asset: AssetId,
) -> Result<SurjectionProof, ConfidentialTxOutError> {
    let mut domain = inputs
        .iter()
        .enumerate()
        .map(|(i, inp)| {
            inp.surjection_target(secp)
                .map_err(|e| ConfidentialTxOutError::TxOutError(i, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let candidates = inputs
        .iter()
        .enumerate()
        .filter(|(_, inp)| inp.known_asset() == Some(asset))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    if candidates.is_empty() {
        return Err(ConfidentialTxOutError::NoMatchingInput);
    }
    let chosen = candidates[(rng.next_u64() % candidates.len() as u64) as usize];

    // hide every other match, the generators stay as they are
    for &i in candidates.iter().filter(|&&i| i != chosen) {
        domain[i].1 = Tag::default();
        domain[i].2 = ZERO_TWEAK;
    }

    // The prover only tries a bounded number of input subsets per seed and
    // with the other matches hidden only subsets holding `chosen` succeed.
    // A fresh seed does not change which input is used.
    let mut attempts = 0;
    let proof = loop {
        match SurjectionProof::new(
            secp,
            rng,
            asset.into_tag(),
            output_asset_bf.into_inner(),
            &domain,
        ) {
            Err(secp256k1_zkp::Error::CannotProveSurjection)
                if attempts < SURJECTION_PROOF_MAX_ATTEMPTS =>
            {
                attempts += 1;
            }
            res => break res?,
        }
    };
    if attempts > 0 {
        trace!("surjection proof found after {} reseeds", attempts);
    }

    let domain_gens = domain.iter().map(|(gen, _, _)| *gen).collect::<Vec<_>>();
    if !proof.verify(secp, output_gen, &domain_gens) {
        return Err(ConfidentialTxOutError::SurjectionProofInvalid);
    }
    Ok(proof)
}

impl TxOut {
    /// Rangeproof minimum value
    pub const RANGEPROOF_MIN_VALUE: u64 = 1;
    /// Rangeproof exponent shift
    pub const RANGEPROOF_EXP_SHIFT: i32 = 0;
    /// Rangeproof Minimum private bits
    pub const RANGEPROOF_MIN_PRIV_BITS: u8 = 52;

    /// Unblinds a transaction output, if it is confidential.
    ///
    /// It returns the secret elements of the value and asset Pedersen commitments.
    pub fn unblind<C: Verification>(
        &self,
        secp: &Secp256k1<C>,
        blinding_key: SecretKey,
    ) -> Result<TxOutSecrets, UnblindError> {
        let (commitment, additional_generator) = match (self.value, self.asset) {
            (Value::Confidential(com), Asset::Confidential(gen)) => (com, gen),
            _ => return Err(UnblindError::NotConfidential),
        };

        let shared_secret = self
            .nonce
            .shared_secret(&blinding_key)
            .ok_or(UnblindError::MissingNonce)?;
        let rangeproof = self
            .witness
            .rangeproof
            .as_ref()
            .ok_or(UnblindError::MissingRangeproof)?;

        let (opening, _) = rangeproof.rewind(
            secp,
            commitment,
            shared_secret,
            self.script_pubkey.as_bytes(),
            additional_generator,
        )?;

        let message: &[u8] = opening.message.as_ref();
        if message.len() < 64 {
            return Err(UnblindError::MalformedMessage);
        }
        let mut asset = [0u8; 32];
        asset.copy_from_slice(&message[..32]);
        let asset = AssetId::from_byte_array(asset);
        let asset_bf = AssetBlindingFactor::from_slice(&message[32..64])?;

        let value = opening.value;
        let value_bf = ValueBlindingFactor::from(opening.blinding_factor);

        Ok(TxOutSecrets {
            asset,
            asset_bf,
            value,
            value_bf,
        })
    }
}

/// Errors encountered when unblinding `TxOut`s.
#[derive(Debug)]
pub enum UnblindError {
    /// The `TxOut` is not fully confidential.
    NotConfidential,
    /// Transaction output does not have a nonce commitment.
    MissingNonce,
    /// Transaction output does not have a rangeproof.
    MissingRangeproof,
    /// The rangeproof message is not an asset id and blinding factor.
    MalformedMessage,
    /// Error originated in `secp256k1_zkp`.
    Upstream(secp256k1_zkp::Error),
}

impl fmt::Display for UnblindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            UnblindError::MissingNonce => write!(f, "missing nonce in txout"),
            UnblindError::MalformedMessage => write!(f, "malformed rangeproof message"),
            UnblindError::Upstream(e) => write!(f, "{}", e),
            UnblindError::NotConfidential => write!(f, "cannot unblind non-confidential txout"),
            UnblindError::MissingRangeproof => write!(f, "missing rangeproof in txout"),
        }
    }
}

impl std::error::Error for UnblindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UnblindError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<secp256k1_zkp::Error> for UnblindError {
    fn from(from: secp256k1_zkp::Error) -> Self {
        UnblindError::Upstream(from)
    }
}

/// A trait to create and verify explicit rangeproofs
pub trait BlindValueProofs: Sized {
    /// Outputs a `[RangeProof]` that blinded value
    /// corresponds to unblinded explicit value
    fn blind_value_proof<C: secp256k1_zkp::Signing, R: RngCore + CryptoRng>(
        rng: &mut R,
        secp: &Secp256k1<C>,
        explicit_val: u64,
        value_commit: PedersenCommitment,
        asset_gen: Generator,
        vbf: ValueBlindingFactor,
    ) -> Result<Self, secp256k1_zkp::Error>;

    /// Verify that the Rangeproof proves that commitment
    /// is actually bound to the explicit value
    fn blind_value_proof_verify<C: secp256k1_zkp::Verification>(
        &self,
        secp: &Secp256k1<C>,
        explicit_val: u64,
        asset_gen: Generator,
        value_commit: PedersenCommitment,
    ) -> bool;
}

impl BlindValueProofs for RangeProof {
    fn blind_value_proof<C: secp256k1_zkp::Signing, R: RngCore + CryptoRng>(
        rng: &mut R,
        secp: &Secp256k1<C>,
        explicit_val: u64,
        value_commit: PedersenCommitment,
        asset_gen: Generator,
        vbf: ValueBlindingFactor,
    ) -> Result<Self, secp256k1_zkp::Error> {
        RangeProof::new(
            secp,
            explicit_val,        // min_value
            value_commit,        // value_commit
            explicit_val,        // value
            vbf.into_inner(),    // blinding factor
            &[],                 // message
            &[],                 // add commitment
            SecretKey::new(rng), // nonce
            -1,                  // exp
            0,                   // min bits
            asset_gen,           // additional gen
        )
    }

    fn blind_value_proof_verify<C: secp256k1_zkp::Verification>(
        &self,
        secp: &Secp256k1<C>,
        explicit_val: u64,
        asset_gen: Generator,
        value_commit: PedersenCommitment,
    ) -> bool {
        match self.verify(secp, value_commit, &[], asset_gen) {
            Ok(r) => r.start == explicit_val && r.end - 1 == explicit_val,
            Err(..) => false,
        }
    }
}

/// A trait to create and verify explicit surjection proofs
pub trait BlindAssetProofs: Sized {
    /// Outputs a `[SurjectionProof]` that blinded asset
    /// corresponds to unblinded explicit asset
    fn blind_asset_proof<C: secp256k1_zkp::Signing, R: RngCore + CryptoRng>(
        rng: &mut R,
        secp: &Secp256k1<C>,
        asset: AssetId,
        abf: AssetBlindingFactor,
    ) -> Result<Self, secp256k1_zkp::Error>;

    /// Verify that the Surjection proves that asset commitment
    /// is actually bound to the explicit asset
    fn blind_asset_proof_verify(
        &self,
        secp: &Secp256k1<secp256k1_zkp::All>,
        asset: AssetId,
        asset_commit: Generator,
    ) -> bool;
}

impl BlindAssetProofs for SurjectionProof {
    fn blind_asset_proof<C: secp256k1_zkp::Signing, R: RngCore + CryptoRng>(
        rng: &mut R,
        secp: &Secp256k1<C>,
        asset: AssetId,
        abf: AssetBlindingFactor,
    ) -> Result<Self, secp256k1_zkp::Error> {
        let gen = Generator::new_unblinded(secp, asset.into_tag());
        SurjectionProof::new(
            secp,
            rng,
            asset.into_tag(),
            abf.into_inner(),
            &[(gen, asset.into_tag(), ZERO_TWEAK)],
        )
    }

    fn blind_asset_proof_verify(
        &self,
        secp: &Secp256k1<secp256k1_zkp::All>,
        asset: AssetId,
        asset_commit: Generator,
    ) -> bool {
        let gen = Generator::new_unblinded(secp, asset.into_tag());
        self.verify(secp, asset_commit, &[gen])
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rand::thread_rng;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use secp256k1_zkp::SECP256K1;

    use super::*;
    use crate::TxOutWitness;

    fn asset(b: u8) -> AssetId {
        AssetId::from_byte_array([b; 32])
    }

    #[test]
    fn asset_commitment() {
        let abf = AssetBlindingFactor::new(&mut thread_rng());
        let (conf, gen) = create_asset_commitment(SECP256K1, asset(1), abf).unwrap();
        assert_eq!(conf, Asset::Confidential(gen));
        assert_eq!(create_asset_commitment(SECP256K1, asset(1), abf).unwrap().1, gen);
        assert_ne!(create_asset_commitment(SECP256K1, asset(2), abf).unwrap().1, gen);
        assert_eq!(
            create_asset_commitment(SECP256K1, AssetId::default(), abf),
            Err(BlindingStatus::InvalidAsset)
        );
    }

    #[test]
    fn rangeproof_binds_commitment_script_and_asset() {
        let mut rng = thread_rng();
        let abf = AssetBlindingFactor::new(&mut rng);
        let vbf = ValueBlindingFactor::new(&mut rng);
        let (_, gen) = create_asset_commitment(SECP256K1, asset(1), abf).unwrap();
        let (_, comm) = create_value_commitment(SECP256K1, vbf, gen, 1_000);

        let recipient_sk = SecretKey::new(&mut rng);
        let recipient_pk = PublicKey::from_secret_key(SECP256K1, &recipient_sk);
        let (ephemeral_pk, nonce) =
            generate_rangeproof_ecdh_key(&mut rng, SECP256K1, &recipient_pk).unwrap();

        let spk = Script::from(vec![0x00, 0x14, 0xaa]);
        let proof = create_value_rangeproof(
            SECP256K1,
            &RangeProofPolicy::default(),
            vbf,
            nonce,
            1_000,
            &spk,
            comm,
            gen,
            asset(1),
            abf,
        )
        .unwrap();

        assert!(proof.verify(SECP256K1, comm, spk.as_bytes(), gen).is_ok());
        assert!(proof.verify(SECP256K1, comm, &[0x51], gen).is_err());

        // only the recipient can rewind it
        let txout = TxOut {
            asset: Asset::Confidential(gen),
            value: Value::Confidential(comm),
            nonce: Nonce::Confidential(ephemeral_pk),
            script_pubkey: spk,
            witness: TxOutWitness {
                surjection_proof: None,
                rangeproof: Some(Box::new(proof)),
            },
        };
        let secrets = txout.unblind(SECP256K1, recipient_sk).unwrap();
        assert_eq!(secrets, TxOutSecrets::new(asset(1), abf, 1_000, vbf));
        assert!(txout.unblind(SECP256K1, SecretKey::new(&mut rng)).is_err());
    }

    #[test]
    fn rangeproof_policy_rejects_values_below_minimum() {
        let mut rng = thread_rng();
        let abf = AssetBlindingFactor::new(&mut rng);
        let vbf = ValueBlindingFactor::new(&mut rng);
        let (_, gen) = create_asset_commitment(SECP256K1, asset(1), abf).unwrap();
        let (_, comm) = create_value_commitment(SECP256K1, vbf, gen, 5);
        let policy = RangeProofPolicy {
            min_value: 10,
            ..RangeProofPolicy::default()
        };
        let res = create_value_rangeproof(
            SECP256K1,
            &policy,
            vbf,
            SecretKey::new(&mut rng),
            5,
            &Script::new(),
            comm,
            gen,
            asset(1),
            abf,
        );
        assert_eq!(res.unwrap_err(), BlindingStatus::AspUnable);
    }

    #[test]
    fn surjection_proof_over_all_inputs() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let in_abf = AssetBlindingFactor::new(&mut rng);
        let inputs = [
            SurjectionInput::Unknown(Asset::Explicit(asset(3))),
            SurjectionInput::Known {
                asset: asset(1),
                asset_bf: in_abf,
            },
            SurjectionInput::Known {
                asset: asset(2),
                asset_bf: AssetBlindingFactor::zero(),
            },
        ];
        let out_abf = AssetBlindingFactor::new(&mut rng);
        let (_, out_gen) = create_asset_commitment(SECP256K1, asset(1), out_abf).unwrap();

        let proof =
            create_asset_surjection_proof(&mut rng, SECP256K1, &inputs, out_abf, out_gen, asset(1))
                .unwrap();
        let domain = inputs
            .iter()
            .map(|i| i.surjection_target(SECP256K1).unwrap().0)
            .collect::<Vec<_>>();
        assert!(proof.verify(SECP256K1, out_gen, &domain));

        // the explicit input carries asset 3 but is not known
        let (_, gen3) = create_asset_commitment(SECP256K1, asset(3), out_abf).unwrap();
        assert_eq!(
            create_asset_surjection_proof(&mut rng, SECP256K1, &inputs, out_abf, gen3, asset(3))
                .unwrap_err(),
            BlindingStatus::InvalidAsset
        );
        assert_eq!(
            create_asset_surjection_proof(
                &mut rng,
                SECP256K1,
                &[SurjectionInput::Unknown(Asset::Null)],
                out_abf,
                out_gen,
                asset(1)
            )
            .unwrap_err(),
            BlindingStatus::InvalidAsset
        );
        // a generator for some other blinder does not verify
        assert_eq!(
            create_asset_surjection_proof(&mut rng, SECP256K1, &inputs, in_abf, out_gen, asset(1))
                .unwrap_err(),
            BlindingStatus::AspUnable
        );
    }

    #[test]
    fn surjection_proof_with_many_matches() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let inputs = (0..200)
            .map(|_| SurjectionInput::Known {
                asset: asset(1),
                asset_bf: AssetBlindingFactor::new(&mut rng),
            })
            .collect::<Vec<_>>();
        let domain = inputs
            .iter()
            .map(|i| i.surjection_target(SECP256K1).unwrap().0)
            .collect::<Vec<_>>();
        for _ in 0..20 {
            let out_abf = AssetBlindingFactor::new(&mut rng);
            let (_, out_gen) = create_asset_commitment(SECP256K1, asset(1), out_abf).unwrap();
            let proof = create_asset_surjection_proof(
                &mut rng,
                SECP256K1,
                &inputs,
                out_abf,
                out_gen,
                asset(1),
            )
            .unwrap();
            assert!(proof.verify(SECP256K1, out_gen, &domain));
        }
    }

    #[test]
    fn surjection_proof_with_several_matches() {
        let mut rng = thread_rng();
        let inputs = (0..4)
            .map(|_| SurjectionInput::Known {
                asset: asset(1),
                asset_bf: AssetBlindingFactor::new(&mut rng),
            })
            .collect::<Vec<_>>();
        let domain = inputs
            .iter()
            .map(|i| i.surjection_target(SECP256K1).unwrap().0)
            .collect::<Vec<_>>();
        for _ in 0..8 {
            let out_abf = AssetBlindingFactor::new(&mut rng);
            let (_, out_gen) = create_asset_commitment(SECP256K1, asset(1), out_abf).unwrap();
            let proof = create_asset_surjection_proof(
                &mut rng, SECP256K1, &inputs, out_abf, out_gen, asset(1),
            )
            .unwrap();
            assert!(proof.verify(SECP256K1, out_gen, &domain));
        }
    }

    #[test]
    fn explicit_proofs() {
        let mut rng = thread_rng();
        let abf = AssetBlindingFactor::new(&mut rng);
        let vbf = ValueBlindingFactor::new(&mut rng);
        let (_, gen) = create_asset_commitment(SECP256K1, asset(1), abf).unwrap();
        let (_, comm) = create_value_commitment(SECP256K1, vbf, gen, 77);

        let vp = RangeProof::blind_value_proof(&mut rng, SECP256K1, 77, comm, gen, vbf).unwrap();
        assert!(vp.blind_value_proof_verify(SECP256K1, 77, gen, comm));
        assert!(!vp.blind_value_proof_verify(SECP256K1, 78, gen, comm));

        let ap = SurjectionProof::blind_asset_proof(&mut rng, SECP256K1, asset(1), abf).unwrap();
        assert!(ap.blind_asset_proof_verify(SECP256K1, asset(1), gen));
        assert!(!ap.blind_asset_proof_verify(SECP256K1, asset(2), gen));
    }

    #[test]
    fn message_layout() {
        let bf = AssetBlindingFactor::from_str(
            "a5b3d111cdaa5fc111e2723df4caf315864f25fb4610cc737f10d5a55cd4096f",
        )
        .unwrap();
        let bytes = RangeProofMessage { asset: asset(9), bf }.to_bytes();
        assert_eq!(bytes[..32], [9; 32]);
        assert_eq!(bytes[32..], bf.to_byte_array());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn txout_secrets_serde() {
        let secrets: TxOutSecrets = serde_json::from_str(
            r#"
            {
                "asset": "b2e15d0d7a0c94e4e2ce0fe6e8691b9e451377f6e46e8045a86f7c4b5d4f0f23",
                "asset_bf": "a5b3d111cdaa5fc111e2723df4caf315864f25fb4610cc737f10d5a55cd4096f",
                "value": 2099999797999114,
                "value_bf": "e36a4de359469f547571d117bc5509fb74fba73c84b0cdd6f4edfa7ff7fa457d"
            }"#,
        )
        .unwrap();
        assert_eq!(secrets.value, 2_099_999_797_999_114);
        assert_eq!(
            secrets.asset.to_string(),
            "b2e15d0d7a0c94e4e2ce0fe6e8691b9e451377f6e46e8045a86f7c4b5d4f0f23"
        );
        let json = serde_json::to_string(&secrets).unwrap();
        assert_eq!(serde_json::from_str::<TxOutSecrets>(&json).unwrap(), secrets);
    }
}
