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

//! # Confidential Commitments
//!
//! Structures representing Pedersen commitments of various types, and the
//! blinding factors that open them.
//!

use std::fmt;

use bitcoin::hex::HexToArrayError;
use secp256k1_zkp::{
    self,
    ecdh::shared_secret_point,
    rand::{CryptoRng, Rng, RngCore},
    Generator, PedersenCommitment, PublicKey, Scalar, Secp256k1, SecretKey, Signing, Tweak,
    ZERO_TWEAK,
};

use crate::hashes::{sha256d, Hash};
use crate::issuance::AssetId;

/// A CT commitment to an amount
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Value is explicitly encoded
    Explicit(u64),
    /// Value is committed
    Confidential(PedersenCommitment),
}

impl Value {
    /// Create value commitment.
    pub fn new_confidential<C: Signing>(
        secp: &Secp256k1<C>,
        value: u64,
        asset: Generator,
        bf: ValueBlindingFactor,
    ) -> Self {
        Value::Confidential(PedersenCommitment::new(secp, value, bf.0, asset))
    }

    /// Create value commitment from assetID, asset blinding factor,
    /// value and value blinding factor
    pub fn new_confidential_from_assetid<C: Signing>(
        secp: &Secp256k1<C>,
        value: u64,
        asset: AssetId,
        v_bf: ValueBlindingFactor,
        a_bf: AssetBlindingFactor,
    ) -> Self {
        let generator = Generator::new_blinded(secp, asset.into_tag(), a_bf.0);
        Value::new_confidential(secp, value, generator, v_bf)
    }

    /// Check if the object is null.
    pub fn is_null(&self) -> bool {
        matches!(*self, Value::Null)
    }

    /// Check if the object is explicit.
    pub fn is_explicit(&self) -> bool {
        matches!(*self, Value::Explicit(_))
    }

    /// Check if the object is confidential.
    pub fn is_confidential(&self) -> bool {
        matches!(*self, Value::Confidential(_))
    }

    /// Returns the explicit inner value.
    /// Returns [None] if [`Value::is_explicit`] returns false.
    pub fn explicit(&self) -> Option<u64> {
        match *self {
            Value::Explicit(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the confidential commitment in case of a confidential value.
    /// Returns [None] if [`Value::is_confidential`] returns false.
    pub fn commitment(&self) -> Option<PedersenCommitment> {
        match *self {
            Value::Confidential(i) => Some(i),
            _ => None,
        }
    }
}

/// A CT commitment to an asset
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Asset {
    /// No value
    #[default]
    Null,
    /// Asset entropy is explicitly encoded
    Explicit(AssetId),
    /// Asset is committed
    Confidential(Generator),
}

impl Asset {
    /// Create asset commitment.
    pub fn new_confidential<C: Signing>(
        secp: &Secp256k1<C>,
        asset: AssetId,
        bf: AssetBlindingFactor,
    ) -> Self {
        Asset::Confidential(Generator::new_blinded(secp, asset.into_tag(), bf.0))
    }

    /// Check if the object is null.
    pub fn is_null(&self) -> bool {
        matches!(*self, Asset::Null)
    }

    /// Check if the object is explicit.
    pub fn is_explicit(&self) -> bool {
        matches!(*self, Asset::Explicit(_))
    }

    /// Check if the object is confidential.
    pub fn is_confidential(&self) -> bool {
        matches!(*self, Asset::Confidential(_))
    }

    /// Returns the explicit inner value.
    /// Returns [None] if [`Asset::is_explicit`] returns false.
    pub fn explicit(&self) -> Option<AssetId> {
        match *self {
            Asset::Explicit(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the confidential commitment in case of a confidential value.
    /// Returns [None] if [`Asset::is_confidential`] returns false.
    pub fn commitment(&self) -> Option<Generator> {
        match *self {
            Asset::Confidential(i) => Some(i),
            _ => None,
        }
    }

    /// Internally used function for getting the generator from asset
    /// Used in the amount verification check
    /// Returns [`None`] is the asset is [`Asset::Null`]
    /// Converts a explicit asset into a generator and returns the confidential
    /// generator as is.
    pub fn into_asset_gen<C: secp256k1_zkp::Signing>(
        self,
        secp: &Secp256k1<C>,
    ) -> Option<Generator> {
        match self {
            // Only error is Null error which is dealt with later
            // when we have more context information about it.
            Asset::Null => None,
            Asset::Explicit(x) => Some(Generator::new_unblinded(secp, x.into_tag())),
            Asset::Confidential(gen) => Some(gen),
        }
    }
}

/// A CT commitment to an output nonce (i.e. a public key)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Nonce {
    /// No value
    #[default]
    Null,
    /// There should be no such thing as an "explicit nonce", but Elements will deserialize
    /// such a thing (and insists that its size be 32 bytes). So we stick a 32-byte type here
    /// that implements all the traits we need.
    Explicit([u8; 32]),
    /// Nonce is committed
    Confidential(PublicKey),
}

impl Nonce {
    /// Create nonce commitment.
    pub fn new_confidential<R: RngCore + CryptoRng, C: Signing>(
        rng: &mut R,
        secp: &Secp256k1<C>,
        receiver_blinding_pk: &PublicKey,
    ) -> Result<(Self, SecretKey), secp256k1_zkp::Error> {
        let ephemeral_sk = SecretKey::new(rng);
        Self::with_ephemeral_sk(secp, ephemeral_sk, receiver_blinding_pk)
    }

    /// Similar to [`Nonce::new_confidential`], but with a given `ephemeral_sk`
    /// instead of sampling it from rng.
    ///
    /// Returns the nonce commitment (the ephemeral public key) and the shared
    /// secret both parties can compute.
    pub fn with_ephemeral_sk<C: Signing>(
        secp: &Secp256k1<C>,
        ephemeral_sk: SecretKey,
        receiver_blinding_pk: &PublicKey,
    ) -> Result<(Self, SecretKey), secp256k1_zkp::Error> {
        let sender_pk = PublicKey::from_secret_key(secp, &ephemeral_sk);
        let shared_secret = Self::make_shared_secret(receiver_blinding_pk, &ephemeral_sk)?;
        Ok((Nonce::Confidential(sender_pk), shared_secret))
    }

    /// Calculate the shared secret.
    ///
    /// Returns [`None`] if the nonce is not confidential.
    pub fn shared_secret(&self, receiver_blinding_sk: &SecretKey) -> Option<SecretKey> {
        match self {
            Nonce::Confidential(sender_pk) => {
                Self::make_shared_secret(sender_pk, receiver_blinding_sk).ok()
            }
            _ => None,
        }
    }

    /// Create the shared secret.
    ///
    /// This is the double SHA256 of the compressed serialization of the ECDH
    /// point, which is what Elements uses as the rangeproof nonce.
    fn make_shared_secret(pk: &PublicKey, sk: &SecretKey) -> Result<SecretKey, secp256k1_zkp::Error> {
        let xy = shared_secret_point(pk, sk);
        let mut dh_secret = [0u8; 33];
        dh_secret[0] = if xy[63] % 2 == 0 { 0x02 } else { 0x03 };
        dh_secret[1..].copy_from_slice(&xy[0..32]);
        let shared_secret = sha256d::Hash::hash(&dh_secret).to_byte_array();
        Ok(SecretKey::from_slice(&shared_secret)?)
    }

    /// Check if the object is null.
    pub fn is_null(&self) -> bool {
        matches!(*self, Nonce::Null)
    }

    /// Check if the object is confidential.
    pub fn is_confidential(&self) -> bool {
        matches!(*self, Nonce::Confidential(_))
    }

    /// Returns the confidential commitment in case of a confidential value.
    /// Returns [None] if [`Nonce::is_confidential`] returns false.
    pub fn commitment(&self) -> Option<PublicKey> {
        match *self {
            Nonce::Confidential(i) => Some(i),
            _ => None,
        }
    }
}

/// Error parsing a blinding factor from hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlindingFactorParseError {
    /// Not 32 bytes of hex.
    Hex(HexToArrayError),
    /// The bytes are not a scalar below the curve order.
    OutOfRange(secp256k1_zkp::Error),
}

impl fmt::Display for BlindingFactorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlindingFactorParseError::Hex(e) => write!(f, "invalid blinding factor hex: {}", e),
            BlindingFactorParseError::OutOfRange(e) => write!(f, "invalid blinding factor: {}", e),
        }
    }
}

impl std::error::Error for BlindingFactorParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlindingFactorParseError::Hex(e) => Some(e),
            BlindingFactorParseError::OutOfRange(e) => Some(e),
        }
    }
}

impl From<HexToArrayError> for BlindingFactorParseError {
    fn from(e: HexToArrayError) -> Self {
        BlindingFactorParseError::Hex(e)
    }
}

/// Blinding factor used for asset commitments.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AssetBlindingFactor(pub(crate) Tweak);

impl AssetBlindingFactor {
    /// Generate random asset blinding factor.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        AssetBlindingFactor(Tweak::new(rng))
    }

    /// Create from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, secp256k1_zkp::Error> {
        Ok(AssetBlindingFactor(Tweak::from_slice(bytes)?))
    }

    /// Returns the inner value.
    pub fn into_inner(self) -> Tweak {
        self.0
    }

    /// Get a unblinded/zero AssetBlinding factor
    pub fn zero() -> Self {
        AssetBlindingFactor(ZERO_TWEAK)
    }

    /// The raw bytes of this blinding factor.
    pub fn to_byte_array(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(self.0.as_ref());
        bytes
    }

    /// Whether this is the zero blinding factor of an unblinded asset.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_TWEAK
    }
}

display_from_str_reversed_hex!(
    AssetBlindingFactor,
    BlindingFactorParseError,
    |bf: &AssetBlindingFactor| bf.to_byte_array(),
    |b: [u8; 32]| AssetBlindingFactor::from_slice(&b).map_err(BlindingFactorParseError::OutOfRange)
);
serde_string_impl!(AssetBlindingFactor, "a hex-encoded asset blinding factor");

/// Blinding factor used for value commitments.
///
/// Besides plain blinding factors this type also carries *scalar offsets*,
/// `value * abf + vbf`, which is the total weight of the generator `G` in a
/// value commitment. The commitments of a transaction balance exactly when
/// the offsets of its inputs minus those of its outputs sum to zero.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ValueBlindingFactor(pub(crate) Tweak);

impl ValueBlindingFactor {
    /// Generate random value blinding factor.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        ValueBlindingFactor(Tweak::new(rng))
    }

    /// Create from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, secp256k1_zkp::Error> {
        Ok(ValueBlindingFactor(Tweak::from_slice(bytes)?))
    }

    /// Returns the inner value.
    pub fn into_inner(self) -> Tweak {
        self.0
    }

    /// Get a unblinded/zero ValueBlinding factor
    pub fn zero() -> Self {
        ValueBlindingFactor(ZERO_TWEAK)
    }

    /// The raw bytes of this blinding factor.
    pub fn to_byte_array(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(self.0.as_ref());
        bytes
    }

    /// Whether this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_TWEAK
    }

    fn to_secret_key(self) -> Result<Option<SecretKey>, secp256k1_zkp::Error> {
        if self.is_zero() {
            Ok(None)
        } else {
            Ok(Some(SecretKey::from_slice(self.0.as_ref())?))
        }
    }

    fn from_secret_key(sk: SecretKey) -> Result<Self, secp256k1_zkp::Error> {
        ValueBlindingFactor::from_slice(&sk.secret_bytes())
    }

    /// Add two scalars modulo the curve order.
    pub fn checked_add(self, other: ValueBlindingFactor) -> Result<Self, secp256k1_zkp::Error> {
        let (a, b) = match (self.to_secret_key()?, other.to_secret_key()?) {
            (None, _) => return Ok(other),
            (_, None) => return Ok(self),
            (Some(a), Some(b)) => (a, b),
        };
        match a.add_tweak(&Scalar::from(b)) {
            Ok(sum) => Self::from_secret_key(sum),
            // the only way two valid scalars fail to add is a zero sum
            Err(_) => Ok(ValueBlindingFactor::zero()),
        }
    }

    /// Negate the scalar modulo the curve order.
    pub fn checked_neg(self) -> Result<Self, secp256k1_zkp::Error> {
        match self.to_secret_key()? {
            None => Ok(self),
            Some(sk) => Self::from_secret_key(sk.negate()),
        }
    }

    /// Subtract `other` from this scalar modulo the curve order.
    pub fn checked_sub(self, other: ValueBlindingFactor) -> Result<Self, secp256k1_zkp::Error> {
        self.checked_add(other.checked_neg()?)
    }

    /// The scalar offset `value * abf + vbf` of a commitment opened by the
    /// given secrets.
    pub fn scalar_offset(
        value: u64,
        abf: AssetBlindingFactor,
        vbf: ValueBlindingFactor,
    ) -> Result<Self, secp256k1_zkp::Error> {
        if value == 0 || abf.is_zero() {
            return Ok(vbf);
        }
        let abf_sk = SecretKey::from_slice(abf.0.as_ref())?;
        let mut value_be = [0u8; 32];
        value_be[24..].copy_from_slice(&value.to_be_bytes());
        let value_scalar = Scalar::from(SecretKey::from_slice(&value_be)?);
        // a nonzero scalar times a nonzero value below the group order is nonzero
        let product = abf_sk.mul_tweak(&value_scalar)?;
        Self::from_secret_key(product)?.checked_add(vbf)
    }

    /// Create the value blinding factor of the last output of a transaction,
    /// such that the offsets of `inputs` equal those of `outputs` plus the
    /// offset of the last output.
    ///
    /// Each element of `inputs` and `outputs` is a `(value, abf, vbf)` triple.
    /// Offsets that are not tied to a commitment, such as those published by
    /// other blinders, can be passed as `(0, AssetBlindingFactor::zero(), offset)`.
    pub fn last(
        value: u64,
        abf: AssetBlindingFactor,
        inputs: &[(u64, AssetBlindingFactor, ValueBlindingFactor)],
        outputs: &[(u64, AssetBlindingFactor, ValueBlindingFactor)],
    ) -> Result<Self, secp256k1_zkp::Error> {
        let mut acc = ValueBlindingFactor::zero();
        for (v, a, b) in inputs {
            acc = acc.checked_add(Self::scalar_offset(*v, *a, *b)?)?;
        }
        for (v, a, b) in outputs {
            acc = acc.checked_sub(Self::scalar_offset(*v, *a, *b)?)?;
        }
        acc.checked_sub(Self::scalar_offset(value, abf, ValueBlindingFactor::zero())?)
    }
}

impl From<Tweak> for ValueBlindingFactor {
    fn from(t: Tweak) -> Self {
        ValueBlindingFactor(t)
    }
}

display_from_str_reversed_hex!(
    ValueBlindingFactor,
    BlindingFactorParseError,
    |bf: &ValueBlindingFactor| bf.to_byte_array(),
    |b: [u8; 32]| ValueBlindingFactor::from_slice(&b).map_err(BlindingFactorParseError::OutOfRange)
);
serde_string_impl!(ValueBlindingFactor, "a hex-encoded value blinding factor");
