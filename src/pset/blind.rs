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

//! # PSET Blinding
//!
//! Blinds every output of a PSET that carries a blinding key, together with
//! any issuances the caller asks to blind, such that the value commitments of
//! the final transaction balance.
//!
//! The pass is all or nothing: everything is computed before the PSET is
//! touched, so on error the PSET is exactly as it was.

use std::collections::BTreeMap;

use log::{debug, trace};
use secp256k1_zkp::{
    rand::{CryptoRng, RngCore},
    Generator, PedersenCommitment, PublicKey, RangeProof, Secp256k1, SecretKey, Signing,
    SurjectionProof, Tweak, Verification,
};

use super::{BlindingStatus, PartiallySignedTransaction};
use crate::blind::{
    create_asset_commitment, create_asset_surjection_proof, create_value_commitment,
    create_value_rangeproof, generate_rangeproof_ecdh_key, BlindAssetProofs, BlindValueProofs,
    RangeProofPolicy, SurjectionInput, TxOutSecrets,
};
use crate::confidential::{Asset, AssetBlindingFactor, Value, ValueBlindingFactor};
use crate::issuance::AssetId;
use crate::{Script, TxOut};

/// `(value, asset_bf, value_bf)` of one side of the balance equation
type BlindInput = (u64, AssetBlindingFactor, ValueBlindingFactor);

/// Blinding keys of an issuance. Each key is the rangeproof nonce of the
/// corresponding amount, so whoever holds it can rewind the proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssuanceBlindingKeys {
    /// Key blinding the issued amount
    pub value_key: Option<SecretKey>,
    /// Key blinding the reissuance token amount
    pub token_key: Option<SecretKey>,
}

/// What the caller knows about the PSET it blinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlindingRequest {
    /// Secrets of the inputs owned by the caller, by input index
    pub input_secrets: BTreeMap<usize, TxOutSecrets>,
    /// Issuances to blind, by input index
    pub issuance_keys: BTreeMap<usize, IssuanceBlindingKeys>,
    /// Parameters of the output rangeproofs
    pub rangeproof_policy: RangeProofPolicy,
}

impl BlindingRequest {
    /// An empty request with the default rangeproof policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the secrets of an owned input
    pub fn with_input(mut self, index: usize, secrets: TxOutSecrets) -> Self {
        self.input_secrets.insert(index, secrets);
        self
    }

    /// Ask for the issuance of an input to be blinded
    pub fn with_issuance(mut self, index: usize, keys: IssuanceBlindingKeys) -> Self {
        self.issuance_keys.insert(index, keys);
        self
    }

    /// Replace the rangeproof policy
    pub fn with_rangeproof_policy(mut self, policy: RangeProofPolicy) -> Self {
        self.rangeproof_policy = policy;
        self
    }

    /// Whether the caller owns the input at `index`
    fn owns_input(&self, index: usize) -> bool {
        self.input_secrets.contains_key(&index)
    }
}

/// The secrets chosen by a successful blinding pass. The PSET only carries
/// commitments, so a caller who wants to keep records keeps these.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlindingSecrets {
    /// Secrets of every output blinded by this pass, by output index
    pub outputs: BTreeMap<usize, TxOutSecrets>,
    /// Value blinding factors of the blinded issuance amounts, by input index
    pub issuance_value_bfs: BTreeMap<usize, ValueBlindingFactor>,
    /// Value blinding factors of the blinded token amounts, by input index
    pub issuance_token_bfs: BTreeMap<usize, ValueBlindingFactor>,
    /// Scalar offset appended to the global scalars when another party
    /// still has outputs to blind
    pub published_scalar: Option<Tweak>,
}

/// A blinded amount: commitment, rangeproof, explicit value proof and the
/// blinding factor behind them.
struct BlindedAmount {
    comm: PedersenCommitment,
    rangeproof: RangeProof,
    blind_proof: RangeProof,
    value_bf: ValueBlindingFactor,
}

struct BlindedIssuance {
    index: usize,
    value: Option<BlindedAmount>,
    token: Option<BlindedAmount>,
}

/// An output the caller blinds in this pass
struct OutputPlan {
    index: usize,
    asset: AssetId,
    amount: u64,
    blinding_key: PublicKey,
    asset_bf: AssetBlindingFactor,
    value_bf: ValueBlindingFactor,
}

struct BlindedOutput {
    index: usize,
    asset_comm: Generator,
    amount_comm: PedersenCommitment,
    ecdh_pubkey: PublicKey,
    value_rangeproof: RangeProof,
    asset_surjection_proof: SurjectionProof,
    blind_value_proof: RangeProof,
    blind_asset_proof: SurjectionProof,
}

fn fail(status: BlindingStatus, what: &str, index: usize) -> BlindingStatus {
    debug!("blinding failed at {} {}: {:?}", what, index, status);
    status
}

/// Check that `secrets` open the asset and value of `utxo`.
fn check_input_secrets<C: Signing>(
    secp: &Secp256k1<C>,
    utxo: &TxOut,
    secrets: &TxOutSecrets,
) -> Result<(), BlindingStatus> {
    if secrets.asset.is_null() {
        return Err(BlindingStatus::InvalidAsset);
    }
    let gen = match utxo.asset {
        Asset::Null => return Err(BlindingStatus::InvalidAsset),
        Asset::Explicit(asset) => {
            if asset != secrets.asset {
                return Err(BlindingStatus::InvalidAsset);
            }
            if !secrets.asset_bf.is_zero() {
                return Err(BlindingStatus::InvalidAssetCommitment);
            }
            Generator::new_unblinded(secp, asset.into_tag())
        }
        Asset::Confidential(gen) => {
            let (_, expected) = create_asset_commitment(secp, secrets.asset, secrets.asset_bf)?;
            if expected != gen {
                return Err(BlindingStatus::InvalidAssetCommitment);
            }
            gen
        }
    };
    match utxo.value {
        Value::Null => Err(BlindingStatus::InvalidBlinder),
        Value::Explicit(value) => {
            if value == secrets.value && secrets.value_bf.is_zero() {
                Ok(())
            } else {
                Err(BlindingStatus::InvalidBlinder)
            }
        }
        Value::Confidential(comm) => {
            let (_, expected) = create_value_commitment(secp, secrets.value_bf, gen, secrets.value);
            if expected == comm {
                Ok(())
            } else {
                Err(BlindingStatus::InvalidBlinder)
            }
        }
    }
}

/// Blind an explicit issuance amount of `asset`. The issued asset is never
/// blinded, so the asset blinding factor is zero and the generator is the
/// unblinded one.
fn blind_issuance_amount<R: RngCore + CryptoRng, C: Signing>(
    rng: &mut R,
    secp: &Secp256k1<C>,
    policy: &RangeProofPolicy,
    asset: AssetId,
    amount: u64,
    key: SecretKey,
) -> Result<BlindedAmount, BlindingStatus> {
    let value_bf = ValueBlindingFactor::new(rng);
    let gen = Generator::new_unblinded(secp, asset.into_tag());
    let (_, comm) = create_value_commitment(secp, value_bf, gen, amount);
    let rangeproof = create_value_rangeproof(
        secp,
        policy,
        value_bf,
        key,
        amount,
        &Script::new(),
        comm,
        gen,
        asset,
        AssetBlindingFactor::zero(),
    )?;
    let blind_proof = RangeProof::blind_value_proof(rng, secp, amount, comm, gen, value_bf)
        .map_err(|_| BlindingStatus::AspUnable)?;
    Ok(BlindedAmount {
        comm,
        rangeproof,
        blind_proof,
        value_bf,
    })
}

impl PartiallySignedTransaction {
    /// Blind the outputs of this PSET owned by the caller.
    ///
    /// An output is blinded when it has a blinding key, carries no commitment
    /// yet, and its `blinder_index` is unset or names an input in
    /// `request.input_secrets`. Outputs with a blinding key whose
    /// `blinder_index` names another party's input are left to that party;
    /// if there are any, this pass publishes its scalar offset in the global
    /// scalars instead of balancing. Otherwise the last blinded output
    /// absorbs the offsets of all inputs, outputs and global scalars, and the
    /// global scalars are cleared.
    ///
    /// Issuances listed in `request.issuance_keys` are blinded as well, and
    /// their blinding factors enter the balance on the input side.
    ///
    /// On error the PSET is left unchanged.
    pub fn blind<R: RngCore + CryptoRng, C: Signing + Verification>(
        &mut self,
        rng: &mut R,
        secp: &Secp256k1<C>,
        request: &BlindingRequest,
    ) -> Result<BlindingSecrets, BlindingStatus> {
        debug!(
            "blinding pset with {} inputs and {} outputs, {} owned inputs",
            self.n_inputs(),
            self.n_outputs(),
            request.input_secrets.len()
        );
        let policy = &request.rangeproof_policy;

        // 1. Every input needs its utxo and owned inputs must open it
        for &index in request.input_secrets.keys().chain(request.issuance_keys.keys()) {
            if index >= self.n_inputs() {
                return Err(fail(BlindingStatus::NeedsUtxos, "input", index));
            }
        }
        let mut utxos = Vec::with_capacity(self.n_inputs());
        for (index, input) in self.inputs.iter().enumerate() {
            let utxo = input
                .witness_utxo
                .as_ref()
                .ok_or_else(|| fail(BlindingStatus::NeedsUtxos, "input", index))?;
            utxos.push(utxo);
        }
        for (&index, secrets) in &request.input_secrets {
            check_input_secrets(secp, utxos[index], secrets)
                .map_err(|s| fail(s, "input", index))?;
        }

        // 2. Issuances. Their blinding factors must be known before balancing
        let mut issuances = Vec::new();
        for (&index, keys) in &request.issuance_keys {
            let input = &self.inputs[index];
            let (asset, token) = input.issuance_ids(
                input.issuance_value_comm.is_some()
                    || (keys.value_key.is_some() && input.issuance_amount().is_explicit()),
            );
            let value = match (keys.value_key, input.issuance_amount().explicit()) {
                (Some(key), Some(amount)) => Some(
                    blind_issuance_amount(rng, secp, policy, asset, amount, key)
                        .map_err(|s| fail(s, "issuance", index))?,
                ),
                _ => None,
            };
            let token = match (keys.token_key, input.issuance_inflation_keys_amount().explicit()) {
                (Some(key), Some(amount)) => Some(
                    blind_issuance_amount(rng, secp, policy, token, amount, key)
                        .map_err(|s| fail(s, "issuance", index))?,
                ),
                _ => None,
            };
            if value.is_none() && token.is_none() {
                debug!("issuance keys for input {} name nothing to blind", index);
                continue;
            }
            issuances.push(BlindedIssuance {
                index,
                value,
                token,
            });
        }

        // 3. The surjection domain: each input asset followed by its issued
        // asset and token, if any
        let mut domain = Vec::new();
        for (index, input) in self.inputs.iter().enumerate() {
            // the asset of an explicit input is known to everyone
            match (request.input_secrets.get(&index), utxos[index].asset) {
                (Some(secrets), _) => domain.push(SurjectionInput::from(*secrets)),
                (None, Asset::Explicit(asset)) => domain.push(SurjectionInput::Known {
                    asset,
                    asset_bf: AssetBlindingFactor::zero(),
                }),
                (None, asset) => domain.push(SurjectionInput::Unknown(asset)),
            }
            if !input.has_issuance() {
                continue;
            }
            let amount_blinded = issuances
                .iter()
                .any(|iss| iss.index == index && iss.value.is_some());
            let (asset, token) =
                input.issuance_ids(input.issuance_value_comm.is_some() || amount_blinded);
            if !input.issuance_amount().is_null() {
                domain.push(SurjectionInput::Known {
                    asset,
                    asset_bf: AssetBlindingFactor::zero(),
                });
            }
            if !input.issuance_inflation_keys_amount().is_null() {
                domain.push(SurjectionInput::Known {
                    asset: token,
                    asset_bf: AssetBlindingFactor::zero(),
                });
            }
        }

        // 4. Pick the outputs to blind
        let mut plans = Vec::new();
        let mut pending = 0;
        for (index, out) in self.outputs.iter().enumerate() {
            let blinding_key = match out.blinding_key {
                Some(pk) => pk.inner,
                None => continue,
            };
            if out.amount_comm.is_some() || out.asset_comm.is_some() {
                continue;
            }
            let owned = out
                .blinder_index
                .map_or(true, |i| request.owns_input(i as usize));
            if !owned {
                pending += 1;
                continue;
            }
            let asset = match out.asset {
                Some(asset) if !asset.is_null() => asset,
                _ => return Err(fail(BlindingStatus::InvalidAsset, "output", index)),
            };
            let amount = out
                .amount
                .ok_or_else(|| fail(BlindingStatus::ScalarUnable, "output", index))?;
            plans.push(OutputPlan {
                index,
                asset,
                amount,
                blinding_key,
                asset_bf: AssetBlindingFactor::new(rng),
                value_bf: ValueBlindingFactor::new(rng),
            });
        }
        if plans.is_empty() {
            debug!("no output to blind");
            return Err(BlindingStatus::ScalarUnable);
        }

        // 5. Balance
        let mut inputs = request
            .input_secrets
            .values()
            .map(TxOutSecrets::value_blind_inputs)
            .collect::<Vec<BlindInput>>();
        for iss in &issuances {
            for amt in iss.value.iter().chain(iss.token.iter()) {
                inputs.push((0, AssetBlindingFactor::zero(), amt.value_bf));
            }
        }
        let is_last_blinder = pending == 0;
        let mut published_scalar = None;
        if is_last_blinder {
            for scalar in &self.global.scalars {
                inputs.push((0, AssetBlindingFactor::zero(), ValueBlindingFactor::from(*scalar)));
            }
            let (last, others) = plans.split_last_mut().ok_or(BlindingStatus::ScalarUnable)?;
            let outputs = others
                .iter()
                .map(|p| (p.amount, p.asset_bf, p.value_bf))
                .collect::<Vec<BlindInput>>();
            last.value_bf = ValueBlindingFactor::last(last.amount, last.asset_bf, &inputs, &outputs)
                .map_err(|_| fail(BlindingStatus::ScalarUnable, "output", last.index))?;
            if last.value_bf.is_zero() {
                return Err(fail(BlindingStatus::InvalidBlinder, "output", last.index));
            }
        } else {
            debug!("{} outputs left to other blinders, publishing scalar", pending);
            let outputs = plans
                .iter()
                .map(|p| (p.amount, p.asset_bf, p.value_bf))
                .collect::<Vec<BlindInput>>();
            let last_index = plans.last().map_or(0, |p| p.index);
            let scalar = ValueBlindingFactor::last(0, AssetBlindingFactor::zero(), &inputs, &outputs)
                .map_err(|_| fail(BlindingStatus::ScalarUnable, "output", last_index))?;
            published_scalar = Some(scalar.into_inner());
        }

        // 6. Commitments and proofs
        let mut blinded = Vec::with_capacity(plans.len());
        for plan in &plans {
            trace!("blinding output {}", plan.index);
            let out = &self.outputs[plan.index];
            let (_, asset_comm) = create_asset_commitment(secp, plan.asset, plan.asset_bf)
                .map_err(|s| fail(s, "output", plan.index))?;
            if plan.value_bf.is_zero() {
                return Err(fail(BlindingStatus::InvalidBlinder, "output", plan.index));
            }
            let (_, amount_comm) =
                create_value_commitment(secp, plan.value_bf, asset_comm, plan.amount);
            let (ecdh_pubkey, nonce) = generate_rangeproof_ecdh_key(rng, secp, &plan.blinding_key)
                .map_err(|s| fail(s, "output", plan.index))?;
            let value_rangeproof = create_value_rangeproof(
                secp,
                policy,
                plan.value_bf,
                nonce,
                plan.amount,
                &out.script_pubkey,
                amount_comm,
                asset_comm,
                plan.asset,
                plan.asset_bf,
            )
            .map_err(|s| fail(s, "output", plan.index))?;
            let asset_surjection_proof = create_asset_surjection_proof(
                rng,
                secp,
                &domain,
                plan.asset_bf,
                asset_comm,
                plan.asset,
            )
            .map_err(|s| fail(s, "output", plan.index))?;
            let blind_value_proof = RangeProof::blind_value_proof(
                rng,
                secp,
                plan.amount,
                amount_comm,
                asset_comm,
                plan.value_bf,
            )
            .map_err(|_| fail(BlindingStatus::AspUnable, "output", plan.index))?;
            let blind_asset_proof =
                SurjectionProof::blind_asset_proof(rng, secp, plan.asset, plan.asset_bf)
                    .map_err(|_| fail(BlindingStatus::AspUnable, "output", plan.index))?;
            blinded.push(BlindedOutput {
                index: plan.index,
                asset_comm,
                amount_comm,
                ecdh_pubkey,
                value_rangeproof,
                asset_surjection_proof,
                blind_value_proof,
                blind_asset_proof,
            });
        }

        // 7. Write back
        let mut secrets = BlindingSecrets::default();
        for b in blinded {
            let out = &mut self.outputs[b.index];
            out.asset_comm = Some(b.asset_comm);
            out.amount_comm = Some(b.amount_comm);
            out.ecdh_pubkey = Some(bitcoin::PublicKey::new(b.ecdh_pubkey));
            out.value_rangeproof = Some(Box::new(b.value_rangeproof));
            out.asset_surjection_proof = Some(Box::new(b.asset_surjection_proof));
            out.blind_value_proof = Some(Box::new(b.blind_value_proof));
            out.blind_asset_proof = Some(Box::new(b.blind_asset_proof));
        }
        for plan in &plans {
            secrets.outputs.insert(
                plan.index,
                TxOutSecrets::new(plan.asset, plan.asset_bf, plan.amount, plan.value_bf),
            );
        }
        for iss in issuances {
            let input = &mut self.inputs[iss.index];
            if let Some(value) = iss.value {
                input.issuance_value_comm = Some(value.comm);
                input.issuance_value_rangeproof = Some(Box::new(value.rangeproof));
                input.in_issuance_blind_value_proof = Some(Box::new(value.blind_proof));
                secrets.issuance_value_bfs.insert(iss.index, value.value_bf);
            }
            if let Some(token) = iss.token {
                input.issuance_inflation_keys_comm = Some(token.comm);
                input.issuance_keys_rangeproof = Some(Box::new(token.rangeproof));
                input.in_issuance_blind_inflation_keys_proof = Some(Box::new(token.blind_proof));
                secrets.issuance_token_bfs.insert(iss.index, token.value_bf);
            }
        }
        match published_scalar {
            Some(scalar) => self.global.scalars.push(scalar),
            None => self.global.scalars.clear(),
        }
        secrets.published_scalar = published_scalar;

        debug!("blinded {} outputs", secrets.outputs.len());
        Ok(secrets)
    }
}

/// Blind `pset` and report the outcome as a bare status.
///
/// See [`PartiallySignedTransaction::blind`].
pub fn blind_pset<R: RngCore + CryptoRng, C: Signing + Verification>(
    pset: &mut PartiallySignedTransaction,
    rng: &mut R,
    secp: &Secp256k1<C>,
    request: &BlindingRequest,
) -> BlindingStatus {
    match pset.blind(rng, secp, request) {
        Ok(_) => BlindingStatus::Ok,
        Err(status) => status,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rand::thread_rng;
    use secp256k1_zkp::SECP256K1;

    use super::*;
    use crate::pset::{Input, Output};
    use crate::{OutPoint, Txid};

    fn asset(b: u8) -> AssetId {
        AssetId::from_byte_array([b; 32])
    }

    fn blinding_key() -> bitcoin::PublicKey {
        let sk = SecretKey::new(&mut thread_rng());
        bitcoin::PublicKey::new(PublicKey::from_secret_key(SECP256K1, &sk))
    }

    fn input(vout: u32, utxo: Option<TxOut>) -> Input {
        let txid =
            Txid::from_str("05a047c98e82a848dee94efcf32462b065198bebf2404d201ba2e06db30b28f4")
                .unwrap();
        let mut inp = Input::from_prevout(OutPoint::new(txid, vout));
        inp.witness_utxo = utxo;
        inp
    }

    /// One explicit input of 1000 units of asset 1, one blindable output of
    /// 900 and a fee of 100.
    fn simple_pset() -> (PartiallySignedTransaction, BlindingRequest) {
        let mut pset = PartiallySignedTransaction::new_v2();
        pset.add_input(input(0, Some(TxOut::new_explicit(1_000, asset(1), Script::new()))));
        pset.add_output(Output::new_explicit(
            Script::from(vec![0x51]),
            900,
            asset(1),
            Some(blinding_key()),
        ));
        pset.add_output(Output::from_txout(TxOut::new_fee(100, asset(1))));
        let request = BlindingRequest::new().with_input(0, TxOutSecrets::explicit(asset(1), 1_000));
        (pset, request)
    }

    fn status(pset: &mut PartiallySignedTransaction, request: &BlindingRequest) -> BlindingStatus {
        blind_pset(pset, &mut thread_rng(), SECP256K1, request)
    }

    #[test]
    fn blinds_single_output() {
        let (mut pset, request) = simple_pset();
        let secrets = pset.blind(&mut thread_rng(), SECP256K1, &request).unwrap();
        assert!(pset.outputs[0].is_fully_blinded());
        assert!(pset.outputs[1].amount_comm.is_none());
        assert_eq!(secrets.outputs.len(), 1);
        assert_eq!(secrets.outputs[&0].value, 900);
        assert_eq!(secrets.published_scalar, None);
        // explicit input, a single output: the offset of the output is zero
        assert_eq!(secrets.outputs[&0].scalar_offset().unwrap(), ValueBlindingFactor::zero());
    }

    #[test]
    fn no_blinding_key_is_scalar_unable() {
        let (mut pset, request) = simple_pset();
        pset.outputs[0].blinding_key = None;
        let before = pset.clone();
        assert_eq!(status(&mut pset, &request), BlindingStatus::ScalarUnable);
        assert_eq!(pset, before);
    }

    #[test]
    fn missing_utxo() {
        let (mut pset, request) = simple_pset();
        pset.inputs[0].witness_utxo = None;
        assert_eq!(status(&mut pset, &request), BlindingStatus::NeedsUtxos);

        let (mut pset, request) = simple_pset();
        let request = request.with_input(3, TxOutSecrets::explicit(asset(1), 1));
        assert_eq!(status(&mut pset, &request), BlindingStatus::NeedsUtxos);
    }

    #[test]
    fn secrets_must_open_the_utxo() {
        let (mut pset, _) = simple_pset();
        let wrong_asset = BlindingRequest::new().with_input(0, TxOutSecrets::explicit(asset(2), 1_000));
        assert_eq!(status(&mut pset, &wrong_asset), BlindingStatus::InvalidAsset);

        let wrong_value = BlindingRequest::new().with_input(0, TxOutSecrets::explicit(asset(1), 999));
        assert_eq!(status(&mut pset, &wrong_value), BlindingStatus::InvalidBlinder);

        let mut rng = thread_rng();
        let abf = AssetBlindingFactor::new(&mut rng);
        let wrong_abf = BlindingRequest::new().with_input(
            0,
            TxOutSecrets::new(asset(1), abf, 1_000, ValueBlindingFactor::zero()),
        );
        assert_eq!(status(&mut pset, &wrong_abf), BlindingStatus::InvalidAssetCommitment);
        assert!(pset.outputs[0].amount_comm.is_none());
    }

    #[test]
    fn confidential_utxo_checked_against_commitments() {
        let mut rng = thread_rng();
        let abf = AssetBlindingFactor::new(&mut rng);
        let vbf = ValueBlindingFactor::new(&mut rng);
        let (conf_asset, gen) = create_asset_commitment(SECP256K1, asset(1), abf).unwrap();
        let (conf_value, _) = create_value_commitment(SECP256K1, vbf, gen, 1_000);
        let utxo = TxOut {
            asset: conf_asset,
            value: conf_value,
            ..Default::default()
        };

        let (mut pset, _) = simple_pset();
        pset.inputs[0].witness_utxo = Some(utxo);
        let good = BlindingRequest::new().with_input(0, TxOutSecrets::new(asset(1), abf, 1_000, vbf));
        let bad_vbf = BlindingRequest::new().with_input(
            0,
            TxOutSecrets::new(asset(1), abf, 1_000, ValueBlindingFactor::new(&mut rng)),
        );
        let bad_abf = BlindingRequest::new().with_input(
            0,
            TxOutSecrets::new(asset(1), AssetBlindingFactor::new(&mut rng), 1_000, vbf),
        );
        assert_eq!(status(&mut pset.clone(), &bad_vbf), BlindingStatus::InvalidBlinder);
        assert_eq!(status(&mut pset.clone(), &bad_abf), BlindingStatus::InvalidAssetCommitment);
        assert_eq!(status(&mut pset, &good), BlindingStatus::Ok);
    }

    #[test]
    fn output_asset_not_among_inputs() {
        let (mut pset, request) = simple_pset();
        pset.outputs[0].asset = Some(asset(7));
        let before = pset.clone();
        assert_eq!(status(&mut pset, &request), BlindingStatus::InvalidAsset);
        assert_eq!(pset, before);

        pset.outputs[0].asset = None;
        assert_eq!(status(&mut pset, &request), BlindingStatus::InvalidAsset);
    }

    #[test]
    fn output_without_amount() {
        let (mut pset, request) = simple_pset();
        pset.outputs[0].amount = None;
        assert_eq!(status(&mut pset, &request), BlindingStatus::ScalarUnable);
    }

    #[test]
    fn issuance_keys_without_issuance_are_skipped() {
        let (mut pset, request) = simple_pset();
        let keys = IssuanceBlindingKeys {
            value_key: Some(SecretKey::new(&mut thread_rng())),
            token_key: Some(SecretKey::new(&mut thread_rng())),
        };
        let request = request.with_issuance(0, keys);
        let secrets = pset.blind(&mut thread_rng(), SECP256K1, &request).unwrap();
        assert!(pset.outputs[0].is_fully_blinded());
        assert!(secrets.issuance_value_bfs.is_empty());
        assert!(secrets.issuance_token_bfs.is_empty());
        assert!(!pset.inputs[0].has_issuance());
        assert!(pset.inputs[0].issuance_value_rangeproof.is_none());
    }

    #[test]
    fn zero_amount_fails_rangeproof() {
        let (mut pset, request) = simple_pset();
        let zero = Output::new_explicit(Script::from(vec![0x52]), 0, asset(1), Some(blinding_key()));
        pset.outputs.insert(0, zero);
        assert_eq!(status(&mut pset, &request), BlindingStatus::AspUnable);
        assert!(!pset.outputs[0].is_partially_blinded());
        assert!(!pset.outputs[1].is_partially_blinded());
    }

    #[test]
    fn other_partys_outputs_are_left_alone() {
        let (mut pset, request) = simple_pset();
        pset.add_input(input(1, Some(TxOut::new_explicit(50, asset(1), Script::new()))));
        let mut theirs = Output::new_explicit(Script::new(), 50, asset(1), Some(blinding_key()));
        theirs.blinder_index = Some(1);
        pset.add_output(theirs);

        let secrets = pset.blind(&mut thread_rng(), SECP256K1, &request).unwrap();
        assert!(pset.outputs[0].is_fully_blinded());
        assert!(!pset.outputs[2].is_partially_blinded());
        let scalar = secrets.published_scalar.unwrap();
        assert_eq!(pset.global.scalars, vec![scalar]);
        // the published scalar is minus the offset of our only output
        let offset = secrets.outputs[&0].scalar_offset().unwrap();
        assert_eq!(
            ValueBlindingFactor::from(scalar).checked_add(offset).unwrap(),
            ValueBlindingFactor::zero()
        );
    }
}
