//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::Bytes;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::RngCore;

use crate::packet::consts::SuiteId;
use crate::suite::{SignatureSuite, SuiteError};

const SECRET_KEY_LEN: usize = 32;
const KEYGEN_ATTEMPTS: usize = 4;

// ECDSA P-256 with SHA-256 (RFC 8208, suite 0x01).
//
// Public keys are uncompressed SEC1-encoded points (65 bytes). Signatures are
// the fixed-size r || s encoding (64 bytes) and use RFC 6979 deterministic
// nonces.
#[derive(Clone, Copy, Debug, Default)]
pub struct EcdsaP256Suite;

// ===== impl EcdsaP256Suite =====

impl SignatureSuite for EcdsaP256Suite {
    type SigningKey = SigningKey;

    fn suite_id(&self) -> SuiteId {
        SuiteId::EcdsaP256
    }

    fn generate_keypair(&self) -> Result<(SigningKey, Bytes), SuiteError> {
        // Random bytes outside the scalar range are rejected and redrawn.
        let mut secret = [0; SECRET_KEY_LEN];
        for _ in 0..KEYGEN_ATTEMPTS {
            rand::rng().fill_bytes(&mut secret);
            if let Ok(signing_key) = SigningKey::from_slice(&secret) {
                let public_key = Bytes::copy_from_slice(
                    signing_key
                        .verifying_key()
                        .to_encoded_point(false)
                        .as_bytes(),
                );
                return Ok((signing_key, public_key));
            }
        }
        Err(SuiteError::KeyGeneration(
            "no valid P-256 scalar drawn".to_owned(),
        ))
    }

    fn sign(&self, key: &SigningKey, msg: &[u8]) -> Result<Bytes, SuiteError> {
        let signature: Signature = key
            .try_sign(msg)
            .map_err(|error| SuiteError::Signing(error.to_string()))?;
        Ok(Bytes::copy_from_slice(&signature.to_bytes()))
    }

    fn verify(
        &self,
        public_key: &[u8],
        msg: &[u8],
        signature: &[u8],
    ) -> Result<bool, SuiteError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(public_key).map_err(|_| {
                SuiteError::MalformedInput("invalid public key".to_owned())
            })?;
        let signature = Signature::from_slice(signature).map_err(|_| {
            SuiteError::MalformedInput(format!(
                "invalid signature length: {}",
                signature.len()
            ))
        })?;
        Ok(verifying_key.verify(msg, &signature).is_ok())
    }
}

// ===== unit tests =====
