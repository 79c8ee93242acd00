//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod ecdsa;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::packet::consts::SuiteId;

// Signature algorithm suite provider.
//
// The signing key is an opaque handle: the path engine only hands it back to
// `sign` and never inspects or serializes it.
pub trait SignatureSuite {
    type SigningKey;

    // Algorithm suite identifier placed in every Signature_Block.
    fn suite_id(&self) -> SuiteId;

    // Generates a new keypair, returning the signing handle and the public
    // key.
    fn generate_keypair(&self) -> Result<(Self::SigningKey, Bytes), SuiteError>;

    // Signs `msg`.
    fn sign(
        &self,
        key: &Self::SigningKey,
        msg: &[u8],
    ) -> Result<Bytes, SuiteError>;

    // Verifies `signature` over `msg`.
    //
    // An error means the input was malformed (e.g. a key or signature of the
    // wrong size), not that the signature is invalid.
    fn verify(
        &self,
        public_key: &[u8],
        msg: &[u8],
        signature: &[u8],
    ) -> Result<bool, SuiteError>;
}

// Signature suite errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SuiteError {
    KeyGeneration(String),
    Signing(String),
    MalformedInput(String),
}

// ===== impl SuiteError =====

impl std::fmt::Display for SuiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuiteError::KeyGeneration(reason) => {
                write!(f, "failed to generate keypair: {reason}")
            }
            SuiteError::Signing(reason) => {
                write!(f, "failed to sign: {reason}")
            }
            SuiteError::MalformedInput(reason) => {
                write!(f, "malformed input: {reason}")
            }
        }
    }
}

impl std::error::Error for SuiteError {}
