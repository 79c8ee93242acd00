//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use arbitrary::{Arbitrary, Result as ArbitraryResult, Unstructured};
use bytes::Bytes;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::packet::consts::SuiteId;
use crate::suite::{SignatureSuite, SuiteError};

type HmacSha256 = Hmac<Sha256>;

const HMAC_KEY_LEN: usize = 32;
const HMAC_TAG_LEN: usize = 32;

// Keyed-hash signature suite for tests.
//
// HMAC-SHA256 stands in for a signature algorithm. The "public key" is the
// secret key itself, so this only exercises the path engine and must never be
// used to protect real routes. Blocks are tagged with the local keyed-hash
// code point unless another suite is requested.
#[derive(Clone, Copy, Debug)]
pub struct HmacSuite {
    suite_id: SuiteId,
}

// Used when implementing external traits on Bytes e.g Arbitrary.
#[derive(Debug)]
pub struct BytesArbitrary(pub Bytes);

// ===== macros =====

/// Asserts that two byte slices are equal, printing differences in hex format
/// if they are not.
#[macro_export]
macro_rules! assert_eq_hex {
    ($left:expr, $right:expr) => {
        if $left[..] != $right[..] {
            panic!(
                "assertion `left == right` failed\n  left: [{}]\n right: [{}]",
                $left
                    .iter()
                    .map(|b| format!("0x{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(", "),
                $right
                    .iter()
                    .map(|b| format!("0x{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    };
}

// ===== impl HmacSuite =====

impl HmacSuite {
    pub fn new(suite_id: SuiteId) -> Self {
        HmacSuite { suite_id }
    }

    fn mac(key: &[u8]) -> Result<HmacSha256, SuiteError> {
        if key.len() != HMAC_KEY_LEN {
            return Err(SuiteError::MalformedInput(format!(
                "invalid key length: {}",
                key.len()
            )));
        }
        HmacSha256::new_from_slice(key)
            .map_err(|error| SuiteError::MalformedInput(error.to_string()))
    }
}

impl Default for HmacSuite {
    fn default() -> Self {
        HmacSuite::new(SuiteId::KeyedHash)
    }
}

impl SignatureSuite for HmacSuite {
    type SigningKey = Bytes;

    fn suite_id(&self) -> SuiteId {
        self.suite_id
    }

    fn generate_keypair(&self) -> Result<(Bytes, Bytes), SuiteError> {
        let mut key = [0; HMAC_KEY_LEN];
        rand::rng().fill_bytes(&mut key);
        let key = Bytes::copy_from_slice(&key);
        Ok((key.clone(), key))
    }

    fn sign(&self, key: &Bytes, msg: &[u8]) -> Result<Bytes, SuiteError> {
        let mut mac = Self::mac(key)
            .map_err(|error| SuiteError::Signing(error.to_string()))?;
        mac.update(msg);
        Ok(Bytes::copy_from_slice(&mac.finalize().into_bytes()))
    }

    fn verify(
        &self,
        public_key: &[u8],
        msg: &[u8],
        signature: &[u8],
    ) -> Result<bool, SuiteError> {
        if signature.len() != HMAC_TAG_LEN {
            return Err(SuiteError::MalformedInput(format!(
                "invalid signature length: {}",
                signature.len()
            )));
        }
        let mut mac = Self::mac(public_key)?;
        mac.update(msg);
        Ok(mac.verify_slice(signature).is_ok())
    }
}

// ====== impl BytesArbitrary =====

impl Arbitrary<'_> for BytesArbitrary {
    fn arbitrary(u: &mut Unstructured<'_>) -> ArbitraryResult<Self> {
        let len = u.len();
        let bytes = u.bytes(len)?;
        Ok(Self(Bytes::copy_from_slice(bytes)))
    }
}
