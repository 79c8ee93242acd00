//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use arbitrary::Arbitrary;
use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

// Type code of the Secure_Path attribute as carried on the wire by this
// implementation.
//
// NOTE: IANA assigned code 33 to BGPsec_Path (RFC 8205). Peers exchanging
// this encoding must agree on code 17.
pub const SECURE_PATH_ATTR_TYPE: u8 = 17;

// Largest value representable by a BGP attribute length field.
pub const ATTR_MAX_LEN: usize = 65535;

// Attribute data lengths above this value require the extended length bit.
pub const ATTR_SHORT_MAX_LEN: usize = 255;

// Largest signature a Signature_Block length field can describe.
pub const SIGNATURE_MAX_LEN: usize = 65535;

// BGP Message Types.
//
// IANA registry:
// https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-1
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
pub enum MessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    Keepalive = 4,
}

// BGP Path Attribute Flags.
bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct AttrFlags: u8 {
        const OPTIONAL = 0x80;
        const TRANSITIVE = 0x40;
        const PARTIAL = 0x20;
        const EXTENDED = 0x10;
    }
}

// BGPsec Algorithm Suite Identifiers.
//
// IANA registry:
// https://www.iana.org/assignments/bgpsec-algorithm-suites/bgpsec-algorithm-suites.xhtml
//
// Suites outside the registry are tagged as experimental so that standard
// post-quantum code points can be added later without renumbering.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(FromPrimitive, ToPrimitive)]
#[derive(Deserialize, Serialize)]
#[derive(Arbitrary)]
pub enum SuiteId {
    // RFC 8208
    EcdsaP256 = 0x01,
    EcdsaP384 = 0x02,
    // Provisional code point, not IETF registered.
    Falcon512 = 0x03,
    // Local code point for keyed-hash test signatures.
    KeyedHash = 0xfe,
}

// Registration status of an algorithm suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum SuiteStatus {
    Registered,
    Experimental,
}

// ===== impl SuiteId =====

impl SuiteId {
    pub fn status(&self) -> SuiteStatus {
        match self {
            SuiteId::EcdsaP256 | SuiteId::EcdsaP384 => SuiteStatus::Registered,
            SuiteId::Falcon512 | SuiteId::KeyedHash => {
                SuiteStatus::Experimental
            }
        }
    }
}

impl std::fmt::Display for SuiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuiteId::EcdsaP256 => write!(f, "ecdsa-p256"),
            SuiteId::EcdsaP384 => write!(f, "ecdsa-p384"),
            SuiteId::Falcon512 => write!(f, "falcon-512"),
            SuiteId::KeyedHash => write!(f, "keyed-hash"),
        }
    }
}
