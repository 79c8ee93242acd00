//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{debug, debug_span, warn};

use crate::packet::consts::SuiteId;
use crate::packet::message::UpdateMsg;
use crate::suite::SuiteError;

// BGPsec debug messages.
#[derive(Debug)]
pub enum Debug<'a> {
    KeypairsGenerated(usize, SuiteId),
    HopSigned(usize, u32, usize),
    HopVerified(usize, u32, bool),
    HopNoSignature(usize, u32),
    HopSuiteError(usize, u32, &'a SuiteError),
    PathSigned(usize, usize),
    PathVerified(bool),
    AttrTooLarge(usize, usize),
    UpdateMsgBuilt(&'a UpdateMsg),
}

// ===== impl Debug =====

impl Debug<'_> {
    // Log debug message using the tracing API.
    pub(crate) fn log(&self) {
        match self {
            Debug::KeypairsGenerated(count, suite) => {
                // Parent span(s): bgpsec-path
                debug!(%count, %suite, "{}", self);
            }
            Debug::HopSigned(hop, asn, sig_len) => {
                // Parent span(s): bgpsec-path
                debug_span!("hop", %hop, %asn).in_scope(|| {
                    debug!(%sig_len, "{}", self);
                });
            }
            Debug::HopVerified(hop, asn, valid) => {
                // Parent span(s): bgpsec-path
                debug_span!("hop", %hop, %asn).in_scope(|| {
                    debug!(%valid, "{}", self);
                });
            }
            Debug::HopNoSignature(hop, asn) => {
                // Parent span(s): bgpsec-path
                debug_span!("hop", %hop, %asn).in_scope(|| {
                    debug!("{}", self);
                });
            }
            Debug::HopSuiteError(hop, asn, error) => {
                // Parent span(s): bgpsec-path
                debug_span!("hop", %hop, %asn).in_scope(|| {
                    debug!(%error, "{}", self);
                });
            }
            Debug::PathSigned(hops, attr_len) => {
                // Parent span(s): bgpsec-path
                debug!(%hops, %attr_len, "{}", self);
            }
            Debug::PathVerified(valid) => {
                // Parent span(s): bgpsec-path
                debug!(%valid, "{}", self);
            }
            Debug::AttrTooLarge(length, hops) => {
                warn!(%length, %hops, "{}", self);
            }
            Debug::UpdateMsgBuilt(msg) => {
                // Parent span(s): bgpsec-path
                debug_span!("output").in_scope(|| {
                    if let Ok(data) = serde_json::to_string(&msg) {
                        debug!(%data, "{}", self);
                    }
                });
            }
        }
    }
}

impl std::fmt::Display for Debug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Debug::KeypairsGenerated(..) => {
                write!(f, "keypairs generated")
            }
            Debug::HopSigned(..) => {
                write!(f, "hop signed")
            }
            Debug::HopVerified(..) => {
                write!(f, "hop verified")
            }
            Debug::HopNoSignature(..) => {
                write!(f, "hop has no signature")
            }
            Debug::HopSuiteError(..) => {
                write!(f, "signature verification failed")
            }
            Debug::PathSigned(..) => {
                write!(f, "path signed")
            }
            Debug::PathVerified(..) => {
                write!(f, "path verified")
            }
            Debug::AttrTooLarge(..) => {
                write!(
                    f,
                    "Secure_Path attribute exceeds the BGP attribute limit"
                )
            }
            Debug::UpdateMsgBuilt(..) => {
                write!(f, "message")
            }
        }
    }
}
