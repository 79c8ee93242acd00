//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::TryGetError;
use serde::{Deserialize, Serialize};

// Type aliases.
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type EncodeResult<T> = Result<T, EncodeError>;

// Decoding errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum DecodeError {
    TruncatedInput,
    InvalidMarker,
    WrongMessageType(u8),
    TruncatedMessage { expected: usize, received: usize },
    UnexpectedAttrType(u8),
}

// Encoding errors.
//
// These are hard protocol limits. Nothing is truncated to make a value fit.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum EncodeError {
    AttributeTooLarge { length: usize, hops: usize },
    SignatureTooLarge(usize),
    MessageTooLarge(usize),
    BlockCountMismatch { segments: usize, blocks: usize },
    PcountMismatch { hop: usize, pcount: u8, blocks: usize },
}

// ===== impl DecodeError =====

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::TruncatedInput => {
                write!(f, "attempt to read out of bounds")
            }
            DecodeError::InvalidMarker => {
                write!(f, "invalid message marker")
            }
            DecodeError::WrongMessageType(msg_type) => {
                write!(f, "not an UPDATE message: type {msg_type}")
            }
            DecodeError::TruncatedMessage { expected, received } => {
                write!(
                    f,
                    "message truncated: {received} of {expected} bytes"
                )
            }
            DecodeError::UnexpectedAttrType(attr_type) => {
                write!(f, "not a Secure_Path attribute: type {attr_type}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<TryGetError> for DecodeError {
    fn from(_error: TryGetError) -> DecodeError {
        DecodeError::TruncatedInput
    }
}

// ===== impl EncodeError =====

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::AttributeTooLarge { length, hops } => {
                write!(
                    f,
                    "Secure_Path attribute exceeds maximum attribute length: \
                     {length} bytes > 65535 bytes ({hops} hops)"
                )
            }
            EncodeError::SignatureTooLarge(length) => {
                write!(f, "signature too large: {length} bytes")
            }
            EncodeError::MessageTooLarge(length) => {
                write!(f, "message too large: {length} bytes")
            }
            EncodeError::BlockCountMismatch { segments, blocks } => {
                write!(
                    f,
                    "{blocks} signature block lists for {segments} segments"
                )
            }
            EncodeError::PcountMismatch { hop, pcount, blocks } => {
                write!(
                    f,
                    "hop {hop}: pCount {pcount}, {blocks} signature blocks"
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}
