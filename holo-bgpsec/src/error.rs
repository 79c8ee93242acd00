//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tracing::{error, warn};

use crate::packet::error::{DecodeError, EncodeError};
use crate::suite::SuiteError;

// BGPsec path errors.
#[derive(Debug)]
pub enum Error {
    // Input validation
    InvalidPrefix(String),
    Config(String),
    // Workflow
    KeysNotGenerated,
    // Wire format
    Encode(EncodeError),
    Decode(DecodeError),
    // Signature suite
    Suite(SuiteError),
}

// ===== impl Error =====

impl Error {
    pub fn log(&self) {
        match self {
            Error::InvalidPrefix(prefix) => {
                warn!(%prefix, "{}", self);
            }
            Error::Config(..) | Error::KeysNotGenerated => {
                warn!("{}", self);
            }
            Error::Encode(error) => {
                warn!(error = %with_source(error), "{}", self);
            }
            Error::Decode(error) => {
                warn!(error = %with_source(error), "{}", self);
            }
            Error::Suite(error) => {
                error!(error = %with_source(error), "{}", self);
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPrefix(..) => {
                write!(f, "invalid IPv4 prefix")
            }
            Error::Config(reason) => {
                write!(f, "invalid path configuration: {reason}")
            }
            Error::KeysNotGenerated => {
                write!(f, "keypairs not generated")
            }
            Error::Encode(..) => {
                write!(f, "failed to encode Secure_Path")
            }
            Error::Decode(..) => {
                write!(f, "failed to decode message")
            }
            Error::Suite(..) => {
                write!(f, "signature suite failure")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Encode(error) => Some(error),
            Error::Decode(error) => Some(error),
            Error::Suite(error) => Some(error),
            _ => None,
        }
    }
}

impl From<EncodeError> for Error {
    fn from(error: EncodeError) -> Error {
        Error::Encode(error)
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Error {
        Error::Decode(error)
    }
}

impl From<SuiteError> for Error {
    fn from(error: SuiteError) -> Error {
        Error::Suite(error)
    }
}

// ===== global functions =====

fn with_source<E: std::error::Error>(error: E) -> String {
    if let Some(source) = error.source() {
        format!("{} ({})", error, with_source(source))
    } else {
        error.to_string()
    }
}
