//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use serde::{Deserialize, Serialize};

use crate::error::Error;

// Path signing configuration.
//
// Example (JSON):
//
//   {
//     "as-path": [64512, 15169, 3356],
//     "nlri": [{ "prefix": "192.0.2.0", "length": 24 }]
//   }
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathConfig {
    pub as_path: Vec<u32>,
    #[serde(default)]
    pub nlri: Vec<PrefixConfig>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PrefixConfig {
    pub prefix: String,
    pub length: u8,
}

// ===== impl PathConfig =====

impl PathConfig {
    pub fn from_json(data: &str) -> Result<Self, Error> {
        let config: PathConfig = serde_json::from_str(data)
            .map_err(|error| Error::Config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.as_path.is_empty() {
            return Err(Error::Config("empty AS path".to_owned()));
        }
        Ok(())
    }

    // Returns the NLRI as (address, prefix length) pairs.
    pub fn prefixes(&self) -> Vec<(&str, u8)> {
        self.nlri
            .iter()
            .map(|prefix| (prefix.prefix.as_str(), prefix.length))
            .collect()
    }
}
