//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_bgpsec::config::{PathConfig, PrefixConfig};
use holo_bgpsec::error::Error;
use holo_bgpsec::path::BgpsecPath;
use holo_bgpsec::testing::HmacSuite;

use super::setup;

#[test]
fn path_from_json() {
    setup();
    let config = PathConfig::from_json(
        r#"{
            "as-path": [64512, 15169, 3356],
            "nlri": [
                { "prefix": "192.0.2.0", "length": 24 },
                { "prefix": "198.51.100.0", "length": 24 }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.as_path, vec![64512, 15169, 3356]);
    assert_eq!(
        config.prefixes(),
        vec![("192.0.2.0", 24), ("198.51.100.0", 24)]
    );

    let mut path =
        BgpsecPath::from_config(&config, HmacSuite::default()).unwrap();
    assert_eq!(path.prefixes().len(), 2);
    assert_eq!(
        path.nlri()[..],
        [0x18, 0xc0, 0x00, 0x02, 0x18, 0xc6, 0x33, 0x64]
    );

    let attr = path.sign_path().unwrap();
    assert!(path.verify_path(&attr).unwrap().valid);
}

#[test]
fn nlri_defaults_to_empty() {
    let config = PathConfig::from_json(r#"{ "as-path": [64512] }"#).unwrap();
    assert!(config.nlri.is_empty());
}

#[test]
fn empty_as_path() {
    assert!(matches!(
        PathConfig::from_json(r#"{ "as-path": [] }"#),
        Err(Error::Config(_))
    ));

    let config = PathConfig {
        as_path: vec![],
        nlri: vec![],
    };
    assert!(matches!(
        BgpsecPath::from_config(&config, HmacSuite::default()),
        Err(Error::Config(_))
    ));
}

#[test]
fn malformed_json() {
    assert!(matches!(
        PathConfig::from_json(r#"{ "as-path": "64512" }"#),
        Err(Error::Config(_))
    ));
}

#[test]
fn invalid_prefix() {
    let config = PathConfig {
        as_path: vec![64512],
        nlri: vec![PrefixConfig {
            prefix: "192.0.2.300".to_owned(),
            length: 24,
        }],
    };
    assert!(matches!(
        BgpsecPath::from_config(&config, HmacSuite::default()),
        Err(Error::InvalidPrefix(_))
    ));
}
