//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_bgpsec::packet::consts::SuiteId;
use holo_bgpsec::packet::message::UpdateMsg;
use holo_bgpsec::path::BgpsecPath;
use holo_bgpsec::suite::ecdsa::EcdsaP256Suite;

use super::{AS_PATH, setup};

fn new_path(as_path: &[u32]) -> BgpsecPath<EcdsaP256Suite> {
    setup();
    BgpsecPath::new(as_path.to_vec(), &[("192.0.2.0", 24)], EcdsaP256Suite)
        .unwrap()
}

#[test]
fn sign_and_verify() {
    let mut path = new_path(&AS_PATH);
    let attr = path.sign_path().unwrap();

    for (_, blocks) in attr.hops() {
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].suite(), Some(SuiteId::EcdsaP256));
        assert_eq!(blocks[0].signature.len(), 64);
    }
    assert!(path.public_keys().iter().all(|key| key.len() == 65));

    let result = path.verify_path(&attr).unwrap();
    assert!(result.valid);
    assert_eq!(result.hops, vec![true, true, true]);

    let size = path.path_size(&attr);
    assert_eq!(size.total_signature_size, 3 * 64);
    assert_eq!(size.avg_signature_size, 64.0);
}

#[test]
fn verify_after_wire_round_trip() {
    let mut path = new_path(&AS_PATH);
    let attr = path.sign_path().unwrap();

    let bytes = path.update_msg(&attr).unwrap().encode().unwrap();
    let decoded = UpdateMsg::decode(&bytes).unwrap();
    let decoded_attr = decoded.secure_path().unwrap().unwrap();
    assert_eq!(decoded_attr, attr);
    assert!(path.verify_path(&decoded_attr).unwrap().valid);
}

#[test]
fn verify_tampered_signature() {
    let mut path = new_path(&AS_PATH);
    let mut attr = path.sign_path().unwrap();
    let mut signature = attr.sig_blocks[1][0].signature.to_vec();
    signature[40] ^= 0x80;
    attr.sig_blocks[1][0].signature = signature.into();

    let result = path.verify_path(&attr).unwrap();
    assert_eq!(result.hops, vec![true, false, false]);
}

#[test]
fn verify_with_foreign_keys() {
    let mut path1 = new_path(&AS_PATH);
    let mut path2 = new_path(&AS_PATH);
    let attr = path1.sign_path().unwrap();
    path2.generate_keypairs().unwrap();

    let result = path2.verify_path(&attr).unwrap();
    assert_eq!(result.hops, vec![false, false, false]);
}
