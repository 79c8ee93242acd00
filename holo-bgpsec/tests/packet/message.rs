//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use bytes::Bytes;
use holo_bgpsec::packet::attribute::{
    SecurePathAttr, SecurePathSegment, SignatureBlock,
};
use holo_bgpsec::packet::consts::{SECURE_PATH_ATTR_TYPE, SuiteId};
use holo_bgpsec::packet::error::{DecodeError, EncodeError};
use holo_bgpsec::packet::message::UpdateMsg;

use super::{test_decode_msg, test_encode_msg};

// UPDATE carrying a single-hop Secure_Path attribute and 192.0.2.0/24.
//
// The body starts with the 2-octet Withdrawn Routes Length (RFC 4271), here
// 0x0000, even when no routes are withdrawn. Encoders that write the withdrawn
// routes without this length field produce a body two octets shorter.
static UPDATE1: Lazy<(Vec<u8>, UpdateMsg)> = Lazy::new(|| {
    (
        vec![
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x2b, 0x02, 0x00, 0x00, 0x00,
            0x10, 0xc0, 0x11, 0x0d, 0x00, 0x00, 0xfc, 0x00, 0x01, 0x00, 0x03,
            0x00, 0x04, 0xde, 0xad, 0xbe, 0xef, 0x18, 0xc0, 0x00, 0x02,
        ],
        UpdateMsg::new(
            Bytes::new(),
            vec![Bytes::from_static(&[
                0xc0, 0x11, 0x0d, 0x00, 0x00, 0xfc, 0x00, 0x01, 0x00, 0x03,
                0x00, 0x04, 0xde, 0xad, 0xbe, 0xef,
            ])],
            Bytes::from_static(&[0x18, 0xc0, 0x00, 0x02]),
        ),
    )
});

// UPDATE with withdrawn routes, ORIGIN and an extended-length AS_PATH.
//
// Withdrawn Routes Length 0x0004 precedes 198.51.100.0/24.
static UPDATE2: Lazy<(Vec<u8>, UpdateMsg)> = Lazy::new(|| {
    (
        vec![
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x2d, 0x02, 0x00, 0x04, 0x18,
            0xc6, 0x33, 0x64, 0x00, 0x0e, 0x40, 0x01, 0x01, 0x00, 0x50, 0x02,
            0x00, 0x06, 0x02, 0x01, 0x00, 0x00, 0xfc, 0x00, 0x18, 0xc0, 0x00,
            0x02,
        ],
        UpdateMsg::new(
            Bytes::from_static(&[0x18, 0xc6, 0x33, 0x64]),
            vec![
                Bytes::from_static(&[0x40, 0x01, 0x01, 0x00]),
                Bytes::from_static(&[
                    0x50, 0x02, 0x00, 0x06, 0x02, 0x01, 0x00, 0x00, 0xfc, 0x00,
                ]),
            ],
            Bytes::from_static(&[0x18, 0xc0, 0x00, 0x02]),
        ),
    )
});

// KEEPALIVE.
static KEEPALIVE: [u8; 19] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0x00, 0x13, 0x04,
];

#[test]
fn test_encode_update1() {
    let (ref bytes, ref msg) = *UPDATE1;
    test_encode_msg(bytes, msg);
}

#[test]
fn test_decode_update1() {
    let (ref bytes, ref msg) = *UPDATE1;
    test_decode_msg(bytes, msg);
}

#[test]
fn test_encode_update2() {
    let (ref bytes, ref msg) = *UPDATE2;
    test_encode_msg(bytes, msg);
}

#[test]
fn test_decode_update2() {
    let (ref bytes, ref msg) = *UPDATE2;
    test_decode_msg(bytes, msg);
}

#[test]
fn test_update_length() {
    let (ref bytes, ref msg) = *UPDATE2;
    assert_eq!(msg.length(), bytes.len());
    assert_eq!(UpdateMsg::get_message_len(bytes), Some(bytes.len()));
}

#[test]
fn test_update_secure_path() {
    let (ref bytes, _) = *UPDATE1;
    let msg = UpdateMsg::decode(bytes).unwrap();
    let attr = msg.secure_path().unwrap().unwrap();
    assert_eq!(
        attr,
        SecurePathAttr::new(
            vec![SecurePathSegment::new(64512, 1, 0)],
            vec![vec![SignatureBlock::new(
                SuiteId::Falcon512 as u8,
                Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            )]],
        )
    );
    assert!(msg.find_attr(SECURE_PATH_ATTR_TYPE).is_some());
}

#[test]
fn test_update_without_secure_path() {
    let (ref bytes, _) = *UPDATE2;
    let msg = UpdateMsg::decode(bytes).unwrap();
    assert_eq!(msg.secure_path(), Ok(None));
    assert_eq!(
        msg.find_attr(2).map(Bytes::len),
        Some(10),
        "extended-length attribute must be split on its 2-octet length"
    );
}

#[test]
fn test_decode_trailing_bytes_ignored() {
    let (ref bytes, ref msg) = *UPDATE1;
    let mut data = bytes.clone();
    data.extend_from_slice(&[0xaa, 0xbb, 0xcc]);
    assert_eq!(UpdateMsg::decode(&data).unwrap(), *msg);
}

#[test]
fn test_decode_invalid_marker() {
    let (ref bytes, _) = *UPDATE1;
    let mut data = bytes.clone();
    data[5] = 0x00;
    assert_eq!(UpdateMsg::decode(&data), Err(DecodeError::InvalidMarker));
}

#[test]
fn test_decode_wrong_message_type() {
    assert_eq!(
        UpdateMsg::decode(&KEEPALIVE),
        Err(DecodeError::WrongMessageType(4))
    );
}

#[test]
fn test_decode_truncated_header() {
    assert_eq!(
        UpdateMsg::decode(&KEEPALIVE[..10]),
        Err(DecodeError::TruncatedMessage {
            expected: 19,
            received: 10,
        })
    );
}

#[test]
fn test_decode_truncated_message() {
    let (ref bytes, _) = *UPDATE1;
    assert_eq!(
        UpdateMsg::decode(&bytes[..30]),
        Err(DecodeError::TruncatedMessage {
            expected: 43,
            received: 30,
        })
    );
    assert_eq!(UpdateMsg::get_message_len(&bytes[..30]), None);
}

#[test]
fn test_decode_attr_length_overrun() {
    // Path attributes length claims more bytes than the message holds.
    let (ref bytes, _) = *UPDATE1;
    let mut data = bytes.clone();
    data[22] = 0x30;
    assert_eq!(UpdateMsg::decode(&data), Err(DecodeError::TruncatedInput));
}

#[test]
fn test_encode_message_too_large() {
    let msg = UpdateMsg::new(
        Bytes::new(),
        vec![Bytes::from(vec![0x00; UpdateMsg::MAX_LEN])],
        Bytes::new(),
    );
    assert!(matches!(
        msg.encode(),
        Err(EncodeError::MessageTooLarge(_))
    ));
}
