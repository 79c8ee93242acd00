//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod message;

use bytes::{Bytes, BytesMut};
use holo_bgpsec::assert_eq_hex;
use holo_bgpsec::packet::attribute::SecurePathAttr;
use holo_bgpsec::packet::message::UpdateMsg;

//
// Helper functions.
//

fn test_encode_attr(bytes_expected: &[u8], attr: &SecurePathAttr) {
    let mut bytes_actual = BytesMut::new();
    attr.encode(&mut bytes_actual).unwrap();
    assert_eq_hex!(bytes_expected, bytes_actual);
}

fn test_decode_attr(bytes: &[u8], attr_expected: &SecurePathAttr) {
    let mut buf = Bytes::copy_from_slice(bytes);
    let attr_actual = SecurePathAttr::decode(&mut buf).unwrap();
    assert_eq!(*attr_expected, attr_actual);
    assert!(buf.is_empty());
}

fn test_encode_msg(bytes_expected: &[u8], msg: &UpdateMsg) {
    let bytes_actual = msg.encode().unwrap();
    assert_eq_hex!(bytes_expected, bytes_actual);
}

fn test_decode_msg(bytes: &[u8], msg_expected: &UpdateMsg) {
    let msg_size = UpdateMsg::get_message_len(bytes)
        .expect("Buffer doesn't contain a full BGP message");
    let msg_actual = UpdateMsg::decode(&bytes[0..msg_size]).unwrap();
    assert_eq!(*msg_expected, msg_actual);
}
