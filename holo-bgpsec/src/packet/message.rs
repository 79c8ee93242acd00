//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{Buf, BufMut, Bytes};
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::packet::TLS_BUF;
use crate::packet::attribute::SecurePathAttr;
use crate::packet::consts::{AttrFlags, MessageType, SECURE_PATH_ATTR_TYPE};
use crate::packet::error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult,
};

//
// BGP UPDATE message.
//
// Encoding format (message header):
//
// 0                   1                   2                   3
// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                                                               |
// +                                                               +
// |                                                               |
// +                                                               +
// |                           Marker                              |
// +                                                               +
// |                                                               |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          Length               |      Type     |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// Encoding format (message body):
//
// +-----------------------------------------------------+
// |   Withdrawn Routes Length (2 octets)                |
// +-----------------------------------------------------+
// |   Withdrawn Routes (variable)                       |
// +-----------------------------------------------------+
// |   Total Path Attribute Length (2 octets)            |
// +-----------------------------------------------------+
// |   Path Attributes (variable)                        |
// +-----------------------------------------------------+
// |   Network Layer Reachability Information (variable) |
// +-----------------------------------------------------+
//
// Path attributes are carried as pre-encoded blobs, header included.
//
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct UpdateMsg {
    pub withdrawn_routes: Bytes,
    pub attrs: Vec<Bytes>,
    pub nlri: Bytes,
}

// ===== impl UpdateMsg =====

impl UpdateMsg {
    pub const HDR_LEN: usize = 19;
    pub const MIN_LEN: usize = 23;
    pub const MAX_LEN: usize = u16::MAX as usize;
    const MSG_LEN_POS: std::ops::Range<usize> = 16..18;

    // Encodes the UPDATE message, header included.
    pub fn encode(&self) -> EncodeResult<Bytes> {
        let msg_len = self.length();
        if msg_len > Self::MAX_LEN {
            return Err(EncodeError::MessageTooLarge(msg_len));
        }

        TLS_BUF.with(|buf| {
            let mut buf = buf.borrow_mut();
            buf.clear();

            // Marker field.
            buf.put_u128(u128::MAX);
            // The length field will be initialized later.
            buf.put_u16(0);
            buf.put_u8(MessageType::Update as u8);

            // Withdrawn Routes.
            buf.put_u16(self.withdrawn_routes.len() as u16);
            buf.put_slice(&self.withdrawn_routes);

            // Path Attributes.
            let start_pos = buf.len();
            buf.put_u16(0);
            for attr in &self.attrs {
                buf.put_slice(attr);
            }

            // Rewrite the "Total Path Attribute Length" field.
            let len = (buf.len() - start_pos - 2) as u16;
            buf[start_pos..start_pos + 2].copy_from_slice(&len.to_be_bytes());

            // Network Layer Reachability Information.
            buf.put_slice(&self.nlri);

            // Rewrite message length.
            let msg_len = buf.len() as u16;
            buf[Self::MSG_LEN_POS].copy_from_slice(&msg_len.to_be_bytes());

            Ok(buf.clone().freeze())
        })
    }

    // Decodes an UPDATE message.
    //
    // Bytes past the declared message length are ignored.
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        if data.len() < Self::HDR_LEN {
            return Err(DecodeError::TruncatedMessage {
                expected: Self::HDR_LEN,
                received: data.len(),
            });
        }
        let mut buf = Bytes::copy_from_slice(data);

        // Parse and validate marker.
        let marker = buf.get_u128();
        if marker != u128::MAX {
            return Err(DecodeError::InvalidMarker);
        }

        // Parse message length and type.
        let msg_len = buf.get_u16() as usize;
        let msg_type = buf.get_u8();
        if msg_type != MessageType::Update as u8 {
            return Err(DecodeError::WrongMessageType(msg_type));
        }
        if msg_len < Self::HDR_LEN || data.len() < msg_len {
            return Err(DecodeError::TruncatedMessage {
                expected: msg_len,
                received: data.len(),
            });
        }
        buf.truncate(msg_len - Self::HDR_LEN);

        // Withdrawn Routes.
        let wdraw_len = buf.try_get_u16()? as usize;
        if wdraw_len > buf.remaining() {
            return Err(DecodeError::TruncatedInput);
        }
        let withdrawn_routes = buf.copy_to_bytes(wdraw_len);

        // Path Attributes.
        let attr_len = buf.try_get_u16()? as usize;
        if attr_len > buf.remaining() {
            return Err(DecodeError::TruncatedInput);
        }
        let attrs = decode_attrs(buf.copy_to_bytes(attr_len))?;

        // Network Layer Reachability Information.
        let nlri = buf;

        Ok(UpdateMsg {
            withdrawn_routes,
            attrs,
            nlri,
        })
    }

    // Parses the given buffer to determine if it contains a complete BGP
    // message, and returns the length of the message if successful.
    pub fn get_message_len(data: &[u8]) -> Option<usize> {
        // Validate that the buffer contains sufficient space for at least the
        // message header.
        let buf_size = data.len();
        if buf_size < Self::HDR_LEN {
            return None;
        }

        // Ensure the buffer is big enough to hold the entire message.
        let msg_len = u16::from_be_bytes([data[16], data[17]]) as usize;
        if msg_len < Self::HDR_LEN || msg_len > buf_size {
            return None;
        }

        Some(msg_len)
    }

    // Total length of the encoded message, header included.
    pub fn length(&self) -> usize {
        Self::MIN_LEN
            + self.withdrawn_routes.len()
            + self.attrs.iter().map(Bytes::len).sum::<usize>()
            + self.nlri.len()
    }

    // Returns the first path attribute of the given type.
    pub fn find_attr(&self, attr_type: u8) -> Option<&Bytes> {
        self.attrs
            .iter()
            .find(|attr| attr.len() >= 2 && attr[1] == attr_type)
    }

    // Decodes the Secure_Path attribute, if present.
    pub fn secure_path(&self) -> DecodeResult<Option<SecurePathAttr>> {
        self.find_attr(SECURE_PATH_ATTR_TYPE)
            .map(|attr| SecurePathAttr::decode(&mut attr.clone()))
            .transpose()
    }
}

// ===== helper functions =====

// Splits the path attributes section into individual attributes.
//
// The flags of each attribute determine whether its length field takes one or
// two octets.
fn decode_attrs(mut buf: Bytes) -> DecodeResult<Vec<Bytes>> {
    let mut attrs = Vec::new();

    while buf.has_remaining() {
        if buf.remaining() < 2 {
            return Err(DecodeError::TruncatedInput);
        }

        let attr_flags = AttrFlags::from_bits_truncate(buf[0]);
        let (hdr_len, attr_len) = if attr_flags.contains(AttrFlags::EXTENDED) {
            if buf.remaining() < 4 {
                return Err(DecodeError::TruncatedInput);
            }
            (4, u16::from_be_bytes([buf[2], buf[3]]) as usize)
        } else {
            if buf.remaining() < 3 {
                return Err(DecodeError::TruncatedInput);
            }
            (3, buf[2] as usize)
        };
        if hdr_len + attr_len > buf.remaining() {
            return Err(DecodeError::TruncatedInput);
        }

        attrs.push(buf.copy_to_bytes(hdr_len + attr_len));
    }

    Ok(attrs)
}
