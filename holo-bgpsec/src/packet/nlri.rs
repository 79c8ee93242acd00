//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::net::Ipv4Addr;
use std::str::FromStr;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use ipnetwork::Ipv4Network;

use crate::error::Error;

const IPV4_ADDR_LEN: usize = 4;
const IPV4_MAX_PREFIXLEN: u8 = 32;

//
// Network Layer Reachability Information (IPv4).
//
// Encoding format (one entry per prefix):
//
// +---------------------------+
// |   Length (1 octet)        |
// +---------------------------+
// |   Prefix (variable)       |
// +---------------------------+
//
// The Length field is the prefix length in bits. The Prefix field holds the
// smallest number of octets that covers those bits.
//

// Encodes a list of IPv4 prefixes.
pub fn encode(prefixes: &[Ipv4Network], buf: &mut BytesMut) {
    for prefix in prefixes {
        encode_ipv4_prefix(buf, prefix);
    }
}

// Parses and encodes a list of (address, prefix length) pairs.
pub fn encode_prefixes<S: AsRef<str>>(
    prefixes: &[(S, u8)],
) -> Result<Bytes, Error> {
    let prefixes = parse_prefixes(prefixes)?;
    let mut buf = BytesMut::with_capacity(prefixes.len() * 5);
    encode(&prefixes, &mut buf);
    Ok(buf.freeze())
}

// Decodes a list of IPv4 prefixes.
//
// Decoding stops at the first entry that doesn't fit in the remaining bytes,
// returning whatever was parsed up to that point.
pub fn decode(buf: &mut Bytes) -> Vec<Ipv4Network> {
    let mut prefixes = Vec::new();
    while buf.remaining() > 0 {
        let Some(prefix) = decode_ipv4_prefix(buf) else {
            break;
        };
        prefixes.push(prefix);
    }
    prefixes
}

// Converts (address, prefix length) pairs into IPv4 networks.
pub fn parse_prefixes<S: AsRef<str>>(
    prefixes: &[(S, u8)],
) -> Result<Vec<Ipv4Network>, Error> {
    prefixes
        .iter()
        .map(|(addr, plen)| parse_prefix(addr.as_ref(), *plen))
        .collect()
}

pub fn parse_prefix(addr: &str, plen: u8) -> Result<Ipv4Network, Error> {
    let invalid = || Error::InvalidPrefix(format!("{addr}/{plen}"));
    let addr = Ipv4Addr::from_str(addr).map_err(|_| invalid())?;
    Ipv4Network::new(addr, plen).map_err(|_| invalid())
}

// ===== helper functions =====

fn encode_ipv4_prefix(buf: &mut BytesMut, prefix: &Ipv4Network) {
    // Encode prefix length.
    let plen = prefix.prefix();
    buf.put_u8(plen);

    // Encode prefix address (variable length).
    let prefix_bytes = prefix.ip().octets();
    let plen_wire = prefix_wire_len(plen);
    buf.put(&prefix_bytes[0..plen_wire]);
}

fn decode_ipv4_prefix(buf: &mut Bytes) -> Option<Ipv4Network> {
    // Parse prefix length.
    let plen = buf.try_get_u8().ok()?;
    if plen > IPV4_MAX_PREFIXLEN {
        return None;
    }
    let plen_wire = prefix_wire_len(plen);
    if plen_wire > buf.remaining() {
        return None;
    }

    // Parse prefix address (variable length), zero-padded to a full address.
    let mut prefix_bytes = [0; IPV4_ADDR_LEN];
    buf.copy_to_slice(&mut prefix_bytes[..plen_wire]);
    Ipv4Network::new(Ipv4Addr::from(prefix_bytes), plen).ok()
}

// Calculates the number of bytes required to encode a prefix.
fn prefix_wire_len(len: u8) -> usize {
    (len as usize).div_ceil(8)
}

// ===== unit tests =====
