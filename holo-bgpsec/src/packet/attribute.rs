//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use arbitrary::Arbitrary;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use derive_new::new;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::debug::Debug;
use crate::packet::consts::{
    ATTR_MAX_LEN, ATTR_SHORT_MAX_LEN, AttrFlags, SECURE_PATH_ATTR_TYPE,
    SIGNATURE_MAX_LEN, SuiteId,
};
use crate::packet::error::{
    DecodeError, DecodeResult, EncodeError, EncodeResult,
};

//
// Secure_Path attribute.
//
// Encoding format:
//
// +-------------------------------------------+
// | Attr. Flags (1 octet)                     |
// +-------------------------------------------+
// | Attr. Type Code (1 octet)                 |
// +-------------------------------------------+
// | Attr. Length (1 or 2 octets)              |
// +-------------------------------------------+
// | Secure_Path Segments (6 octets each)      |
// ~                                           ~
// +-------------------------------------------+
// | Signature_Blocks (variable)               |
// ~                                           ~
// +-------------------------------------------+
//
// All segments come first, in path order (origin first). They are followed
// by the signature blocks of every segment, grouped by segment and kept in
// suite order within a segment. The number of segments isn't carried
// explicitly and has to be inferred while decoding.
//
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct SecurePathAttr {
    pub segments: Vec<SecurePathSegment>,
    pub sig_blocks: Vec<Vec<SignatureBlock>>,
}

//
// Secure_Path Segment.
//
// Encoding format:
//
// +------------------------------------------------------+
// | AS Number (4 octets)                                 |
// +------------------------------------------------------+
// | pCount (1 octet)                                     |
// +------------------------------------------------------+
// | Flags (1 octet)                                      |
// +------------------------------------------------------+
//
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
#[derive(Arbitrary)]
pub struct SecurePathSegment {
    pub asn: u32,
    pub pcount: u8,
    pub flags: u8,
}

//
// Signature_Block.
//
// Encoding format:
//
// +------------------------------------------------------+
// | Algorithm Suite Identifier (1 octet)                 |
// +------------------------------------------------------+
// | Signature Length (2 octets)                          |
// +------------------------------------------------------+
// | Signature (variable)                                 |
// +------------------------------------------------------+
//
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(new)]
#[derive(Deserialize, Serialize)]
pub struct SignatureBlock {
    pub suite_id: u8,
    pub signature: Bytes,
}

// ===== impl SecurePathAttr =====

impl SecurePathAttr {
    pub const HDR_LEN: usize = 3;
    pub const HDR_LEN_EXT: usize = 4;

    // Encodes the attribute, header included.
    //
    // The attribute is validated before anything is written, so `buf` is left
    // untouched on error.
    pub fn encode(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        let data_len = self.validate()?;

        let mut attr_flags = AttrFlags::OPTIONAL | AttrFlags::TRANSITIVE;
        if data_len > ATTR_SHORT_MAX_LEN {
            attr_flags.insert(AttrFlags::EXTENDED);
        }
        buf.reserve(Self::header_length(data_len) + data_len);
        buf.put_u8(attr_flags.bits());
        buf.put_u8(SECURE_PATH_ATTR_TYPE);
        if attr_flags.contains(AttrFlags::EXTENDED) {
            buf.put_u16(data_len as u16);
        } else {
            buf.put_u8(data_len as u8);
        }

        for segment in &self.segments {
            segment.encode(buf);
        }
        for block in self.sig_blocks.iter().flatten() {
            block.encode_unchecked(buf);
        }

        Ok(())
    }

    // Encodes the attribute into a new buffer.
    pub fn to_bytes(&self) -> EncodeResult<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    // Decodes a complete attribute, header included.
    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        if buf.remaining() < 2 {
            return Err(DecodeError::TruncatedInput);
        }

        // Parse attribute flags and type.
        let attr_flags = AttrFlags::from_bits_truncate(buf.get_u8());
        let attr_type = buf.get_u8();
        if attr_type != SECURE_PATH_ATTR_TYPE {
            return Err(DecodeError::UnexpectedAttrType(attr_type));
        }

        // Parse attribute length.
        let attr_len = if attr_flags.contains(AttrFlags::EXTENDED) {
            buf.try_get_u16()? as usize
        } else {
            buf.try_get_u8()? as usize
        };
        if attr_len > buf.remaining() {
            return Err(DecodeError::TruncatedInput);
        }

        let data = buf.copy_to_bytes(attr_len);
        Ok(Self::decode_data(data))
    }

    // Decodes the attribute data (segments and signature blocks).
    //
    // Malformed or truncated data never fails: whatever could be parsed is
    // returned, and trailing bytes that don't form a complete field are
    // discarded.
    pub fn decode_data(data: Bytes) -> Self {
        // First pass: find out how many segments precede the signature
        // blocks.
        let segment_count = Self::scan_segments(&data);

        let mut buf = data;
        let mut segments = Vec::with_capacity(segment_count);
        for _ in 0..segment_count {
            let Ok(segment) = SecurePathSegment::decode(&mut buf) else {
                break;
            };
            segments.push(segment);
        }

        // Second pass: consume exactly pCount signature blocks per segment.
        let sig_blocks = segments
            .iter()
            .map(|segment| {
                let mut blocks = Vec::with_capacity(segment.pcount as usize);
                for _ in 0..segment.pcount {
                    match SignatureBlock::decode(&mut buf) {
                        Ok(block) => blocks.push(block),
                        Err(_) => break,
                    }
                }
                blocks
            })
            .collect();

        SecurePathAttr {
            segments,
            sig_blocks,
        }
    }

    // Checks the attribute against the protocol limits and returns the length
    // of its data.
    pub fn validate(&self) -> EncodeResult<usize> {
        if self.segments.len() != self.sig_blocks.len() {
            return Err(EncodeError::BlockCountMismatch {
                segments: self.segments.len(),
                blocks: self.sig_blocks.len(),
            });
        }
        for (hop, (segment, blocks)) in self.hops().enumerate() {
            if blocks.len() != segment.pcount as usize {
                return Err(EncodeError::PcountMismatch {
                    hop,
                    pcount: segment.pcount,
                    blocks: blocks.len(),
                });
            }
            if let Some(block) = blocks
                .iter()
                .find(|block| block.signature.len() > SIGNATURE_MAX_LEN)
            {
                return Err(EncodeError::SignatureTooLarge(
                    block.signature.len(),
                ));
            }
        }

        let length = self.data_length();
        if length > ATTR_MAX_LEN {
            let hops = self.hop_count();
            Debug::AttrTooLarge(length, hops).log();
            return Err(EncodeError::AttributeTooLarge { length, hops });
        }

        Ok(length)
    }

    // Length of the attribute data, header excluded.
    pub fn data_length(&self) -> usize {
        self.segments.len() * SecurePathSegment::LEN
            + self
                .sig_blocks
                .iter()
                .flatten()
                .map(|block| block.length())
                .sum::<usize>()
    }

    // Length of the encoded attribute, header included.
    pub fn length(&self) -> usize {
        let data_len = self.data_length();
        Self::header_length(data_len) + data_len
    }

    pub fn header_length(data_len: usize) -> usize {
        if data_len > ATTR_SHORT_MAX_LEN {
            Self::HDR_LEN_EXT
        } else {
            Self::HDR_LEN
        }
    }

    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }

    // Iterates over the path hops, pairing each segment with its signature
    // blocks.
    pub fn hops(
        &self,
    ) -> impl Iterator<Item = (&SecurePathSegment, &[SignatureBlock])> + '_
    {
        self.segments
            .iter()
            .zip(self.sig_blocks.iter().map(Vec::as_slice))
    }

    // Returns the number of leading segments in `data`.
    //
    // A segment count fits when the signature blocks declared by those
    // segments exhaust the rest of the data exactly. The largest count that
    // fits wins, since the bytes of a later segment can pass for a signature
    // block header. When nothing fits (truncated or over-long data), the count
    // whose declared blocks decode furthest is used, the larger count winning
    // ties.
    fn scan_segments(data: &Bytes) -> usize {
        let mut buf = data.clone();
        let mut segment_count = 0;
        let mut pcount_total = 0;
        let mut exact = None;
        let mut best = (0, 0);

        if !buf.has_remaining() {
            return 0;
        }

        while buf.remaining() >= SecurePathSegment::LEN {
            let Ok(segment) = SecurePathSegment::decode(&mut buf) else {
                break;
            };
            segment_count += 1;
            pcount_total += segment.pcount as usize;

            let (decoded, exhausted) =
                probe_sig_blocks(buf.clone(), pcount_total);
            if decoded == pcount_total && exhausted {
                exact = Some(segment_count);
            }
            if decoded >= best.0 {
                best = (decoded, segment_count);
            }
        }

        exact.unwrap_or(best.1)
    }
}

// ===== impl SecurePathSegment =====

impl SecurePathSegment {
    pub const LEN: usize = 6;

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u32(self.asn);
        buf.put_u8(self.pcount);
        buf.put_u8(self.flags);
    }

    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        if buf.remaining() < Self::LEN {
            return Err(DecodeError::TruncatedInput);
        }

        let asn = buf.try_get_u32()?;
        let pcount = buf.try_get_u8()?;
        let flags = buf.try_get_u8()?;
        Ok(SecurePathSegment { asn, pcount, flags })
    }
}

// ===== impl SignatureBlock =====

impl SignatureBlock {
    pub const HDR_LEN: usize = 3;

    pub fn encode(&self, buf: &mut BytesMut) -> EncodeResult<()> {
        if self.signature.len() > SIGNATURE_MAX_LEN {
            return Err(EncodeError::SignatureTooLarge(self.signature.len()));
        }

        self.encode_unchecked(buf);
        Ok(())
    }

    // Decodes a signature block.
    //
    // Nothing is consumed from `buf` when the block is incomplete.
    pub fn decode(buf: &mut Bytes) -> DecodeResult<Self> {
        if buf.remaining() < Self::HDR_LEN {
            return Err(DecodeError::TruncatedInput);
        }

        let sig_len = u16::from_be_bytes([buf[1], buf[2]]) as usize;
        if buf.remaining() < Self::HDR_LEN + sig_len {
            return Err(DecodeError::TruncatedInput);
        }

        let suite_id = buf.get_u8();
        let _sig_len = buf.get_u16();
        let signature = buf.copy_to_bytes(sig_len);
        Ok(SignatureBlock {
            suite_id,
            signature,
        })
    }

    // Returns the algorithm suite, if known.
    pub fn suite(&self) -> Option<SuiteId> {
        SuiteId::from_u8(self.suite_id)
    }

    pub fn length(&self) -> usize {
        Self::HDR_LEN + self.signature.len()
    }

    fn encode_unchecked(&self, buf: &mut BytesMut) {
        buf.put_u8(self.suite_id);
        buf.put_u16(self.signature.len() as u16);
        buf.put_slice(&self.signature);
    }
}

// ===== helper functions =====

// Decodes up to `count` signature blocks, returning how many were decoded and
// whether the buffer was exhausted afterwards.
fn probe_sig_blocks(mut buf: Bytes, count: usize) -> (usize, bool) {
    let mut decoded = 0;
    while decoded < count {
        if SignatureBlock::decode(&mut buf).is_err() {
            break;
        }
        decoded += 1;
    }
    (decoded, !buf.has_remaining())
}

// ===== unit tests =====
