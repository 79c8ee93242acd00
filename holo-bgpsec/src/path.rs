//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use bytes::{BufMut, Bytes, BytesMut};
use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use tracing::{Span, debug_span};

use crate::config::PathConfig;
use crate::debug::Debug;
use crate::error::Error;
use crate::packet::attribute::{
    SecurePathAttr, SecurePathSegment, SignatureBlock,
};
use crate::packet::consts::ATTR_MAX_LEN;
use crate::packet::message::UpdateMsg;
use crate::packet::nlri;
use crate::suite::SignatureSuite;

// BGPsec path signing workflow.
//
// Holds the AS path (origin first), the advertised prefixes, and one keypair
// per AS. Each hop signs everything announced before it:
//
//   Data_To_Sign = Secure_Path (up to this hop) |
//                  Signature_Blocks (previous hops) |
//                  NLRI
//
// A path is exclusively owned by its caller; independent paths can be
// signed concurrently (see `tasks::sign_paths`).
pub struct BgpsecPath<S: SignatureSuite> {
    as_path: Vec<u32>,
    prefixes: Vec<Ipv4Network>,
    nlri: Bytes,
    suite: S,
    signing_keys: Vec<S::SigningKey>,
    public_keys: Vec<Bytes>,
    signatures: Vec<Bytes>,
    state: PathState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub enum PathState {
    Created,
    KeysGenerated,
    Signed,
}

// Outcome of a path verification.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PathVerification {
    // Whether every hop verified.
    pub valid: bool,
    // Per-hop results, in path order.
    pub hops: Vec<bool>,
}

// Size breakdown of a signed path.
#[derive(Clone, Debug, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct PathSize {
    pub num_hops: usize,
    pub segment_size: usize,
    pub total_signature_size: usize,
    pub avg_signature_size: f64,
    pub signature_block_overhead: usize,
    pub data_size: usize,
    pub header_size: usize,
    pub total_attr_size: usize,
    pub nlri_size: usize,
    pub total_path_size: usize,
    pub exceeds_bgp_limit: bool,
}

// ===== impl BgpsecPath =====

impl<S> BgpsecPath<S>
where
    S: SignatureSuite,
{
    pub fn new<P: AsRef<str>>(
        as_path: Vec<u32>,
        prefixes: &[(P, u8)],
        suite: S,
    ) -> Result<Self, Error> {
        let prefixes = nlri::parse_prefixes(prefixes)?;
        let mut buf = BytesMut::new();
        nlri::encode(&prefixes, &mut buf);

        Ok(BgpsecPath {
            as_path,
            prefixes,
            nlri: buf.freeze(),
            suite,
            signing_keys: Vec::new(),
            public_keys: Vec::new(),
            signatures: Vec::new(),
            state: PathState::Created,
        })
    }

    pub fn from_config(config: &PathConfig, suite: S) -> Result<Self, Error> {
        config.validate()?;
        Self::new(config.as_path.clone(), &config.prefixes(), suite)
    }

    // Generates one keypair per AS in the path.
    //
    // Signatures recorded by a previous run are discarded.
    pub fn generate_keypairs(&mut self) -> Result<(), Error> {
        let _span_guard = self.span().entered();

        let keypairs = self
            .as_path
            .iter()
            .map(|_| self.suite.generate_keypair())
            .collect::<Result<Vec<_>, _>>()?;
        (self.signing_keys, self.public_keys) = keypairs.into_iter().unzip();
        self.signatures.clear();
        self.state = PathState::KeysGenerated;

        Debug::KeypairsGenerated(self.public_keys.len(), self.suite.suite_id())
            .log();

        Ok(())
    }

    // Signs the path hop by hop, in path order, and returns the resulting
    // Secure_Path attribute.
    //
    // Keypairs are generated first if that hasn't happened yet.
    pub fn sign_path(&mut self) -> Result<SecurePathAttr, Error> {
        if self.state == PathState::Created {
            self.generate_keypairs()?;
        }
        let _span_guard = self.span().entered();

        let suite_id = self.suite.suite_id() as u8;
        let hops = self.as_path.len();
        let mut segments = Vec::with_capacity(hops);
        let mut sig_blocks = Vec::with_capacity(hops);
        let mut signatures = Vec::with_capacity(hops);
        let mut secure_path = BytesMut::with_capacity(
            hops * SecurePathSegment::LEN,
        );
        let mut sig_block_acc = BytesMut::new();

        for (hop, (&asn, signing_key)) in
            self.as_path.iter().zip(&self.signing_keys).enumerate()
        {
            let segment = SecurePathSegment::new(asn, 1, 0);
            segment.encode(&mut secure_path);

            // The accumulator doesn't hold this hop's own block yet.
            let data_to_sign =
                compute_data_to_sign(&secure_path, &sig_block_acc, &self.nlri);
            let signature = self.suite.sign(signing_key, &data_to_sign)?;
            Debug::HopSigned(hop, asn, signature.len()).log();

            let block = SignatureBlock::new(suite_id, signature.clone());
            block.encode(&mut sig_block_acc)?;

            segments.push(segment);
            sig_blocks.push(vec![block]);
            signatures.push(signature);
        }

        let attr = SecurePathAttr::new(segments, sig_blocks);
        self.signatures = signatures;
        self.state = PathState::Signed;
        Debug::PathSigned(attr.hop_count(), attr.length()).log();

        Ok(attr)
    }

    // Verifies every hop of the given Secure_Path attribute against this
    // path's public keys and NLRI.
    //
    // Verification never stops at the first bad hop. Since every signature
    // covers the blocks of all earlier hops, corrupting hop k also fails
    // every hop after k. A block too large for the wire can't be part of any
    // signed data, so it fails its hop and every later one.
    pub fn verify_path(
        &self,
        attr: &SecurePathAttr,
    ) -> Result<PathVerification, Error> {
        if self.state == PathState::Created {
            return Err(Error::KeysNotGenerated);
        }
        let _span_guard = self.span().entered();

        let mut secure_path = BytesMut::with_capacity(
            attr.hop_count() * SecurePathSegment::LEN,
        );
        let mut sig_block_acc = BytesMut::new();
        let mut chain_broken = false;
        let mut hops = Vec::with_capacity(attr.hop_count());

        for (hop, (segment, blocks)) in attr.hops().enumerate() {
            segment.encode(&mut secure_path);

            let mut hop_blocks = BytesMut::new();
            if blocks
                .iter()
                .any(|block| block.encode(&mut hop_blocks).is_err())
            {
                chain_broken = true;
            }

            let Some(block) = blocks.first() else {
                Debug::HopNoSignature(hop, segment.asn).log();
                hops.push(false);
                continue;
            };

            let valid = match self.public_keys.get(hop) {
                Some(public_key) if !chain_broken => {
                    let data_signed = compute_data_to_sign(
                        &secure_path,
                        &sig_block_acc,
                        &self.nlri,
                    );
                    match self.suite.verify(
                        public_key,
                        &data_signed,
                        &block.signature,
                    ) {
                        Ok(valid) => valid,
                        Err(error) => {
                            Debug::HopSuiteError(hop, segment.asn, &error)
                                .log();
                            false
                        }
                    }
                }
                _ => false,
            };
            Debug::HopVerified(hop, segment.asn, valid).log();
            hops.push(valid);

            sig_block_acc.extend_from_slice(&hop_blocks);
        }

        let valid = hops.iter().all(|valid| *valid);
        Debug::PathVerified(valid).log();

        Ok(PathVerification { valid, hops })
    }

    // Builds an UPDATE message carrying the given Secure_Path attribute and
    // this path's NLRI.
    pub fn update_msg(
        &self,
        attr: &SecurePathAttr,
    ) -> Result<UpdateMsg, Error> {
        let _span_guard = self.span().entered();

        let msg = UpdateMsg::new(
            Bytes::new(),
            vec![attr.to_bytes()?],
            self.nlri.clone(),
        );
        Debug::UpdateMsgBuilt(&msg).log();

        Ok(msg)
    }

    // Computes the size breakdown of the given attribute when carried with
    // this path's NLRI.
    pub fn path_size(&self, attr: &SecurePathAttr) -> PathSize {
        PathSize::new(attr, self.nlri.len())
    }

    pub fn as_path(&self) -> &[u32] {
        &self.as_path
    }

    pub fn prefixes(&self) -> &[Ipv4Network] {
        &self.prefixes
    }

    pub fn nlri(&self) -> &Bytes {
        &self.nlri
    }

    pub fn public_keys(&self) -> &[Bytes] {
        &self.public_keys
    }

    pub fn signatures(&self) -> &[Bytes] {
        &self.signatures
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    pub fn suite(&self) -> &S {
        &self.suite
    }

    fn span(&self) -> Span {
        let origin = self.as_path.first().copied().unwrap_or_default();
        debug_span!("bgpsec-path", %origin, hops = self.as_path.len())
    }
}

// ===== impl PathVerification =====

impl PathVerification {
    // Returns the first hop that failed verification.
    pub fn first_invalid_hop(&self) -> Option<usize> {
        self.hops.iter().position(|valid| !valid)
    }
}

// ===== impl PathSize =====

impl PathSize {
    pub fn new(attr: &SecurePathAttr, nlri_size: usize) -> PathSize {
        let num_hops = attr.hop_count();
        let segment_size = num_hops * SecurePathSegment::LEN;
        let blocks = attr.sig_blocks.iter().flatten();
        let num_blocks = blocks.clone().count();
        let total_signature_size =
            blocks.map(|block| block.signature.len()).sum::<usize>();
        let avg_signature_size = if num_blocks > 0 {
            total_signature_size as f64 / num_blocks as f64
        } else {
            0.0
        };
        let signature_block_overhead = num_blocks * SignatureBlock::HDR_LEN;
        let data_size =
            segment_size + total_signature_size + signature_block_overhead;
        let header_size = SecurePathAttr::header_length(data_size);
        let total_attr_size = header_size + data_size;

        PathSize {
            num_hops,
            segment_size,
            total_signature_size,
            avg_signature_size,
            signature_block_overhead,
            data_size,
            header_size,
            total_attr_size,
            nlri_size,
            total_path_size: total_attr_size + nlri_size,
            exceeds_bgp_limit: data_size > ATTR_MAX_LEN,
        }
    }
}

// ===== global functions =====

// Concatenates the three parts covered by a hop signature.
pub fn compute_data_to_sign(
    secure_path: &[u8],
    sig_blocks: &[u8],
    nlri: &[u8],
) -> Bytes {
    let len = secure_path.len() + sig_blocks.len() + nlri.len();
    let mut buf = BytesMut::with_capacity(len);
    buf.put_slice(secure_path);
    buf.put_slice(sig_blocks);
    buf.put_slice(nlri);
    buf.freeze()
}
