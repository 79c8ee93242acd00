#![no_main]

use bytes::Bytes;
use holo_bgpsec::packet::attribute::SecurePathAttr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let attr = SecurePathAttr::decode_data(Bytes::copy_from_slice(data));
    assert_eq!(attr.segments.len(), attr.sig_blocks.len());
    for (segment, blocks) in attr.hops() {
        assert!(blocks.len() <= segment.pcount as usize);
    }
});
