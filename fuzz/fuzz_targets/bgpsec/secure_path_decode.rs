#![no_main]

use holo_bgpsec::packet::attribute::SecurePathAttr;
use holo_bgpsec::testing::BytesArbitrary;
use libfuzzer_sys::arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    if let Ok(BytesArbitrary(mut buf)) = BytesArbitrary::arbitrary(&mut u) {
        let _ = SecurePathAttr::decode(&mut buf);
    }
});
