#![no_main]

use holo_bgpsec::packet::message::UpdateMsg;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(msg) = UpdateMsg::decode(data) {
        let _ = msg.secure_path();
    }
});
