//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

mod config;
mod ecdsa;

use std::sync::Once;

use holo_bgpsec::path::BgpsecPath;
use holo_bgpsec::testing::HmacSuite;

static INIT: Once = Once::new();

const AS_PATH: [u32; 3] = [64512, 15169, 3356];

// Initializes tracing subscriber.
fn init_tracing() {
    tracing_subscriber::fmt::Subscriber::builder()
        .with_target(false)
        .with_ansi(false)
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}

fn setup() {
    INIT.call_once(init_tracing);
}

fn new_path(as_path: &[u32]) -> BgpsecPath<HmacSuite> {
    setup();
    BgpsecPath::new(
        as_path.to_vec(),
        &[("192.0.2.0", 24)],
        HmacSuite::default(),
    )
    .unwrap()
}
