//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

#![cfg_attr(
    feature = "testing",
    allow(dead_code, unused_variables, unused_imports)
)]

pub mod config;
pub mod debug;
pub mod error;
pub mod packet;
pub mod path;
pub mod suite;
pub mod tasks;
#[cfg(feature = "testing")]
pub mod testing;
