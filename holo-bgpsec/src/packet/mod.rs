//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod attribute;
pub mod consts;
pub mod error;
pub mod message;
pub mod nlri;

use std::cell::RefCell;

use bytes::BytesMut;

thread_local!(
    pub static TLS_BUF: RefCell<BytesMut> =
        RefCell::new(BytesMut::with_capacity(4096))
);
