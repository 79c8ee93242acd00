//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use tokio::task::JoinHandle;
use tracing::{Instrument, debug_span, error};

use crate::error::Error;
use crate::packet::attribute::SecurePathAttr;
use crate::path::BgpsecPath;
use crate::suite::SignatureSuite;

// Result of signing one path.
pub type SignResult<S> = (BgpsecPath<S>, Result<SecurePathAttr, Error>);

//
// Path signing tasks:
//
//                 +--------------+
//                 |    caller    |
//                 +--------------+
//                   |    ...   ^
//                   V          |
//  sign_path (Nx, blocking pool, one per independent path)
//
// Hops within a path are signed sequentially because every signature covers
// the output of the previous hops. Distinct paths share no state, so each of
// them is signed on its own blocking task.
//

// Signs a batch of independent paths concurrently.
//
// Results are returned in input order, each paired with the path that
// produced it. A task cancelled by runtime shutdown takes its path with it:
// the cancellation is logged and that path is missing from the output, which
// is then shorter than the input.
pub async fn sign_paths<S>(paths: Vec<BgpsecPath<S>>) -> Vec<SignResult<S>>
where
    S: SignatureSuite + Send + 'static,
    S::SigningKey: Send + 'static,
{
    let tasks: Vec<JoinHandle<SignResult<S>>> = paths
        .into_iter()
        .map(|mut path| {
            tokio::task::spawn_blocking(move || {
                let result = path.sign_path();
                if let Err(error) = &result {
                    error.log();
                }
                (path, result)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.instrument(debug_span!("sign-task")).await {
            Ok(result) => results.push(result),
            Err(error) if error.is_panic() => {
                std::panic::resume_unwind(error.into_panic())
            }
            Err(error) => {
                error!(%error, "path signing task cancelled, path dropped");
            }
        }
    }
    results
}
