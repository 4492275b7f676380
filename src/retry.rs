// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry with fixed spacing and cooperative cancellation.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::{OracleError, OracleResult};

/// Runs `op` up to `attempts` times, sleeping `delay` between attempts.
///
/// Returns the first success, the last error once attempts are exhausted, or
/// [`OracleError::Cancelled`] as soon as the token fires.
pub async fn bounded_retry<T, F, Fut>(
    attempts: u32,
    delay: Duration,
    cancel: &CancellationToken,
    mut op: F,
) -> OracleResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = OracleResult<T>>,
{
    let mut last_err = OracleError::Generic("retry with zero attempts".to_string());
    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            return Err(OracleError::Cancelled);
        }
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(attempt, attempts, error = %e, "retried operation failed");
                last_err = e;
            }
        }
        if attempt < attempts {
            tokio::select! {
                _ = cancel.cancelled() => return Err(OracleError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
    Err(last_err)
}
