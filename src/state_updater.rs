// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle notifications for user-facing bridging request state.
//!
//! Every call is best-effort: the claims pipeline logs failures and moves on,
//! it never blocks or aborts on a state-updater error.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::types::{ChainId, TxHash, TxKey};

#[async_trait]
pub trait BridgingRequestStateUpdater: Send + Sync {
    /// New bridging requests entered the unprocessed set.
    async fn new_multiple(&self, chain: ChainId, hashes: Vec<TxHash>) -> OracleResult<()>;

    /// A claim for the request was included in a submitted batch.
    async fn submitted_to_bridge(&self, key: TxKey, destination_chain: ChainId)
        -> OracleResult<()>;

    /// The destination batch containing the request executed on-chain.
    async fn executed_on_destination(
        &self,
        chain: ChainId,
        batch_id: u64,
        tx_hash: TxHash,
    ) -> OracleResult<()>;

    /// The destination batch containing the request failed to execute.
    async fn failed_to_execute_on_destination(
        &self,
        chain: ChainId,
        batch_id: u64,
    ) -> OracleResult<()>;

    /// The request was classified or validated as invalid.
    async fn invalid(&self, key: TxKey) -> OracleResult<()>;
}
