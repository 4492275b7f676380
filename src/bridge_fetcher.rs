// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reads from the bridge contract: the client trait, a bounded-retry fetch
//! wrapper, and the periodic expected-transactions fetcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::claims::ClaimBatch;
use crate::error::OracleResult;
use crate::metrics::OracleMetrics;
use crate::retry::bounded_retry;
use crate::storage::RecordStore;
use crate::types::{BlockRef, ChainId, ExpectedTx};

/// Attempts per bridge contract read before the error is surfaced.
pub const MAX_RETRIES: u32 = 5;

/// Spacing between retry attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client onto the bridge smart contract.
#[async_trait]
pub trait BridgeContractClient: Send + Sync {
    /// Transactions the contract expects to be observed on `chain` (e.g.
    /// batches already submitted for signing).
    async fn get_expected_txs(&self, chain: ChainId) -> OracleResult<Vec<ExpectedTx>>;

    /// The last block the contract has consensus observations for on `chain`.
    async fn get_last_observed_block(&self, chain: ChainId) -> OracleResult<Option<BlockRef>>;

    /// Submits a claim batch. Invoked by the external submission scheduler,
    /// never from inside a tick.
    async fn submit_claims(&self, claims: &ClaimBatch) -> OracleResult<()>;
}

/// Bounded-retry wrapper over [`BridgeContractClient`] reads.
#[derive(Clone)]
pub struct BridgeDataFetcher {
    client: Arc<dyn BridgeContractClient>,
    cancel: CancellationToken,
}

impl BridgeDataFetcher {
    pub fn new(client: Arc<dyn BridgeContractClient>, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    pub async fn fetch_expected_txs(&self, chain: ChainId) -> OracleResult<Vec<ExpectedTx>> {
        bounded_retry(MAX_RETRIES, RETRY_DELAY, &self.cancel, || {
            self.client.get_expected_txs(chain)
        })
        .await
    }

    pub async fn fetch_latest_block_point(&self, chain: ChainId) -> OracleResult<Option<BlockRef>> {
        bounded_retry(MAX_RETRIES, RETRY_DELAY, &self.cancel, || {
            self.client.get_last_observed_block(chain)
        })
        .await
    }
}

/// Periodic task keeping the expected-transactions set in the record store
/// current with the bridge contract.
pub struct ExpectedTxsFetcher {
    fetcher: BridgeDataFetcher,
    store: Arc<RecordStore>,
    chains: Vec<ChainId>,
    interval: Duration,
    cancel: CancellationToken,
    metrics: OracleMetrics,
}

impl ExpectedTxsFetcher {
    pub fn new(
        fetcher: BridgeDataFetcher,
        store: Arc<RecordStore>,
        chains: Vec<ChainId>,
        interval: Duration,
        cancel: CancellationToken,
        metrics: OracleMetrics,
    ) -> Self {
        Self {
            fetcher,
            store,
            chains,
            interval,
            cancel,
            metrics,
        }
    }

    pub async fn run(self) {
        info!(chains = self.chains.len(), "expected txs fetcher started");
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("expected txs fetcher stopped");
                    return;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
            self.fetch_data().await;
        }
    }

    /// One fetch round. A chain that still has a live expected transaction is
    /// skipped: the contract does not produce a new batch for a chain until
    /// the previous one resolved into a claim.
    pub async fn fetch_data(&self) {
        for &chain in &self.chains {
            let has_live = match self.store.get_all_expected_txs(chain) {
                Ok(all) => all.iter().any(|tx| !tx.is_processed && !tx.is_invalid),
                Err(e) => {
                    warn!(%chain, error = %e, "failed to read expected txs, skipping chain");
                    continue;
                }
            };
            if has_live {
                debug!(%chain, "live expected tx present, skipping fetch");
                continue;
            }

            let txs = match self.fetcher.fetch_expected_txs(chain).await {
                Ok(txs) => txs,
                Err(e) => {
                    warn!(%chain, error = %e, "failed to fetch expected txs");
                    continue;
                }
            };
            if txs.is_empty() {
                continue;
            }
            match self.store.add_expected_txs(&txs) {
                Ok(()) => {
                    self.metrics
                        .expected_txs_fetched
                        .with_label_values(&[&chain.to_string()])
                        .inc_by(txs.len() as u64);
                    debug!(%chain, count = txs.len(), "stored expected txs");
                }
                Err(e) => warn!(%chain, error = %e, "failed to store expected txs"),
            }
        }
    }
}
