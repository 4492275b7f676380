// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Ingestion of confirmed source-chain transactions.
//!
//! The chain syncer hands over bridge-relevant transactions from confirmed
//! blocks; each is classified through the dispatch table, assigned its
//! processing priority and stored durably in one atomic write. A transaction
//! that fails classification is terminally invalid and never re-examined.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::dispatch::TxValidators;
use crate::error::OracleResult;
use crate::metadata::TxType;
use crate::metrics::OracleMetrics;
use crate::state_updater::BridgingRequestStateUpdater;
use crate::storage::RecordStore;
use crate::types::{
    tx_priority, BlockHash, ChainId, ObservedTx, ProcessedTx, TxHash, TxPayload, PRIORITY_NORMAL,
};

/// A bridge-relevant transaction from a confirmed block, before
/// classification.
#[derive(Debug, Clone)]
pub struct ConfirmedTx {
    pub hash: TxHash,
    pub block_slot: u64,
    pub block_hash: BlockHash,
    pub metadata: Vec<u8>,
    pub payload: TxPayload,
}

pub struct TxsReceiver {
    store: Arc<RecordStore>,
    validators: TxValidators,
    state_updater: Arc<dyn BridgingRequestStateUpdater>,
    config: AppConfig,
    metrics: OracleMetrics,
}

impl TxsReceiver {
    pub fn new(
        store: Arc<RecordStore>,
        validators: TxValidators,
        state_updater: Arc<dyn BridgingRequestStateUpdater>,
        config: AppConfig,
        metrics: OracleMetrics,
    ) -> Self {
        Self {
            store,
            validators,
            state_updater,
            config,
            metrics,
        }
    }

    /// Classifies and stores one block's worth of confirmed transactions.
    /// Empty input is a no-op; the write is atomic.
    pub async fn new_unprocessed_txs(
        &self,
        chain: ChainId,
        txs: Vec<ConfirmedTx>,
    ) -> OracleResult<()> {
        if txs.is_empty() {
            return Ok(());
        }
        let chain_label = chain.to_string();
        self.metrics
            .txs_received
            .with_label_values(&[&chain_label])
            .inc_by(txs.len() as u64);

        let mut unprocessed = Vec::new();
        let mut processed = Vec::new();
        let mut new_bridging_requests = Vec::new();

        for tx in txs {
            let mut observed = ObservedTx {
                chain,
                hash: tx.hash,
                block_slot: tx.block_slot,
                block_hash: tx.block_hash,
                priority: PRIORITY_NORMAL,
                metadata: tx.metadata,
                payload: tx.payload,
                batch_try_count: 0,
                submit_try_count: 0,
                refund_try_count: 0,
                last_time_tried: None,
            };
            match self.validators.resolve_success(&observed, &self.config) {
                Ok(validator) => {
                    let tx_type = validator.tx_type();
                    observed.priority = tx_priority(tx_type);
                    if tx_type == TxType::BridgingRequest {
                        new_bridging_requests.push(observed.hash);
                    }
                    debug!(%chain, hash = %observed.hash, %tx_type, "accepted observed tx");
                    unprocessed.push(observed);
                }
                Err(e) => {
                    warn!(%chain, hash = %observed.hash, error = %e, "rejected observed tx");
                    self.metrics
                        .invalid_metadata_txs
                        .with_label_values(&[&chain_label])
                        .inc();
                    processed.push(observed.to_processed(true));
                }
            }
        }

        // Best-effort user-state notification, never blocks ingestion.
        if !new_bridging_requests.is_empty() {
            if let Err(e) = self
                .state_updater
                .new_multiple(chain, new_bridging_requests)
                .await
            {
                warn!(%chain, error = %e, "failed to notify new bridging requests");
            }
        }

        self.store.add_txs(&processed, &unprocessed)
    }
}
