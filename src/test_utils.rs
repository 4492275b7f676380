// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared mocks and fixtures for the in-module test suites.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::builder::TTL_INSURANCE_OFFSET;
use crate::chain_index::ChainIndex;
use crate::claims::{
    BatchExecutedClaim, BatchExecutionFailedClaim, BridgingRequestClaim, Claim, ClaimBatch,
    HotWalletIncrementClaim,
};
use crate::config::{AppConfig, ChainConfig, DEFAULT_MAX_CLAIMS_TO_GROUP};
use crate::dispatch::TxValidators;
use crate::error::{OracleError, OracleResult};
use crate::metadata::{decode_base_metadata, TxType};
use crate::state_updater::BridgingRequestStateUpdater;
use crate::storage::RecordStore;
use crate::types::{
    tx_priority, BlockRef, ChainId, ExpectedTx, ObservedTx, TxHash, TxKey, TxPayload,
    PRIORITY_NORMAL, PRIORITY_URGENT,
};
use crate::validators::{FailureValidator, SuccessValidator};

pub(crate) fn temp_store(chains: &[u8]) -> RecordStore {
    let db = sled::Config::new().temporary(true).open().unwrap();
    let chains: Vec<ChainId> = chains.iter().copied().map(ChainId).collect();
    RecordStore::with_db(db, &chains)
}

pub(crate) fn test_config(chains: &[u8]) -> AppConfig {
    AppConfig {
        chains: chains
            .iter()
            .map(|&c| {
                (
                    ChainId(c),
                    ChainConfig {
                        chain_id: ChainId(c),
                        hot_wallet_address: format!("addr_hot_wallet_{c}"),
                        max_claims_to_group: DEFAULT_MAX_CLAIMS_TO_GROUP,
                    },
                )
            })
            .collect(),
        retry_unprocessed: Default::default(),
    }
}

/// Deterministic block hash per slot, so observed transactions and mock chain
/// index entries agree on block identity.
pub(crate) fn block_hash_for_slot(slot: u64) -> TxHash {
    let mut hash = [0u8; 32];
    hash[..8].copy_from_slice(&slot.to_be_bytes());
    hash[8] = 0xb1;
    TxHash(hash)
}

pub(crate) fn observed_tx(
    chain: ChainId,
    hash: [u8; 32],
    block_slot: u64,
    metadata: &[u8],
) -> ObservedTx {
    let priority = if metadata.is_empty() {
        PRIORITY_URGENT
    } else {
        decode_base_metadata(metadata)
            .map(|m| tx_priority(m.tx_type))
            .unwrap_or(PRIORITY_NORMAL)
    };
    ObservedTx {
        chain,
        hash: TxHash(hash),
        block_slot,
        block_hash: block_hash_for_slot(block_slot),
        priority,
        metadata: metadata.to_vec(),
        payload: TxPayload::default(),
        batch_try_count: 0,
        submit_try_count: 0,
        refund_try_count: 0,
        last_time_tried: None,
    }
}

pub(crate) fn expected_tx(chain: ChainId, hash: [u8; 32], ttl: u64) -> ExpectedTx {
    ExpectedTx {
        chain,
        hash: TxHash(hash),
        metadata: br#"{"t":"batch"}"#.to_vec(),
        ttl,
        priority: PRIORITY_URGENT,
        is_processed: false,
        is_invalid: false,
    }
}

/// Success validator that emits one canned claim per transaction type,
/// embedding the block slot as the batch id so tests can assert ordering.
pub(crate) struct MockSuccessValidator {
    tx_type: TxType,
    fail_hashes: HashSet<TxHash>,
}

impl MockSuccessValidator {
    pub(crate) fn new(tx_type: TxType) -> Self {
        Self {
            tx_type,
            fail_hashes: HashSet::new(),
        }
    }

    pub(crate) fn with_failures(tx_type: TxType, fail_hashes: Vec<TxHash>) -> Self {
        Self {
            tx_type,
            fail_hashes: fail_hashes.into_iter().collect(),
        }
    }
}

impl SuccessValidator for MockSuccessValidator {
    fn tx_type(&self) -> TxType {
        self.tx_type
    }

    fn pre_validate(&self, _tx: &ObservedTx, _config: &AppConfig) -> OracleResult<()> {
        Ok(())
    }

    fn validate_and_add_claim(
        &self,
        claims: &mut ClaimBatch,
        tx: &ObservedTx,
        _config: &AppConfig,
    ) -> OracleResult<()> {
        if self.fail_hashes.contains(&tx.hash) {
            return Err(OracleError::Validation(format!(
                "forced failure for {}",
                tx.hash
            )));
        }
        let amount: u64 = tx.payload.outputs.iter().map(|o| o.amount).sum();
        let claim = match self.tx_type {
            TxType::BridgingRequest => Claim::BridgingRequest(BridgingRequestClaim {
                observed_tx_hash: tx.hash,
                source_chain: tx.chain,
                destination_chain: ChainId(tx.chain.0.wrapping_add(1)),
                receivers: vec![],
                total_amount_src: amount,
                total_amount_dst: amount,
                retry_counter: tx.batch_try_count,
            }),
            TxType::BatchExecution => Claim::BatchExecuted(BatchExecutedClaim {
                observed_tx_hash: tx.hash,
                chain: tx.chain,
                batch_id: tx.block_slot,
            }),
            TxType::HotWalletFunding => Claim::HotWalletIncrement(HotWalletIncrementClaim {
                observed_tx_hash: tx.hash,
                chain: tx.chain,
                amount,
            }),
        };
        claims.push(claim);
        Ok(())
    }
}

/// Failure validator that embeds the deadline slot as the batch id.
pub(crate) struct MockFailureValidator {
    tx_type: TxType,
}

impl MockFailureValidator {
    pub(crate) fn new(tx_type: TxType) -> Self {
        Self { tx_type }
    }
}

impl FailureValidator for MockFailureValidator {
    fn tx_type(&self) -> TxType {
        self.tx_type
    }

    fn pre_validate(&self, _tx: &ExpectedTx, _config: &AppConfig) -> OracleResult<()> {
        Ok(())
    }

    fn validate_and_add_claim(
        &self,
        claims: &mut ClaimBatch,
        tx: &ExpectedTx,
        _config: &AppConfig,
    ) -> OracleResult<()> {
        claims.push(Claim::BatchExecutionFailed(BatchExecutionFailedClaim {
            observed_tx_hash: tx.hash,
            chain: tx.chain,
            batch_id: tx.ttl + TTL_INSURANCE_OFFSET,
        }));
        Ok(())
    }
}

pub(crate) fn test_validators() -> TxValidators {
    TxValidators::new(
        vec![
            Arc::new(MockSuccessValidator::new(TxType::BridgingRequest)),
            Arc::new(MockSuccessValidator::new(TxType::BatchExecution)),
            Arc::new(MockSuccessValidator::new(TxType::HotWalletFunding)),
        ],
        vec![Arc::new(MockFailureValidator::new(TxType::BatchExecution))],
    )
}

/// Chain index backed by a fixed list of confirmed blocks.
pub(crate) struct MockChainIndex {
    blocks: Vec<BlockRef>,
}

impl MockChainIndex {
    pub(crate) fn with_slots(chain: ChainId, slots: &[u64]) -> Self {
        let mut blocks: Vec<BlockRef> = slots
            .iter()
            .map(|&slot| BlockRef {
                chain,
                slot,
                hash: block_hash_for_slot(slot),
            })
            .collect();
        blocks.sort_by_key(|b| b.slot);
        Self { blocks }
    }
}

#[async_trait]
impl ChainIndex for MockChainIndex {
    async fn get_confirmed_blocks_from(
        &self,
        from_slot: u64,
        limit: usize,
    ) -> OracleResult<Vec<BlockRef>> {
        Ok(self
            .blocks
            .iter()
            .filter(|b| b.slot >= from_slot)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Chain index whose lookups always fail.
pub(crate) struct FailingChainIndex;

#[async_trait]
impl ChainIndex for FailingChainIndex {
    async fn get_confirmed_blocks_from(
        &self,
        _from_slot: u64,
        _limit: usize,
    ) -> OracleResult<Vec<BlockRef>> {
        Err(OracleError::ChainIndex("index unavailable".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StateEvent {
    NewMultiple(ChainId, Vec<TxHash>),
    Submitted(TxKey, ChainId),
    Executed(ChainId, u64, TxHash),
    Failed(ChainId, u64),
    Invalid(TxKey),
}

/// State updater that records every notification it receives.
#[derive(Default)]
pub(crate) struct RecordingStateUpdater {
    events: Mutex<Vec<StateEvent>>,
}

impl RecordingStateUpdater {
    pub(crate) fn events(&self) -> Vec<StateEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: StateEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl BridgingRequestStateUpdater for RecordingStateUpdater {
    async fn new_multiple(&self, chain: ChainId, hashes: Vec<TxHash>) -> OracleResult<()> {
        self.record(StateEvent::NewMultiple(chain, hashes));
        Ok(())
    }

    async fn submitted_to_bridge(
        &self,
        key: TxKey,
        destination_chain: ChainId,
    ) -> OracleResult<()> {
        self.record(StateEvent::Submitted(key, destination_chain));
        Ok(())
    }

    async fn executed_on_destination(
        &self,
        chain: ChainId,
        batch_id: u64,
        tx_hash: TxHash,
    ) -> OracleResult<()> {
        self.record(StateEvent::Executed(chain, batch_id, tx_hash));
        Ok(())
    }

    async fn failed_to_execute_on_destination(
        &self,
        chain: ChainId,
        batch_id: u64,
    ) -> OracleResult<()> {
        self.record(StateEvent::Failed(chain, batch_id));
        Ok(())
    }

    async fn invalid(&self, key: TxKey) -> OracleResult<()> {
        self.record(StateEvent::Invalid(key));
        Ok(())
    }
}
