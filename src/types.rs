// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core record model for the claims pipeline: observed, processed and
//! expected transactions, together with the identifiers that key them.
//!
//! An *observed* transaction was seen directly in a confirmed source-chain
//! block and moves through the Unprocessed -> Pending -> Processed lifecycle.
//! An *expected* transaction is known from bridge-contract state and must be
//! seen resolved on-chain before its TTL deadline.

use crate::metadata::TxType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Highest priority tier that the claims builder iterates over.
/// Tiers are 0 (urgent) and 1 (normal).
pub const LAST_PROCESSING_PRIORITY: u8 = 1;

/// Priority tier for batch-execution and hot-wallet-funding transactions.
pub const PRIORITY_URGENT: u8 = 0;

/// Priority tier for everything else.
pub const PRIORITY_NORMAL: u8 = 1;

/// Returns the processing priority for a resolved transaction type.
pub fn tx_priority(tx_type: TxType) -> u8 {
    match tx_type {
        TxType::BatchExecution | TxType::HotWalletFunding => PRIORITY_URGENT,
        TxType::BridgingRequest => PRIORITY_NORMAL,
    }
}

/// Source chain identifier, one byte so it can participate in byte-ordered
/// storage keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ChainId(pub u8);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 32-byte transaction hash
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TxHash(pub [u8; 32]);

/// Block hashes share the transaction hash representation, as both identify
/// 32-byte chain digests.
pub type BlockHash = TxHash;

impl TxHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps log lines readable
        write!(f, "{}..", hex::encode(&self.0[..4]))
    }
}

/// Composite identity of a transaction across the oracle: (chain, hash).
///
/// Used as the in-memory cross-reference key between observed and expected
/// records; the storage layer derives its byte keys separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxKey {
    pub chain: ChainId,
    pub hash: TxHash,
}

impl TxKey {
    pub fn new(chain: ChainId, hash: TxHash) -> Self {
        Self { chain, hash }
    }
}

impl fmt::Display for TxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.hash)
    }
}

/// A specific confirmed chain position: all observed transactions and newly
/// expired expected transactions belonging to the same on-chain moment share
/// one block reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRef {
    pub chain: ChainId,
    pub slot: u64,
    pub hash: BlockHash,
}

impl BlockRef {
    /// Whether an unprocessed observed transaction belongs to this block.
    pub fn matches_observed(&self, tx: &ObservedTx) -> bool {
        self.chain == tx.chain && self.slot == tx.block_slot && self.hash == tx.block_hash
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain {} slot {} hash {}", self.chain, self.slot, self.hash)
    }
}

/// Chain-specific transaction payload, opaque to the claims pipeline and
/// consumed only by the per-type validators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPayload {
    pub inputs: Vec<UtxoRef>,
    pub outputs: Vec<TxOutput>,
    /// Slot after which the transaction can no longer be included
    pub ttl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoRef {
    pub tx_hash: TxHash,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub address: String,
    pub amount: u64,
    #[serde(default)]
    pub tokens: Vec<TokenAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub name: String,
    pub amount: u64,
}

/// A confirmed source-chain transaction awaiting classification/validation.
///
/// Invariant: at most one live record per (chain, hash) per lifecycle stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedTx {
    pub chain: ChainId,
    pub hash: TxHash,
    pub block_slot: u64,
    pub block_hash: BlockHash,
    pub priority: u8,
    /// Raw on-chain metadata bytes; empty for bare-value transfers
    #[serde(default)]
    pub metadata: Vec<u8>,
    #[serde(default)]
    pub payload: TxPayload,
    /// Number of times a batch containing this transaction failed downstream
    #[serde(default)]
    pub batch_try_count: u32,
    /// Number of times a claim for this transaction was rejected at submission
    #[serde(default)]
    pub submit_try_count: u32,
    #[serde(default)]
    pub refund_try_count: u32,
    /// When the transaction last entered a claim batch; `None` means never
    #[serde(default)]
    pub last_time_tried: Option<SystemTime>,
}

impl ObservedTx {
    pub fn key(&self) -> TxKey {
        TxKey::new(self.chain, self.hash)
    }

    pub fn to_processed(&self, is_invalid: bool) -> ProcessedTx {
        ProcessedTx {
            chain: self.chain,
            hash: self.hash,
            block_slot: self.block_slot,
            block_hash: self.block_hash,
            priority: self.priority,
            is_invalid,
        }
    }

    /// Whether the transaction is eligible for this tick, or still inside the
    /// retry cooldown after a failed submission.
    pub fn is_ready(&self, cooldown: Duration, now: SystemTime) -> bool {
        match self.last_time_tried {
            None => true,
            Some(tried) => tried + cooldown <= now,
        }
    }

    pub fn increment_batch_try_count(&mut self) {
        self.batch_try_count += 1;
    }

    pub fn increment_submit_try_count(&mut self) {
        self.submit_try_count += 1;
    }

    pub fn increment_refund_try_count(&mut self) {
        self.refund_try_count += 1;
    }

    pub fn set_last_time_tried(&mut self, tried: Option<SystemTime>) {
        self.last_time_tried = tried;
    }
}

/// Terminal record for an observed transaction. Written exactly once per
/// (chain, hash); its presence is the authoritative "already resolved" check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedTx {
    pub chain: ChainId,
    pub hash: TxHash,
    pub block_slot: u64,
    pub block_hash: BlockHash,
    pub priority: u8,
    pub is_invalid: bool,
}

impl ProcessedTx {
    pub fn key(&self) -> TxKey {
        TxKey::new(self.chain, self.hash)
    }
}

/// A transaction the oracle knows will be confirmed on-chain (e.g. a batch
/// already submitted downstream) and must observe resolution for before
/// `ttl` passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTx {
    pub chain: ChainId,
    pub hash: TxHash,
    #[serde(default)]
    pub metadata: Vec<u8>,
    /// Deadline slot; expiry is checked at `ttl` plus the insurance offset
    pub ttl: u64,
    pub priority: u8,
    #[serde(default)]
    pub is_processed: bool,
    #[serde(default)]
    pub is_invalid: bool,
}

impl ExpectedTx {
    pub fn key(&self) -> TxKey {
        TxKey::new(self.chain, self.hash)
    }
}
