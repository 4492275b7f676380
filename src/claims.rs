// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Claim types destined for the destination bridge contract, and the
//! bounded, insertion-ordered batch they are accumulated into.
//!
//! The batch preserves append order: within one tick the claims builder
//! appends in ascending chain position, so the order of `claims` is itself
//! the ordering guarantee consumed downstream.

use crate::types::{ChainId, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceiver {
    pub destination_address: String,
    pub amount: u64,
}

/// A user bridging request observed on the source chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgingRequestClaim {
    pub observed_tx_hash: TxHash,
    pub source_chain: ChainId,
    pub destination_chain: ChainId,
    pub receivers: Vec<ClaimReceiver>,
    pub total_amount_src: u64,
    pub total_amount_dst: u64,
    pub retry_counter: u32,
}

/// A previously submitted batch observed executed on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchExecutedClaim {
    pub observed_tx_hash: TxHash,
    pub chain: ChainId,
    pub batch_id: u64,
}

/// A previously submitted batch that passed its deadline without being
/// observed on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchExecutionFailedClaim {
    pub observed_tx_hash: TxHash,
    pub chain: ChainId,
    pub batch_id: u64,
}

/// A bare-value transfer topping up the hot wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotWalletIncrementClaim {
    pub observed_tx_hash: TxHash,
    pub chain: ChainId,
    pub amount: u64,
}

/// A single typed assertion for the destination bridge contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Claim {
    BridgingRequest(BridgingRequestClaim),
    BatchExecuted(BatchExecutedClaim),
    BatchExecutionFailed(BatchExecutionFailedClaim),
    HotWalletIncrement(HotWalletIncrementClaim),
}

impl Claim {
    /// Claim kind label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Claim::BridgingRequest(_) => "bridging_request",
            Claim::BatchExecuted(_) => "batch_executed",
            Claim::BatchExecutionFailed(_) => "batch_execution_failed",
            Claim::HotWalletIncrement(_) => "hot_wallet_increment",
        }
    }

    pub fn observed_tx_hash(&self) -> TxHash {
        match self {
            Claim::BridgingRequest(c) => c.observed_tx_hash,
            Claim::BatchExecuted(c) => c.observed_tx_hash,
            Claim::BatchExecutionFailed(c) => c.observed_tx_hash,
            Claim::HotWalletIncrement(c) => c.observed_tx_hash,
        }
    }
}

/// The claim accumulator for one tick. Claims are appended by the per-type
/// validators and never reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBatch {
    claims: Vec<Claim>,
}

impl ClaimBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn count(&self) -> usize {
        self.claims.len()
    }

    pub fn any(&self) -> bool {
        !self.claims.is_empty()
    }

    pub fn can_add_more(&self, max_amount: usize) -> bool {
        self.count() < max_amount
    }

    /// All claims in append order
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    pub fn bridging_request_claims(&self) -> impl Iterator<Item = &BridgingRequestClaim> {
        self.claims.iter().filter_map(|c| match c {
            Claim::BridgingRequest(c) => Some(c),
            _ => None,
        })
    }

    pub fn batch_executed_claims(&self) -> impl Iterator<Item = &BatchExecutedClaim> {
        self.claims.iter().filter_map(|c| match c {
            Claim::BatchExecuted(c) => Some(c),
            _ => None,
        })
    }

    pub fn batch_execution_failed_claims(&self) -> impl Iterator<Item = &BatchExecutionFailedClaim> {
        self.claims.iter().filter_map(|c| match c {
            Claim::BatchExecutionFailed(c) => Some(c),
            _ => None,
        })
    }
}
