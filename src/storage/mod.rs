// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Durable record store for the claims pipeline, on an embedded sled tree.
//!
//! Records are JSON values under byte-ordered keys (see [`keys`]), so the
//! slot/TTL-ascending scans the claims builder needs are plain prefix
//! iterations. Every multi-record mutation is one atomic batch.

pub mod keys;

use std::collections::BTreeSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{OracleError, OracleResult};
use crate::types::{ChainId, ExpectedTx, ObservedTx, ProcessedTx, TxKey};

use keys::{
    expected_storage_key, ordered_scan_prefix, pending_storage_key, processed_storage_key,
    unprocessed_key_of_processed, unprocessed_storage_key, KIND_EXPECTED, KIND_UNPROCESSED,
};

/// All mutations the claims builder (and the external scheduler) can apply in
/// one atomic write.
#[derive(Debug, Clone, Default)]
pub struct UpdateTxsData {
    /// Expected transactions to mark resolved by an observed success.
    pub expected_processed: Vec<ExpectedTx>,
    /// Expected transactions to mark terminally invalid.
    pub expected_invalid: Vec<ExpectedTx>,
    /// Unprocessed records rewritten in place (retry counters, timestamps).
    pub update_unprocessed: Vec<ObservedTx>,
    pub move_unprocessed_to_pending: Vec<ObservedTx>,
    pub move_unprocessed_to_processed: Vec<ProcessedTx>,
    pub move_pending_to_unprocessed: Vec<ObservedTx>,
    pub move_pending_to_processed: Vec<ProcessedTx>,
}

impl UpdateTxsData {
    pub fn count(&self) -> usize {
        self.expected_processed.len()
            + self.expected_invalid.len()
            + self.update_unprocessed.len()
            + self.move_unprocessed_to_pending.len()
            + self.move_unprocessed_to_processed.len()
            + self.move_pending_to_unprocessed.len()
            + self.move_pending_to_processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

pub struct RecordStore {
    db: sled::Db,
    chains: BTreeSet<ChainId>,
}

impl RecordStore {
    pub fn open(path: impl AsRef<Path>, chains: &[ChainId]) -> OracleResult<Self> {
        let db = sled::open(path)?;
        Ok(Self::with_db(db, chains))
    }

    pub fn with_db(db: sled::Db, chains: &[ChainId]) -> Self {
        Self {
            db,
            chains: chains.iter().copied().collect(),
        }
    }

    fn check_chain(&self, chain: ChainId) -> OracleResult<()> {
        if self.chains.contains(&chain) {
            Ok(())
        } else {
            Err(OracleError::UnsupportedChain(chain))
        }
    }

    /// Stores one ingestion result: terminally classified records straight to
    /// processed, the rest to unprocessed. Atomic; empty input is a no-op.
    pub fn add_txs(
        &self,
        processed: &[ProcessedTx],
        unprocessed: &[ObservedTx],
    ) -> OracleResult<()> {
        if processed.is_empty() && unprocessed.is_empty() {
            return Ok(());
        }
        for tx in processed {
            self.check_chain(tx.chain)?;
        }
        for tx in unprocessed {
            self.check_chain(tx.chain)?;
        }

        let mut batch = sled::Batch::default();
        for tx in processed {
            batch.insert(processed_storage_key(tx.key()), encode(tx)?);
        }
        for tx in unprocessed {
            batch.insert(unprocessed_storage_key(tx), encode(tx)?);
        }
        self.db.apply_batch(batch)?;
        Ok(())
    }

    /// Stores expected transactions fetched from the bridge contract. A key
    /// that already holds a record is left untouched, so re-fetching the same
    /// batch never resets resolution flags.
    pub fn add_expected_txs(&self, txs: &[ExpectedTx]) -> OracleResult<()> {
        if txs.is_empty() {
            return Ok(());
        }
        let mut batch = sled::Batch::default();
        let mut any = false;
        for tx in txs {
            self.check_chain(tx.chain)?;
            let key = expected_storage_key(tx);
            if self.db.contains_key(&key)? {
                continue;
            }
            batch.insert(key, encode(tx)?);
            any = true;
        }
        if any {
            self.db.apply_batch(batch)?;
        }
        Ok(())
    }

    /// Unprocessed transactions for one chain and priority tier, ascending
    /// by block slot.
    pub fn get_unprocessed_txs(
        &self,
        chain: ChainId,
        priority: u8,
    ) -> OracleResult<Vec<ObservedTx>> {
        self.check_chain(chain)?;
        self.scan_ordered::<ObservedTx>(KIND_UNPROCESSED, priority, |tx| tx.chain == chain)
    }

    /// Live expected transactions for one chain and priority tier, ascending
    /// by TTL. Records already marked processed or invalid are excluded.
    pub fn get_expected_txs(&self, chain: ChainId, priority: u8) -> OracleResult<Vec<ExpectedTx>> {
        self.check_chain(chain)?;
        self.scan_ordered::<ExpectedTx>(KIND_EXPECTED, priority, |tx| {
            tx.chain == chain && !tx.is_processed && !tx.is_invalid
        })
    }

    /// Every expected record for one chain, resolved or not, across both
    /// priority tiers.
    pub fn get_all_expected_txs(&self, chain: ChainId) -> OracleResult<Vec<ExpectedTx>> {
        self.check_chain(chain)?;
        let mut out = Vec::new();
        for entry in self.db.scan_prefix([KIND_EXPECTED]) {
            let (_, value) = entry?;
            let tx: ExpectedTx = decode(&value)?;
            if tx.chain == chain {
                out.push(tx);
            }
        }
        Ok(out)
    }

    pub fn get_processed_tx(&self, key: TxKey) -> OracleResult<Option<ProcessedTx>> {
        self.check_chain(key.chain)?;
        self.get_point(processed_storage_key(key))
    }

    pub fn get_pending_tx(&self, key: TxKey) -> OracleResult<Option<ObservedTx>> {
        self.check_chain(key.chain)?;
        self.get_point(pending_storage_key(key))
    }

    /// Applies a tick's worth of mutations in one atomic batch. An empty
    /// update is a no-op.
    pub fn update_txs(&self, data: &UpdateTxsData) -> OracleResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        let mut batch = sled::Batch::default();

        for tx in &data.expected_processed {
            let mut resolved = tx.clone();
            resolved.is_processed = true;
            batch.insert(expected_storage_key(tx), encode(&resolved)?);
        }
        for tx in &data.expected_invalid {
            let mut resolved = tx.clone();
            resolved.is_invalid = true;
            batch.insert(expected_storage_key(tx), encode(&resolved)?);
        }
        for tx in &data.update_unprocessed {
            batch.insert(unprocessed_storage_key(tx), encode(tx)?);
        }
        for tx in &data.move_unprocessed_to_pending {
            batch.remove(unprocessed_storage_key(tx));
            batch.insert(pending_storage_key(tx.key()), encode(tx)?);
        }
        for tx in &data.move_unprocessed_to_processed {
            batch.remove(unprocessed_key_of_processed(tx));
            batch.insert(processed_storage_key(tx.key()), encode(tx)?);
        }
        for tx in &data.move_pending_to_unprocessed {
            batch.remove(pending_storage_key(tx.key()));
            batch.insert(unprocessed_storage_key(tx), encode(tx)?);
        }
        for tx in &data.move_pending_to_processed {
            batch.remove(pending_storage_key(tx.key()));
            batch.insert(processed_storage_key(tx.key()), encode(tx)?);
        }

        self.db.apply_batch(batch)?;
        Ok(())
    }

    fn scan_ordered<T: DeserializeOwned>(
        &self,
        kind: u8,
        priority: u8,
        keep: impl Fn(&T) -> bool,
    ) -> OracleResult<Vec<T>> {
        let mut out = Vec::new();
        for entry in self.db.scan_prefix(ordered_scan_prefix(kind, priority)) {
            let (_, value) = entry?;
            let tx: T = decode(&value)?;
            if keep(&tx) {
                out.push(tx);
            }
        }
        Ok(out)
    }

    fn get_point<T: DeserializeOwned>(&self, key: Vec<u8>) -> OracleResult<Option<T>> {
        match self.db.get(key)? {
            Some(value) => Ok(Some(decode(&value)?)),
            None => Ok(None),
        }
    }
}

fn encode<T: Serialize>(value: &T) -> OracleResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| OracleError::Storage(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> OracleResult<T> {
    serde_json::from_slice(bytes).map_err(|e| OracleError::Storage(e.to_string()))
}
