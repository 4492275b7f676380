// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Byte-key layout for the record store.
//!
//! All keys live in one tree, distinguished by a record-kind prefix byte.
//! Domain keys are built so that raw byte order equals the domain order the
//! claims builder iterates in:
//!
//! - observed: priority (1B) ‖ block slot (8B BE) ‖ chain (1B) ‖ hash (32B)
//! - expected: priority (1B) ‖ ttl        (8B BE) ‖ chain (1B) ‖ hash (32B)
//!
//! Pending and processed records are point-looked-up only and are keyed by
//! (chain, hash).

use crate::types::{ExpectedTx, ObservedTx, ProcessedTx, TxKey};

pub(crate) const KIND_UNPROCESSED: u8 = 0;
pub(crate) const KIND_PENDING: u8 = 1;
pub(crate) const KIND_PROCESSED: u8 = 2;
pub(crate) const KIND_EXPECTED: u8 = 3;

const ORDERED_KEY_LEN: usize = 1 + 8 + 1 + 32;

fn ordered_key(priority: u8, position: u64, key: TxKey) -> [u8; ORDERED_KEY_LEN] {
    let mut out = [0u8; ORDERED_KEY_LEN];
    out[0] = priority;
    out[1..9].copy_from_slice(&position.to_be_bytes());
    out[9] = key.chain.0;
    out[10..].copy_from_slice(key.hash.as_bytes());
    out
}

/// Ordered key for an observed transaction: sorts by (priority, slot, chain,
/// hash).
pub fn observed_tx_key(tx: &ObservedTx) -> [u8; ORDERED_KEY_LEN] {
    ordered_key(tx.priority, tx.block_slot, tx.key())
}

/// Ordered key for an expected transaction: sorts by (priority, ttl, chain,
/// hash).
pub fn expected_tx_key(tx: &ExpectedTx) -> [u8; ORDERED_KEY_LEN] {
    ordered_key(tx.priority, tx.ttl, tx.key())
}

pub(crate) fn unprocessed_storage_key(tx: &ObservedTx) -> Vec<u8> {
    prefixed(KIND_UNPROCESSED, &observed_tx_key(tx))
}

pub(crate) fn expected_storage_key(tx: &ExpectedTx) -> Vec<u8> {
    prefixed(KIND_EXPECTED, &expected_tx_key(tx))
}

/// The ordered unprocessed key a processed record originated from, used when
/// a move operation deletes the source record.
pub(crate) fn unprocessed_key_of_processed(tx: &ProcessedTx) -> Vec<u8> {
    prefixed(
        KIND_UNPROCESSED,
        &ordered_key(tx.priority, tx.block_slot, tx.key()),
    )
}

pub(crate) fn pending_storage_key(key: TxKey) -> Vec<u8> {
    point_key(KIND_PENDING, key)
}

pub(crate) fn processed_storage_key(key: TxKey) -> Vec<u8> {
    point_key(KIND_PROCESSED, key)
}

/// Prefix selecting one record kind + priority tier for an ordered scan.
pub(crate) fn ordered_scan_prefix(kind: u8, priority: u8) -> [u8; 2] {
    [kind, priority]
}

fn prefixed(kind: u8, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + key.len());
    out.push(kind);
    out.extend_from_slice(key);
    out
}

fn point_key(kind: u8, key: TxKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 1 + 32);
    out.push(kind);
    out.push(key.chain.0);
    out.extend_from_slice(key.hash.as_bytes());
    out
}
