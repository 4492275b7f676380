// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridge oracle claims pipeline: observes confirmed transactions on the
//! connected chains, classifies them through per-type validators, and turns
//! durable observed/expected state into ordered claim batches for the bridge
//! contract.

pub mod bridge_fetcher;
pub mod builder;
pub mod chain_index;
pub mod claims;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ingestion;
pub mod metadata;
pub mod metrics;
pub mod retry;
pub mod state_updater;
pub mod storage;
pub mod types;
pub mod validators;

#[cfg(test)]
pub(crate) mod test_utils;
