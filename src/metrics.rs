// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

use prometheus::{
    register_int_counter_vec_with_registry, register_int_counter_with_registry, IntCounter,
    IntCounterVec, Registry,
};

/// Counters for the observation-to-claim pipeline.
#[derive(Clone, Debug)]
pub struct OracleMetrics {
    /// Confirmed transactions handed to ingestion, per chain
    pub(crate) txs_received: IntCounterVec,
    /// Transactions whose metadata resolved to no known type, per chain
    pub(crate) invalid_metadata_txs: IntCounterVec,
    /// Claim candidates marked invalid during a tick, per chain
    pub(crate) invalid_claim_candidates: IntCounterVec,
    /// Claims committed after successful submission
    pub(crate) claims_submitted: IntCounter,
    /// Expected transactions stored from the bridge contract, per chain
    pub(crate) expected_txs_fetched: IntCounterVec,
}

impl OracleMetrics {
    pub fn new(registry: &Registry) -> Self {
        Self {
            txs_received: register_int_counter_vec_with_registry!(
                "oracle_txs_received",
                "Confirmed transactions received from the chain syncer",
                &["chain"],
                registry,
            )
            .unwrap(),
            invalid_metadata_txs: register_int_counter_vec_with_registry!(
                "oracle_invalid_metadata_txs",
                "Transactions rejected at ingestion for unknown or undecodable metadata",
                &["chain"],
                registry,
            )
            .unwrap(),
            invalid_claim_candidates: register_int_counter_vec_with_registry!(
                "oracle_invalid_claim_candidates",
                "Claim candidates marked invalid by the claims builder",
                &["chain"],
                registry,
            )
            .unwrap(),
            claims_submitted: register_int_counter_with_registry!(
                "oracle_claims_submitted",
                "Claims committed after successful batch submission",
                registry,
            )
            .unwrap(),
            expected_txs_fetched: register_int_counter_vec_with_registry!(
                "oracle_expected_txs_fetched",
                "Expected transactions fetched from the bridge contract",
                &["chain"],
                registry,
            )
            .unwrap(),
        }
    }

    pub fn new_for_testing() -> Self {
        Self::new(&Registry::new())
    }
}
