// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Oracle configuration

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::ChainId;

/// Default bound on claims grouped into one submission batch.
pub const DEFAULT_MAX_CLAIMS_TO_GROUP: usize = 10;

/// Default cooldown before a previously rejected transaction is retried.
pub const DEFAULT_RETRY_UNPROCESSED_COOLDOWN_SECS: u64 = 60;

/// Per-chain oracle settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainConfig {
    pub chain_id: ChainId,
    // Address of the bridging hot wallet on this chain, consumed by the
    // per-type validators.
    pub hot_wallet_address: String,
    // Upper bound on claims grouped into one batch for this chain.
    #[serde(default = "default_max_claims_to_group")]
    pub max_claims_to_group: usize,
}

fn default_max_claims_to_group() -> usize {
    DEFAULT_MAX_CLAIMS_TO_GROUP
}

/// Cooldown applied to unprocessed transactions whose last claim attempt
/// was rejected downstream.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryUnprocessedSettings {
    #[serde(default = "default_retry_cooldown_secs")]
    pub cooldown_secs: u64,
}

fn default_retry_cooldown_secs() -> u64 {
    DEFAULT_RETRY_UNPROCESSED_COOLDOWN_SECS
}

impl RetryUnprocessedSettings {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

impl Default for RetryUnprocessedSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_RETRY_UNPROCESSED_COOLDOWN_SECS,
        }
    }
}

/// Top-level oracle configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    pub chains: BTreeMap<ChainId, ChainConfig>,
    #[serde(default)]
    pub retry_unprocessed: RetryUnprocessedSettings,
}

impl AppConfig {
    /// Validates the configuration at startup; a failure here aborts
    /// construction of the oracle.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chains.is_empty() {
            return Err(anyhow!("no chains configured"));
        }
        for (id, chain) in &self.chains {
            if *id != chain.chain_id {
                return Err(anyhow!(
                    "chain config keyed under {} declares chain id {}",
                    id,
                    chain.chain_id
                ));
            }
            if chain.max_claims_to_group == 0 {
                return Err(anyhow!("max-claims-to-group must be positive for chain {id}"));
            }
        }
        Ok(())
    }

    pub fn chain(&self, chain: ChainId) -> Option<&ChainConfig> {
        self.chains.get(&chain)
    }

    /// Chain ids in stable ascending order, so ticks always iterate chains
    /// the same way.
    pub fn sorted_chain_ids(&self) -> Vec<ChainId> {
        self.chains.keys().copied().collect()
    }
}
