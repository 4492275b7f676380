// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! On-chain metadata envelope attached to bridge-relevant transactions.
//!
//! Every tagged transaction carries a JSON envelope whose `t` field names
//! the bridging transaction type. Bare-value transfers (hot wallet funding)
//! carry no metadata at all and are classified by destination address alone.

use crate::error::{OracleError, OracleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed enumeration of bridging transaction types the oracle understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    /// A user request to move funds across the bridge
    #[serde(rename = "bridge")]
    BridgingRequest,
    /// Execution of a previously submitted batch
    #[serde(rename = "batch")]
    BatchExecution,
    /// Bare-value transfer topping up the hot wallet
    #[serde(rename = "fund")]
    HotWalletFunding,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::BridgingRequest => "bridge",
            TxType::BatchExecution => "batch",
            TxType::HotWalletFunding => "fund",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The base envelope shared by all metadata payloads; only the type tag is
/// decoded here, the rest belongs to the type-specific validators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseMetadata {
    #[serde(rename = "t")]
    pub tx_type: TxType,
}

/// Decodes the base envelope from raw metadata bytes.
///
/// An undecodable envelope or an unrecognized tag is a classification error,
/// not a pipeline failure: callers mark the transaction terminally invalid.
pub fn decode_base_metadata(bytes: &[u8]) -> OracleResult<BaseMetadata> {
    serde_json::from_slice(bytes)
        .map_err(|e| OracleError::UnknownTxType(format!("undecodable metadata envelope: {e}")))
}
