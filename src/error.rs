// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the oracle claims pipeline

use crate::types::ChainId;
use thiserror::Error;

/// Result type used throughout the oracle core
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur while observing, classifying and claiming
/// bridge transactions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The transaction metadata is missing, undecodable, or carries a type
    /// tag with no registered validator. Always resolved locally by marking
    /// the transaction terminally invalid.
    #[error("unknown transaction type: {0}")]
    UnknownTxType(String),

    /// A recognized transaction type whose business-rule check failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Record Store read or write failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Bridge contract client failure (after bounded retries).
    #[error("bridge contract error: {0}")]
    BridgeContract(String),

    /// Chain syncer durable-index failure.
    #[error("chain index error: {0}")]
    ChainIndex(String),

    /// The chain is not present in the oracle configuration.
    #[error("unsupported chain: {0}")]
    UnsupportedChain(ChainId),

    /// The surrounding cancellation scope was triggered.
    #[error("operation cancelled")]
    Cancelled,

    /// Uncategorized error
    #[error("{0}")]
    Generic(String),
}

impl OracleError {
    /// Returns a short string identifying the error type for metrics labels
    pub fn error_type(&self) -> &'static str {
        match self {
            OracleError::UnknownTxType(_) => "unknown_tx_type",
            OracleError::Validation(_) => "validation",
            OracleError::Storage(_) => "storage",
            OracleError::BridgeContract(_) => "bridge_contract",
            OracleError::ChainIndex(_) => "chain_index",
            OracleError::UnsupportedChain(_) => "unsupported_chain",
            OracleError::Cancelled => "cancelled",
            OracleError::Generic(_) => "generic",
        }
    }
}

impl From<sled::Error> for OracleError {
    fn from(e: sled::Error) -> Self {
        OracleError::Storage(e.to_string())
    }
}
