// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Type dispatch: routes a transaction to the validator registered for its
//! resolved type.
//!
//! Resolution is pure. A transaction with empty metadata is a bare-value
//! transfer and resolves to the hot-wallet-funding validator; anything else
//! must carry a decodable envelope whose tag has a registration, otherwise
//! resolution fails with [`OracleError::UnknownTxType`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{OracleError, OracleResult};
use crate::metadata::{decode_base_metadata, TxType};
use crate::types::{ExpectedTx, ObservedTx};
use crate::validators::{FailureValidator, SuccessValidator};

/// The dispatch table, built once at startup.
#[derive(Clone)]
pub struct TxValidators {
    success: HashMap<TxType, Arc<dyn SuccessValidator>>,
    failure: HashMap<TxType, Arc<dyn FailureValidator>>,
}

impl TxValidators {
    pub fn new(
        success: Vec<Arc<dyn SuccessValidator>>,
        failure: Vec<Arc<dyn FailureValidator>>,
    ) -> Self {
        Self {
            success: success.into_iter().map(|v| (v.tx_type(), v)).collect(),
            failure: failure.into_iter().map(|v| (v.tx_type(), v)).collect(),
        }
    }

    /// Resolves the success validator for an observed transaction and runs
    /// its pre-validation.
    pub fn resolve_success(
        &self,
        tx: &ObservedTx,
        config: &AppConfig,
    ) -> OracleResult<Arc<dyn SuccessValidator>> {
        let tx_type = if tx.metadata.is_empty() {
            TxType::HotWalletFunding
        } else {
            decode_base_metadata(&tx.metadata)?.tx_type
        };
        let validator = self
            .success
            .get(&tx_type)
            .cloned()
            .ok_or_else(|| unregistered(tx_type))?;
        validator.pre_validate(tx, config)?;
        Ok(validator)
    }

    /// Resolves the failure validator for an expected transaction and runs
    /// its pre-validation.
    pub fn resolve_failure(
        &self,
        tx: &ExpectedTx,
        config: &AppConfig,
    ) -> OracleResult<Arc<dyn FailureValidator>> {
        let tx_type = decode_base_metadata(&tx.metadata)?.tx_type;
        let validator = self
            .failure
            .get(&tx_type)
            .cloned()
            .ok_or_else(|| unregistered(tx_type))?;
        validator.pre_validate(tx, config)?;
        Ok(validator)
    }
}

fn unregistered(tx_type: TxType) -> OracleError {
    OracleError::UnknownTxType(format!("no validator registered for type {tx_type}"))
}
