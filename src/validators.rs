// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-type validator capability traits.
//!
//! A success validator handles an observed transaction of its type: it checks
//! the business rules and, when they hold, appends the corresponding claim.
//! A failure validator handles an expected transaction of its type that
//! passed its deadline without being observed.

use crate::claims::ClaimBatch;
use crate::config::AppConfig;
use crate::error::OracleResult;
use crate::metadata::TxType;
use crate::types::{ExpectedTx, ObservedTx};

pub trait SuccessValidator: Send + Sync {
    /// The transaction type this validator is registered for.
    fn tx_type(&self) -> TxType;

    /// Cheap structural check run at resolution time, before the transaction
    /// is admitted into a tick. A failure here marks the transaction invalid.
    fn pre_validate(&self, tx: &ObservedTx, config: &AppConfig) -> OracleResult<()>;

    /// Full validation; on success appends exactly one claim to the batch.
    fn validate_and_add_claim(
        &self,
        claims: &mut ClaimBatch,
        tx: &ObservedTx,
        config: &AppConfig,
    ) -> OracleResult<()>;
}

pub trait FailureValidator: Send + Sync {
    fn tx_type(&self) -> TxType;

    fn pre_validate(&self, tx: &ExpectedTx, config: &AppConfig) -> OracleResult<()>;

    /// Appends the failure claim for an expected transaction whose deadline
    /// passed unobserved.
    fn validate_and_add_claim(
        &self,
        claims: &mut ClaimBatch,
        tx: &ExpectedTx,
        config: &AppConfig,
    ) -> OracleResult<()>;
}
