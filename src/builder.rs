// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The claims builder: turns durable observed/expected state into one bounded
//! claim batch per tick, in ascending chain position.
//!
//! A tick walks confirmed blocks as the global minimum over two ordered
//! sources: unprocessed transactions (slot-ascending) and expected
//! transactions (deadline-ascending, deadline being the first confirmed block
//! at or after ttl plus the insurance offset). Nothing durable is mutated
//! until [`ClaimsBuilder::commit`], so a tick that fails downstream can simply
//! be re-run and will produce the same batch.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, error, warn};

use crate::chain_index::{first_confirmed_block_from, ChainIndex};
use crate::claims::ClaimBatch;
use crate::config::AppConfig;
use crate::dispatch::TxValidators;
use crate::error::OracleResult;
use crate::metadata::{decode_base_metadata, TxType};
use crate::metrics::OracleMetrics;
use crate::state_updater::BridgingRequestStateUpdater;
use crate::storage::{RecordStore, UpdateTxsData};
use crate::types::{
    BlockRef, ChainId, ExpectedTx, ObservedTx, ProcessedTx, TxKey, LAST_PROCESSING_PRIORITY,
};

/// Slots past an expected transaction's TTL before it counts as expired,
/// absorbing small disagreements between chain tip views.
pub const TTL_INSURANCE_OFFSET: u64 = 2;

/// Everything one tick decided, applied durably only at commit.
#[derive(Debug, Clone, Default)]
pub struct TickUpdate {
    /// Expected transactions resolved this tick, by observation or expiry.
    pub expected_processed: Vec<ExpectedTx>,
    /// Expected transactions whose failure dispatch rejected them.
    pub expected_invalid: Vec<ExpectedTx>,
    /// Terminal records for consumed unprocessed transactions.
    pub processed: Vec<ProcessedTx>,
    /// The consumed transactions that were rejected, kept whole for
    /// user-state notifications.
    pub invalid_observed: Vec<ObservedTx>,
}

impl TickUpdate {
    pub fn is_empty(&self) -> bool {
        self.expected_processed.is_empty()
            && self.expected_invalid.is_empty()
            && self.processed.is_empty()
            && self.invalid_observed.is_empty()
    }

    pub fn merge(&mut self, other: TickUpdate) {
        self.expected_processed.extend(other.expected_processed);
        self.expected_invalid.extend(other.expected_invalid);
        self.processed.extend(other.processed);
        self.invalid_observed.extend(other.invalid_observed);
    }

    fn into_update_txs_data(self) -> UpdateTxsData {
        UpdateTxsData {
            expected_processed: self.expected_processed,
            expected_invalid: self.expected_invalid,
            move_unprocessed_to_processed: self.processed,
            ..Default::default()
        }
    }
}

/// Working set for one `run_checks` call; constructed from durable state at
/// the start of the tick and never outlives it.
struct TickState {
    /// Remaining unprocessed transactions, slot-ascending.
    unprocessed: Vec<ObservedTx>,
    /// Remaining expected transactions by identity.
    expected: BTreeMap<TxKey, ExpectedTx>,
    /// TTL-ascending visit order for `expected`.
    expected_order: Vec<TxKey>,
}

pub struct ClaimsBuilder {
    store: Arc<RecordStore>,
    validators: TxValidators,
    chain_indexes: HashMap<ChainId, Arc<dyn ChainIndex>>,
    state_updater: Arc<dyn BridgingRequestStateUpdater>,
    config: AppConfig,
    metrics: OracleMetrics,
}

impl ClaimsBuilder {
    pub fn new(
        store: Arc<RecordStore>,
        validators: TxValidators,
        chain_indexes: HashMap<ChainId, Arc<dyn ChainIndex>>,
        state_updater: Arc<dyn BridgingRequestStateUpdater>,
        config: AppConfig,
        metrics: OracleMetrics,
    ) -> Self {
        Self {
            store,
            validators,
            chain_indexes,
            state_updater,
            config,
            metrics,
        }
    }

    /// One full tick for a chain: both priority tiers, urgent first, sharing
    /// one claim cap.
    pub async fn build_claims(&self, chain: ChainId) -> (ClaimBatch, TickUpdate) {
        let max_claims = self
            .config
            .chain(chain)
            .map_or(crate::config::DEFAULT_MAX_CLAIMS_TO_GROUP, |c| {
                c.max_claims_to_group
            });
        let mut claims = ClaimBatch::new();
        let mut update = TickUpdate::default();
        for priority in 0..=LAST_PROCESSING_PRIORITY {
            if !claims.can_add_more(max_claims) {
                break;
            }
            update.merge(self.run_checks(&mut claims, chain, priority, max_claims).await);
        }
        (claims, update)
    }

    /// Accumulates claims for one chain and priority tier until the cap is
    /// reached or no candidate block remains. Purely computational: durable
    /// state is only read here.
    pub async fn run_checks(
        &self,
        claims: &mut ClaimBatch,
        chain: ChainId,
        priority: u8,
        max_claims: usize,
    ) -> TickUpdate {
        let mut update = TickUpdate::default();
        let Some(index) = self.chain_indexes.get(&chain) else {
            warn!(%chain, "no chain index registered, skipping tick");
            return update;
        };

        // A read failure degrades the source to empty for this tick.
        let unprocessed = self
            .store
            .get_unprocessed_txs(chain, priority)
            .unwrap_or_else(|e| {
                warn!(%chain, priority, error = %e, "failed to load unprocessed txs");
                Vec::new()
            });
        let expected = self.store.get_expected_txs(chain, priority).unwrap_or_else(|e| {
            warn!(%chain, priority, error = %e, "failed to load expected txs");
            Vec::new()
        });
        let mut state = TickState {
            unprocessed,
            expected_order: expected.iter().map(ExpectedTx::key).collect(),
            expected: expected.into_iter().map(|tx| (tx.key(), tx)).collect(),
        };

        let now = SystemTime::now();
        let mut prev: Option<BlockRef> = None;
        while claims.can_add_more(max_claims) {
            let Some(block) = self
                .select_next_block(index.as_ref(), prev.as_ref(), &state)
                .await
            else {
                break;
            };
            debug!(%block, priority, "checking claim candidates");
            self.check_unprocessed_txs(&block, &mut state, claims, &mut update, max_claims, now);
            self.check_expected_txs(index.as_ref(), &block, &mut state, claims, &mut update, max_claims)
                .await;
            prev = Some(block);
        }
        update
    }

    /// The earliest candidate block strictly after `prev`, taken as the
    /// minimum over both remaining sources.
    async fn select_next_block(
        &self,
        index: &dyn ChainIndex,
        prev: Option<&BlockRef>,
        state: &TickState,
    ) -> Option<BlockRef> {
        let after = |slot: u64| prev.map_or(true, |p| p.slot < slot);

        let mut candidate: Option<BlockRef> = None;
        for tx in &state.unprocessed {
            if after(tx.block_slot) {
                candidate = Some(BlockRef {
                    chain: tx.chain,
                    slot: tx.block_slot,
                    hash: tx.block_hash,
                });
                break;
            }
        }

        for key in &state.expected_order {
            let Some(tx) = state.expected.get(key) else {
                continue;
            };
            let deadline =
                match first_confirmed_block_from(index, tx.ttl.saturating_add(TTL_INSURANCE_OFFSET)).await {
                    Ok(Some(block)) => block,
                    // TTLs ascend, so no later record has a confirmed
                    // deadline either.
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "chain index lookup failed during block selection");
                        break;
                    }
                };
            if !after(deadline.slot) {
                continue;
            }
            // On a tie the observed block wins, draining direct observations
            // before expiries of the same slot.
            match candidate {
                Some(c) if c.slot <= deadline.slot => {}
                _ => candidate = Some(deadline),
            }
            break;
        }

        candidate
    }

    /// Consumes every unprocessed transaction of the selected block: a valid
    /// one yields its claim (resolving any expected counterpart), a rejected
    /// one becomes a terminal invalid record. Transactions inside the retry
    /// cooldown are deferred to a later tick untouched.
    fn check_unprocessed_txs(
        &self,
        block: &BlockRef,
        state: &mut TickState,
        claims: &mut ClaimBatch,
        update: &mut TickUpdate,
        max_claims: usize,
        now: SystemTime,
    ) {
        let cooldown = self.config.retry_unprocessed.cooldown();
        let chain_label = block.chain.to_string();
        let mut remaining = Vec::with_capacity(state.unprocessed.len());
        let mut capped = false;

        for tx in state.unprocessed.drain(..) {
            if capped || !block.matches_observed(&tx) {
                remaining.push(tx);
                continue;
            }
            if !claims.can_add_more(max_claims) {
                capped = true;
                remaining.push(tx);
                continue;
            }
            if !tx.is_ready(cooldown, now) {
                debug!(chain = %tx.chain, hash = %tx.hash, "inside retry cooldown, deferred");
                continue;
            }
            let result = self
                .validators
                .resolve_success(&tx, &self.config)
                .and_then(|v| v.validate_and_add_claim(claims, &tx, &self.config));
            match result {
                Ok(()) => {
                    if let Some(expected) = state.expected.remove(&tx.key()) {
                        update.expected_processed.push(expected);
                    }
                    update.processed.push(tx.to_processed(false));
                }
                Err(e) => {
                    warn!(chain = %tx.chain, hash = %tx.hash, error = %e, "claim candidate rejected");
                    self.metrics
                        .invalid_claim_candidates
                        .with_label_values(&[&chain_label])
                        .inc();
                    update.processed.push(tx.to_processed(true));
                    update.invalid_observed.push(tx);
                }
            }
        }
        state.unprocessed = remaining;
    }

    /// Resolves every expected transaction whose deadline is exactly the
    /// selected block. A matching valid processed record resolves it without
    /// a claim; otherwise the failure validator produces the expiry claim.
    async fn check_expected_txs(
        &self,
        index: &dyn ChainIndex,
        block: &BlockRef,
        state: &mut TickState,
        claims: &mut ClaimBatch,
        update: &mut TickUpdate,
        max_claims: usize,
    ) {
        let chain_label = block.chain.to_string();
        let keys: Vec<TxKey> = state.expected.keys().copied().collect();

        for key in keys {
            let Some(tx) = state.expected.get(&key) else {
                continue;
            };
            let deadline =
                match first_confirmed_block_from(index, tx.ttl.saturating_add(TTL_INSURANCE_OFFSET)).await {
                    Ok(Some(block)) => block,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(error = %e, "chain index lookup failed during expiry check");
                        break;
                    }
                };
            if deadline != *block {
                continue;
            }
            if !claims.can_add_more(max_claims) {
                // Cap reached: the rest stays untouched for the next tick.
                break;
            }
            let Some(tx) = state.expected.remove(&key) else {
                continue;
            };

            // Already observed successfully: resolved without an expiry claim.
            if let Some(processed) = self.store.get_processed_tx(key).ok().flatten() {
                if !processed.is_invalid {
                    debug!(%key, "expected tx already processed, no expiry claim");
                    update.expected_processed.push(tx);
                    continue;
                }
            }

            let result = self
                .validators
                .resolve_failure(&tx, &self.config)
                .and_then(|v| v.validate_and_add_claim(claims, &tx, &self.config));
            match result {
                Ok(()) => update.expected_processed.push(tx),
                Err(e) => {
                    warn!(%key, error = %e, "expired expected tx rejected");
                    self.metrics
                        .invalid_claim_candidates
                        .with_label_values(&[&chain_label])
                        .inc();
                    update.expected_invalid.push(tx);
                }
            }
        }
    }

    /// Applies a tick durably: user-state notifications first (best-effort),
    /// then one atomic record-store write. Call only after the batch was
    /// accepted downstream.
    pub async fn commit(&self, update: TickUpdate, claims: &ClaimBatch) -> OracleResult<()> {
        self.notify_state_updater(&update, claims).await;
        if claims.any() {
            self.metrics.claims_submitted.inc_by(claims.count() as u64);
        }
        let data = update.into_update_txs_data();
        if data.is_empty() {
            return Ok(());
        }
        if let Err(e) = self.store.update_txs(&data) {
            error!(error = %e, "failed to persist tick update");
            return Err(e);
        }
        Ok(())
    }

    async fn notify_state_updater(&self, update: &TickUpdate, claims: &ClaimBatch) {
        for claim in claims.bridging_request_claims() {
            let key = TxKey::new(claim.source_chain, claim.observed_tx_hash);
            if let Err(e) = self
                .state_updater
                .submitted_to_bridge(key, claim.destination_chain)
                .await
            {
                warn!(%key, error = %e, "state update failed: submitted to bridge");
            }
        }
        for claim in claims.batch_executed_claims() {
            if let Err(e) = self
                .state_updater
                .executed_on_destination(claim.chain, claim.batch_id, claim.observed_tx_hash)
                .await
            {
                warn!(batch_id = claim.batch_id, error = %e, "state update failed: executed");
            }
        }
        for claim in claims.batch_execution_failed_claims() {
            if let Err(e) = self
                .state_updater
                .failed_to_execute_on_destination(claim.chain, claim.batch_id)
                .await
            {
                warn!(batch_id = claim.batch_id, error = %e, "state update failed: failed to execute");
            }
        }
        for tx in &update.invalid_observed {
            let is_bridging_request = decode_base_metadata(&tx.metadata)
                .map(|m| m.tx_type == TxType::BridgingRequest)
                .unwrap_or(false);
            if is_bridging_request {
                if let Err(e) = self.state_updater.invalid(tx.key()).await {
                    warn!(key = %tx.key(), error = %e, "state update failed: invalid");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claim;
    use crate::test_utils::{
        block_hash_for_slot, expected_tx, observed_tx, temp_store, test_config, test_validators,
        FailingChainIndex, MockChainIndex, MockFailureValidator, MockSuccessValidator,
        RecordingStateUpdater, StateEvent,
    };
    use crate::types::{TxHash, PRIORITY_NORMAL, PRIORITY_URGENT};

    fn builder_with(
        store: Arc<RecordStore>,
        index_slots: &[u64],
        updater: Arc<RecordingStateUpdater>,
        validators: TxValidators,
    ) -> ClaimsBuilder {
        let chain = ChainId(1);
        let mut indexes: HashMap<ChainId, Arc<dyn ChainIndex>> = HashMap::new();
        indexes.insert(chain, Arc::new(MockChainIndex::with_slots(chain, index_slots)));
        ClaimsBuilder::new(
            store,
            validators,
            indexes,
            updater,
            test_config(&[1]),
            OracleMetrics::new_for_testing(),
        )
    }

    fn batch_ids(claims: &ClaimBatch) -> Vec<u64> {
        claims
            .iter()
            .map(|c| match c {
                Claim::BatchExecuted(c) => c.batch_id,
                Claim::BatchExecutionFailed(c) => c.batch_id,
                other => panic!("unexpected claim kind {}", other.kind()),
            })
            .collect()
    }

    fn seed_interleaved(store: &RecordStore) {
        let chain = ChainId(1);
        // Observed batch executions at slots 3 and 7; expected batches with
        // TTLs 3 and 7, whose deadline blocks land at slots 5 and 9.
        store
            .add_txs(
                &[],
                &[
                    observed_tx(chain, [1; 32], 3, br#"{"t":"batch"}"#),
                    observed_tx(chain, [2; 32], 7, br#"{"t":"batch"}"#),
                ],
            )
            .unwrap();
        store
            .add_expected_txs(&[
                expected_tx(chain, [3; 32], 3),
                expected_tx(chain, [4; 32], 7),
            ])
            .unwrap();
    }

    #[tokio::test]
    async fn claims_are_ordered_by_chain_position_across_sources() {
        let store = Arc::new(temp_store(&[1]));
        seed_interleaved(&store);
        let builder = builder_with(
            store,
            &[3, 5, 7, 9],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let mut claims = ClaimBatch::new();
        let update = builder
            .run_checks(&mut claims, ChainId(1), PRIORITY_URGENT, 10)
            .await;

        assert_eq!(batch_ids(&claims), vec![3, 5, 7, 9]);
        assert_eq!(update.processed.len(), 2);
        assert_eq!(update.expected_processed.len(), 2);
        assert!(update.expected_invalid.is_empty());
    }

    #[tokio::test]
    async fn rerun_without_commit_yields_identical_batch() {
        let store = Arc::new(temp_store(&[1]));
        seed_interleaved(&store);
        let builder = builder_with(
            store,
            &[3, 5, 7, 9],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let mut first = ClaimBatch::new();
        builder
            .run_checks(&mut first, ChainId(1), PRIORITY_URGENT, 10)
            .await;
        let mut second = ClaimBatch::new();
        builder
            .run_checks(&mut second, ChainId(1), PRIORITY_URGENT, 10)
            .await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cap_stops_the_tick_and_leaves_the_remainder() {
        let store = Arc::new(temp_store(&[1]));
        seed_interleaved(&store);
        let updater = Arc::new(RecordingStateUpdater::default());
        let builder = builder_with(store.clone(), &[3, 5, 7, 9], updater.clone(), test_validators());
        let chain = ChainId(1);

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 2).await;
        assert_eq!(batch_ids(&claims), vec![3, 5]);
        assert_eq!(update.processed.len(), 1);
        assert_eq!(update.expected_processed.len(), 1);

        builder.commit(update, &claims).await.unwrap();
        assert_eq!(
            updater.events(),
            vec![
                StateEvent::Executed(chain, 3, TxHash([1; 32])),
                StateEvent::Failed(chain, 5),
            ]
        );

        // The untouched remainder is picked up by the next tick.
        let mut claims = ClaimBatch::new();
        builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 10).await;
        assert_eq!(batch_ids(&claims), vec![7, 9]);
    }

    #[tokio::test]
    async fn observed_success_resolves_expected_without_expiry_claim() {
        let store = Arc::new(temp_store(&[1]));
        let chain = ChainId(1);
        let hash = TxHash([9; 32]);
        store
            .add_txs(
                &[ProcessedTx {
                    chain,
                    hash,
                    block_slot: 4,
                    block_hash: block_hash_for_slot(4),
                    priority: PRIORITY_URGENT,
                    is_invalid: false,
                }],
                &[],
            )
            .unwrap();
        store
            .add_expected_txs(&[expected_tx(chain, [9; 32], 3)])
            .unwrap();
        let builder = builder_with(
            store,
            &[5],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 10).await;

        assert!(!claims.any());
        assert_eq!(update.expected_processed.len(), 1);
        assert!(update.expected_invalid.is_empty());
    }

    #[tokio::test]
    async fn rejected_bridging_request_turns_terminally_invalid() {
        let store = Arc::new(temp_store(&[1]));
        let chain = ChainId(1);
        let tx = observed_tx(chain, [5; 32], 4, br#"{"t":"bridge"}"#);
        store.add_txs(&[], std::slice::from_ref(&tx)).unwrap();

        let validators = TxValidators::new(
            vec![
                Arc::new(MockSuccessValidator::with_failures(
                    crate::metadata::TxType::BridgingRequest,
                    vec![TxHash([5; 32])],
                )),
                Arc::new(MockSuccessValidator::new(
                    crate::metadata::TxType::BatchExecution,
                )),
                Arc::new(MockSuccessValidator::new(
                    crate::metadata::TxType::HotWalletFunding,
                )),
            ],
            vec![Arc::new(MockFailureValidator::new(
                crate::metadata::TxType::BatchExecution,
            ))],
        );
        let updater = Arc::new(RecordingStateUpdater::default());
        let builder = builder_with(store.clone(), &[4], updater.clone(), validators);

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_NORMAL, 10).await;
        assert!(!claims.any());
        assert_eq!(update.invalid_observed.len(), 1);
        assert_eq!(update.processed.len(), 1);
        assert!(update.processed[0].is_invalid);

        builder.commit(update, &claims).await.unwrap();
        assert_eq!(updater.events(), vec![StateEvent::Invalid(tx.key())]);
        let processed = store.get_processed_tx(tx.key()).unwrap().unwrap();
        assert!(processed.is_invalid);
        assert!(store
            .get_unprocessed_txs(chain, PRIORITY_NORMAL)
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn cooldown_defers_a_tx_without_consuming_it() {
        let store = Arc::new(temp_store(&[1]));
        let chain = ChainId(1);
        let mut tx = observed_tx(chain, [6; 32], 3, br#"{"t":"batch"}"#);
        tx.set_last_time_tried(Some(SystemTime::now()));
        store.add_txs(&[], std::slice::from_ref(&tx)).unwrap();
        let builder = builder_with(
            store.clone(),
            &[3],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 10).await;

        assert!(!claims.any());
        assert!(update.is_empty());
        assert_eq!(
            store.get_unprocessed_txs(chain, PRIORITY_URGENT).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn index_failure_degrades_the_expected_source_only() {
        let store = Arc::new(temp_store(&[1]));
        seed_interleaved(&store);
        let chain = ChainId(1);
        let mut indexes: HashMap<ChainId, Arc<dyn ChainIndex>> = HashMap::new();
        indexes.insert(chain, Arc::new(FailingChainIndex));
        let builder = ClaimsBuilder::new(
            store.clone(),
            test_validators(),
            indexes,
            Arc::new(RecordingStateUpdater::default()),
            test_config(&[1]),
            OracleMetrics::new_for_testing(),
        );

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 10).await;

        // Observed claims still flow; the expected records wait for the
        // index to come back.
        assert_eq!(batch_ids(&claims), vec![3, 7]);
        assert_eq!(update.processed.len(), 2);
        assert!(update.expected_processed.is_empty());
        assert!(update.expected_invalid.is_empty());
        assert_eq!(
            store.get_expected_txs(chain, PRIORITY_URGENT).unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn ttl_near_max_never_expires_within_the_tick() {
        let store = Arc::new(temp_store(&[1]));
        let chain = ChainId(1);
        store
            .add_expected_txs(&[expected_tx(chain, [1; 32], u64::MAX)])
            .unwrap();
        store
            .add_txs(&[], &[observed_tx(chain, [2; 32], 3, br#"{"t":"batch"}"#)])
            .unwrap();
        let builder = builder_with(
            store.clone(),
            &[3],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let mut claims = ClaimBatch::new();
        let update = builder.run_checks(&mut claims, chain, PRIORITY_URGENT, 10).await;

        assert_eq!(batch_ids(&claims), vec![3]);
        assert!(update.expected_processed.is_empty());
        assert!(update.expected_invalid.is_empty());
        assert_eq!(
            store.get_expected_txs(chain, PRIORITY_URGENT).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn build_claims_runs_urgent_tier_first() {
        let store = Arc::new(temp_store(&[1]));
        let chain = ChainId(1);
        // The bridging request sits in an earlier block but the batch
        // execution is urgent, so it comes out first.
        store
            .add_txs(
                &[],
                &[
                    observed_tx(chain, [1; 32], 2, br#"{"t":"bridge"}"#),
                    observed_tx(chain, [2; 32], 3, br#"{"t":"batch"}"#),
                ],
            )
            .unwrap();
        let builder = builder_with(
            store,
            &[2, 3],
            Arc::new(RecordingStateUpdater::default()),
            test_validators(),
        );

        let (claims, update) = builder.build_claims(chain).await;
        let kinds: Vec<_> = claims.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["batch_executed", "bridging_request"]);
        assert_eq!(update.processed.len(), 2);
    }
}
