// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read interface onto a chain syncer's durable block index.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::types::BlockRef;

/// Confirmed-block lookups against a per-chain durable index, populated by
/// the chain syncer outside this crate.
#[async_trait]
pub trait ChainIndex: Send + Sync {
    /// Confirmed blocks with slot >= `from_slot`, ascending, at most `limit`.
    async fn get_confirmed_blocks_from(
        &self,
        from_slot: u64,
        limit: usize,
    ) -> OracleResult<Vec<BlockRef>>;
}

/// The earliest confirmed block at or after `from_slot`, if any is indexed.
pub async fn first_confirmed_block_from(
    index: &dyn ChainIndex,
    from_slot: u64,
) -> OracleResult<Option<BlockRef>> {
    let blocks = index.get_confirmed_blocks_from(from_slot, 1).await?;
    Ok(blocks.into_iter().next())
}
