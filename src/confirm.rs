//! Bounded confirmation polling
//!
//! Submission is fire-and-forget; inclusion is only observable by asking the
//! node for the transaction until it shows up. The poller converts that into
//! a bounded synchronous wait: a fixed attempt budget with linear backoff
//! between lookups. Exhausting the budget is a normal outcome (the
//! transaction may simply not be visible yet) and reports as `None`, never
//! as an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use tracing::debug;

use crate::types::TransactionRecord;

/// Transaction lookup capability.
///
/// `None` covers every way a record can be unavailable: not yet processed,
/// not at the requested commitment, or the lookup channel itself hiccuped.
/// The poller treats all of these the same and retries.
#[async_trait]
pub trait TransactionLookup: Send + Sync {
    async fn lookup_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Option<TransactionRecord>;
}

/// Polling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmConfig {
    /// Maximum lookup attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit; attempt `i` sleeps `i * base_delay_ms` after a miss
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Commitment level requested from the lookup
    #[serde(default = "default_commitment")]
    pub commitment: CommitmentConfig,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_commitment() -> CommitmentConfig {
    CommitmentConfig::confirmed()
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            commitment: default_commitment(),
        }
    }
}

/// Bounded-retry confirmation poller.
///
/// Holds no state across calls; concurrent `confirm` calls are independent.
/// The backoff sleep is the only suspension point and runs on tokio's clock,
/// so tests drive it deterministically with `start_paused`.
pub struct ConfirmationPoller<L> {
    lookup: L,
    config: ConfirmConfig,
}

impl<L: TransactionLookup> ConfirmationPoller<L> {
    pub fn new(lookup: L, config: ConfirmConfig) -> Self {
        Self { lookup, config }
    }

    /// Wait for the transaction to become visible, up to the attempt budget.
    ///
    /// Returns the record as soon as a lookup produces one; `None` after the
    /// budget is exhausted.
    pub async fn confirm(&self, signature: &Signature) -> Option<TransactionRecord> {
        for attempt in 0..self.config.max_attempts {
            if let Some(record) = self
                .lookup
                .lookup_transaction(signature, self.config.commitment)
                .await
            {
                debug!(
                    signature = %signature,
                    attempt = attempt,
                    "transaction confirmed"
                );
                return Some(record);
            }

            tokio::time::sleep(Duration::from_millis(
                u64::from(attempt) * self.config.base_delay_ms,
            ))
            .await;
        }

        debug!(
            signature = %signature,
            attempts = self.config.max_attempts,
            "confirmation attempts exhausted"
        );
        None
    }
}
