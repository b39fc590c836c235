//! Common types shared across the crate

use solana_sdk::instruction::CompiledInstruction;
use solana_sdk::pubkey::Pubkey;
use solana_transaction_status::InnerInstructions;

/// Program that mutates the asset tree and emits change-log events
pub const MPL_BUBBLEGUM_ID: Pubkey =
    solana_sdk::pubkey!("BGUMAp9Gq7iTEuizy4pqaxsTyUCBK68MDfK752saRPUY");

/// No-op wrapper program whose invocations carry the change-log payloads
pub const SPL_NOOP_ID: Pubkey =
    solana_sdk::pubkey!("noopb9bkMVfRPU8AsbpTUg8AQkHtKwMYZiFUjNRtMmV");

/// Decoded view of a confirmed transaction.
///
/// This is the shape the resolver and poller operate on: the flat account
/// table, the top-level compiled instructions, and the inner-instruction
/// groups from the execution metadata. Each group carries the index of the
/// top-level instruction it belongs to; groups are only present for
/// top-level instructions that actually invoked something.
#[derive(Debug, Clone, Default)]
pub struct TransactionRecord {
    /// Flat account table the compiled instructions index into
    pub account_keys: Vec<Pubkey>,

    /// Top-level instructions, in execution order
    pub instructions: Vec<CompiledInstruction>,

    /// Inner-instruction groups keyed by top-level instruction index
    pub inner_instructions: Vec<InnerInstructions>,
}

impl TransactionRecord {
    /// Resolve a compiled instruction's program-id index against the account
    /// table. Out-of-range indices resolve to `None` rather than panicking;
    /// records fetched over RPC are not trusted to be well formed.
    pub fn program_id_at(&self, program_id_index: u8) -> Option<&Pubkey> {
        self.account_keys.get(program_id_index as usize)
    }
}
