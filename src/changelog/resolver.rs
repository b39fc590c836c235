//! Reverse log-scan resolvers
//!
//! Both resolvers walk the inner-instruction log backwards and attempt to
//! decode every candidate entry, never short-circuiting on success: the
//! accumulator fills on the first decodable entry encountered during the
//! reverse walk (the last valid event in stream order) and later decode
//! attempts cannot displace it. A malformed entry at any position,
//! including one trailing the valid entry, therefore never masks the result.
//!
//! Iteration order (reverse, group-then-instruction) is a contract, not an
//! implementation detail; the tests pin it.

use solana_sdk::pubkey::Pubkey;
use tracing::trace;

use super::event::{ChangeLogEvent, DecodeAttempt, EventDecoder};
use crate::types::TransactionRecord;

/// Scoped resolution: recover the leaf index assigned by one known
/// invocation.
///
/// Locates the top-level instruction invoking `target_program`, takes the
/// inner-instruction group associated with it, filters that group to entries
/// invoking `event_log_program`, and reverse-scans the filtered list.
/// Returns `None` when the target instruction is absent, has no inner group,
/// or no entry decodes.
pub fn resolve_leaf_index<D: EventDecoder>(
    record: &TransactionRecord,
    target_program: &Pubkey,
    event_log_program: &Pubkey,
    decoder: &D,
) -> Option<u32> {
    let target_index = record
        .instructions
        .iter()
        .position(|ix| record.program_id_at(ix.program_id_index) == Some(target_program))?;

    let group = record
        .inner_instructions
        .iter()
        .find(|group| group.index as usize == target_index)?;

    let event = group
        .instructions
        .iter()
        .filter(|inner| {
            record.program_id_at(inner.instruction.program_id_index) == Some(event_log_program)
        })
        .rev()
        .fold(None, |retained: Option<ChangeLogEvent>, inner| {
            match decoder.decode(&inner.instruction.data) {
                DecodeAttempt::Decoded(event) => retained.or(Some(event)),
                DecodeAttempt::NotThisFormat => {
                    trace!(top_level_index = target_index, "log entry is not a change-log event");
                    retained
                }
            }
        })?;

    Some(event.leaf_index)
}

/// Unscoped resolution: recover the latest leaf assignment anywhere in the
/// transaction.
///
/// Walks every inner-instruction group from last to first, and each group's
/// instructions from last to first, attempting decode on every entry that
/// invokes `event_log_program`. Returns the leaf index and tree address
/// drawn from the retained event, both `None` when nothing decodes.
pub fn resolve_leaf_assignment<D: EventDecoder>(
    record: &TransactionRecord,
    event_log_program: &Pubkey,
    decoder: &D,
) -> (Option<u32>, Option<Pubkey>) {
    let retained = record
        .inner_instructions
        .iter()
        .rev()
        .flat_map(|group| group.instructions.iter().rev())
        .filter(|inner| {
            record.program_id_at(inner.instruction.program_id_index) == Some(event_log_program)
        })
        .fold(None, |retained: Option<ChangeLogEvent>, inner| {
            match decoder.decode(&inner.instruction.data) {
                DecodeAttempt::Decoded(event) => retained.or(Some(event)),
                DecodeAttempt::NotThisFormat => retained,
            }
        });

    match retained {
        Some(event) => (Some(event.leaf_index), Some(event.tree_address)),
        None => (None, None),
    }
}
