//! Serialized transaction size accounting
//!
//! The ledger enforces a hard packet ceiling on serialized transactions, and
//! an oversized submission only fails after a full round trip. These
//! functions reproduce the wire format's compact-array accounting exactly,
//! including the non-linear header-size jumps at 128 and 16384 elements, so
//! a draft can be measured locally and split or pruned before it is sent.
//!
//! Pure functions, no I/O. Inputs are assumed well formed (the fee payer is
//! always part of the signer and account sets by construction).

use std::collections::HashSet;

use solana_sdk::instruction::Instruction;
use solana_sdk::packet::PACKET_DATA_SIZE;
use solana_sdk::pubkey::Pubkey;

/// Signature slot width in the serialized form
const SIGNATURE_LEN: usize = 64;

/// Account address width in the serialized form
const ADDRESS_LEN: usize = 32;

/// Fixed-size message header: signer count, readonly-signer count,
/// readonly-unsigned count
const MESSAGE_HEADER_LEN: usize = 3;

/// Recent-blockhash (or durable-nonce value) field width
const BLOCKHASH_LEN: usize = 32;

/// Byte length of the compact-u16 count prefix for `n` elements.
///
/// The wire format stores counts 7 bits per byte with a continuation bit on
/// all but the last byte: 1 byte up to 127, 2 bytes up to 16383, 3 otherwise.
pub fn compact_header_len(n: usize) -> usize {
    if n <= 127 {
        1
    } else if n <= 16383 {
        2
    } else {
        3
    }
}

/// Serialized length of a compact array: count prefix plus `n` fixed-size
/// elements.
pub fn compact_array_len(n: usize, element_len: usize) -> usize {
    compact_header_len(n) + n * element_len
}

/// Exact serialized byte size of a draft transaction.
///
/// Walks the instruction list once, collecting the deduplicated signer and
/// account sets (both seeded with the fee payer; program ids count as
/// accounts), then sums the fixed and compact-encoded sections of the wire
/// form. Account order within each instruction is irrelevant to the size
/// (each reference serializes as a single index byte), but duplicates across
/// instructions collapse into one address-table entry, which is why the sets
/// are deduplicated.
pub fn estimate_transaction_size(instructions: &[Instruction], fee_payer: &Pubkey) -> usize {
    let mut signers: HashSet<Pubkey> = HashSet::new();
    let mut accounts: HashSet<Pubkey> = HashSet::new();

    signers.insert(*fee_payer);
    accounts.insert(*fee_payer);

    for ix in instructions {
        accounts.insert(ix.program_id);
        for meta in &ix.accounts {
            accounts.insert(meta.pubkey);
            if meta.is_signer {
                signers.insert(meta.pubkey);
            }
        }
    }

    let instruction_bytes: usize = instructions
        .iter()
        .map(|ix| {
            // program index byte + account-index array + opaque payload
            1 + compact_array_len(ix.accounts.len(), 1) + compact_array_len(ix.data.len(), 1)
        })
        .sum();

    compact_array_len(signers.len(), SIGNATURE_LEN)
        + MESSAGE_HEADER_LEN
        + compact_array_len(accounts.len(), ADDRESS_LEN)
        + BLOCKHASH_LEN
        + compact_header_len(instructions.len())
        + instruction_bytes
}

/// Whether a draft fits under the protocol's packet ceiling (1232 bytes).
pub fn fits_packet(instructions: &[Instruction], fee_payer: &Pubkey) -> bool {
    estimate_transaction_size(instructions, fee_payer) <= PACKET_DATA_SIZE
}
