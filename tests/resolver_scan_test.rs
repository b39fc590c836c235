//! End-to-end resolver tests over realistic mint-transaction records

use cnft_txkit::{
    resolve_leaf_assignment, resolve_leaf_index, ChangeLogEvent, DecodeAttempt, TransactionRecord,
    MPL_BUBBLEGUM_ID, SPL_NOOP_ID,
};
use solana_sdk::instruction::CompiledInstruction;
use solana_sdk::pubkey::Pubkey;
use solana_transaction_status::{InnerInstruction, InnerInstructions};

/// Minimal stand-in for the external event layout: a fixed magic byte, the
/// tree address, then the leaf index and sequence, little endian.
fn decoder(data: &[u8]) -> DecodeAttempt {
    if data.len() != 1 + 32 + 4 + 8 || data[0] != 0xE1 {
        return DecodeAttempt::NotThisFormat;
    }
    let tree_address = Pubkey::try_from(&data[1..33]).unwrap();
    let leaf_index = u32::from_le_bytes(data[33..37].try_into().unwrap());
    let sequence = u64::from_le_bytes(data[37..45].try_into().unwrap());
    DecodeAttempt::Decoded(ChangeLogEvent {
        tree_address,
        leaf_index,
        sequence,
    })
}

fn event_bytes(tree: &Pubkey, leaf_index: u32) -> Vec<u8> {
    let mut data = vec![0xE1];
    data.extend_from_slice(tree.as_ref());
    data.extend_from_slice(&leaf_index.to_le_bytes());
    data.extend_from_slice(&(leaf_index as u64).to_le_bytes());
    data
}

fn noop_entry(record: &TransactionRecord, data: Vec<u8>) -> InnerInstruction {
    let noop_index = record
        .account_keys
        .iter()
        .position(|key| *key == SPL_NOOP_ID)
        .unwrap() as u8;
    InnerInstruction {
        instruction: CompiledInstruction {
            program_id_index: noop_index,
            accounts: vec![],
            data,
        },
        stack_height: Some(2),
    }
}

/// A record shaped like a real mint: a payer-funded setup instruction first,
/// then the tree-program invocation whose inner group carries the wrapped
/// change-log event among other sub-invocations.
fn mint_record(tree: &Pubkey, leaf_index: u32) -> TransactionRecord {
    let mut record = TransactionRecord {
        account_keys: vec![
            Pubkey::new_unique(), // payer
            Pubkey::new_unique(), // setup program
            MPL_BUBBLEGUM_ID,
            SPL_NOOP_ID,
            *tree,
        ],
        instructions: vec![
            CompiledInstruction {
                program_id_index: 1,
                accounts: vec![0],
                data: vec![0; 8],
            },
            CompiledInstruction {
                program_id_index: 2,
                accounts: vec![0, 4],
                data: vec![1; 16],
            },
        ],
        inner_instructions: vec![],
    };

    let group = InnerInstructions {
        index: 1,
        instructions: vec![
            // Unrelated sub-invocation of another program
            InnerInstruction {
                instruction: CompiledInstruction {
                    program_id_index: 1,
                    accounts: vec![0],
                    data: vec![9; 12],
                },
                stack_height: Some(2),
            },
            noop_entry(&record, event_bytes(tree, leaf_index)),
            // Foreign-format noop payload trailing the event
            noop_entry(&record, b"unrelated noop payload".to_vec()),
        ],
    };
    record.inner_instructions.push(group);
    record
}

#[test]
fn scoped_resolution_recovers_leaf_index() {
    let tree = Pubkey::new_unique();
    let record = mint_record(&tree, 42);

    let leaf_index = resolve_leaf_index(&record, &MPL_BUBBLEGUM_ID, &SPL_NOOP_ID, &decoder);

    assert_eq!(leaf_index, Some(42));
}

#[test]
fn unscoped_resolution_recovers_index_and_tree() {
    let tree = Pubkey::new_unique();
    let record = mint_record(&tree, 7);

    let (leaf_index, tree_address) = resolve_leaf_assignment(&record, &SPL_NOOP_ID, &decoder);

    assert_eq!(leaf_index, Some(7));
    assert_eq!(tree_address, Some(tree));
}

#[test]
fn latest_event_wins_wherever_the_malformed_entry_sits() {
    let tree = Pubkey::new_unique();

    for malformed_at in 0..3 {
        let mut record = mint_record(&tree, 0);
        let mut entries = vec![
            noop_entry(&record, event_bytes(&tree, 5)),
            noop_entry(&record, event_bytes(&tree, 9)),
        ];
        entries.insert(malformed_at, noop_entry(&record, b"malformed".to_vec()));
        record.inner_instructions = vec![InnerInstructions {
            index: 1,
            instructions: entries,
        }];

        let (leaf_index, _) = resolve_leaf_assignment(&record, &SPL_NOOP_ID, &decoder);
        assert_eq!(leaf_index, Some(9), "malformed entry at {malformed_at}");

        let scoped = resolve_leaf_index(&record, &MPL_BUBBLEGUM_ID, &SPL_NOOP_ID, &decoder);
        assert_eq!(scoped, Some(9), "malformed entry at {malformed_at}");
    }
}

#[test]
fn no_matching_entries_resolves_to_absence() {
    let tree = Pubkey::new_unique();
    let mut record = mint_record(&tree, 3);
    record.inner_instructions = vec![];

    assert_eq!(
        resolve_leaf_index(&record, &MPL_BUBBLEGUM_ID, &SPL_NOOP_ID, &decoder),
        None
    );
    assert_eq!(
        resolve_leaf_assignment(&record, &SPL_NOOP_ID, &decoder),
        (None, None)
    );
}

#[test]
fn unscoped_sees_events_outside_the_target_instruction() {
    // Drop the tree-program top-level instruction entirely; the scoped
    // variant has nothing to anchor on, the unscoped variant still finds the
    // event in the remaining group.
    let tree = Pubkey::new_unique();
    let mut record = mint_record(&tree, 11);
    record.instructions.truncate(1);
    record.inner_instructions[0].index = 0;

    assert_eq!(
        resolve_leaf_index(&record, &MPL_BUBBLEGUM_ID, &SPL_NOOP_ID, &decoder),
        None
    );
    assert_eq!(
        resolve_leaf_assignment(&record, &SPL_NOOP_ID, &decoder),
        (Some(11), Some(tree))
    );
}
