//! Durable-nonce transaction assembly
//!
//! A recent-blockhash reference expires within a couple of minutes of ledger
//! time, which rules it out when signing is gated on an out-of-band event
//! (waiting for a counterparty signature, for instance). A durable nonce has
//! no expiry until consumed: the transaction anchors to the nonce account's
//! stored value instead of a blockhash and must carry an advance-nonce
//! instruction in first position, which consumes the value on inclusion.
//!
//! The snapshot read here is best-effort by design. Nothing refreshes or
//! locks it; if a racing transaction advances the nonce between fetch and
//! submission, the eventual submission fails at the ledger level and the
//! surrounding orchestration decides whether to rebuild.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::nonce::state::{State, Versions};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;
use tracing::debug;

use crate::errors::{NonceError, NonceResult};

/// Read access to raw account state.
///
/// Implemented by the surrounding system (see [`crate::rpc`] for the default
/// RPC-backed implementation); faked directly in tests. `Ok(None)` means the
/// account does not exist, which callers treat as a fatal precondition
/// violation rather than a recoverable miss.
#[async_trait]
pub trait AccountReader: Send + Sync {
    async fn account_data(&self, address: &Pubkey) -> NonceResult<Option<Vec<u8>>>;
}

/// Decoded snapshot of a nonce account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceAccountState {
    /// Authority allowed to advance (and close) the nonce
    pub authority: Pubkey,

    /// Current nonce value; substitutes for a recent blockhash
    pub value: Hash,
}

/// Unsigned transaction skeleton anchored to a durable nonce.
///
/// The instruction list starts with the advance-nonce instruction; callers
/// append their own instructions and compile when the fee payer is known.
/// Compilation is deferred so the account table is laid out once, over the
/// final instruction set.
#[derive(Debug, Clone)]
pub struct NonceSkeleton {
    instructions: Vec<Instruction>,
    state: NonceAccountState,
}

impl NonceSkeleton {
    /// Append an instruction after the advance-nonce instruction.
    pub fn append(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// The planned instruction list, advance-nonce first.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// The nonce snapshot the skeleton is anchored to.
    pub fn nonce_state(&self) -> &NonceAccountState {
        &self.state
    }

    /// Compile into an unsigned transaction whose recent-blockhash field
    /// carries the nonce value.
    pub fn compile(&self, fee_payer: &Pubkey) -> Transaction {
        let mut message = Message::new(&self.instructions, Some(fee_payer));
        message.recent_blockhash = self.state.value;
        Transaction::new_unsigned(message)
    }
}

/// Decode a nonce account's state blob.
///
/// The account stores a versioned enum; anything other than an initialized
/// current-version state is unusable for assembly.
pub fn decode_nonce_state(data: &[u8]) -> NonceResult<NonceAccountState> {
    let versions: Versions =
        bincode::deserialize(data).map_err(|err| NonceError::InvalidState(err.to_string()))?;

    match versions.state() {
        State::Initialized(data) => Ok(NonceAccountState {
            authority: data.authority,
            value: data.blockhash(),
        }),
        State::Uninitialized => Err(NonceError::InvalidState(
            "nonce account is uninitialized".to_string(),
        )),
    }
}

/// Fetch and decode a nonce account, returning a skeleton pre-populated with
/// the advance-nonce instruction authorized by `authority`.
///
/// A missing account is a fatal precondition error; there is deliberately no
/// fallback to blockhash mode, since the caller asked for indefinite
/// validity and a silent downgrade would hand back a transaction that
/// expires in minutes.
pub async fn build_nonce_skeleton<R: AccountReader + ?Sized>(
    reader: &R,
    nonce_account: &Pubkey,
    authority: &Pubkey,
) -> NonceResult<NonceSkeleton> {
    let data = reader
        .account_data(nonce_account)
        .await?
        .ok_or(NonceError::AccountMissing {
            address: *nonce_account,
        })?;

    let state = decode_nonce_state(&data)?;

    debug!(
        nonce_account = %nonce_account,
        authority = %authority,
        nonce_value = %state.value,
        "nonce skeleton assembled"
    );

    // TODO(migrate-system-instruction): temporary allow, solana-system-interface
    // lands with the next SDK bump
    #[allow(deprecated)]
    let advance = solana_sdk::system_instruction::advance_nonce_account(nonce_account, authority);

    Ok(NonceSkeleton {
        instructions: vec![advance],
        state,
    })
}

/// Sanity check: advance-nonce must be the first instruction and appear
/// exactly once.
///
/// The advance-nonce instruction is a system-program call with discriminator
/// 4; probing the discriminator avoids decoding the full instruction.
pub fn check_advance_first(instructions: &[Instruction]) -> NonceResult<()> {
    let is_advance = |ix: &Instruction| {
        ix.program_id == system_program::id() && ix.data.len() >= 4 && ix.data[0..4] == [4, 0, 0, 0]
    };

    match instructions.first() {
        Some(first) if is_advance(first) => {}
        _ => {
            return Err(NonceError::InstructionOrder(
                "first instruction must advance the nonce".to_string(),
            ))
        }
    }

    if let Some(position) = instructions[1..].iter().position(is_advance) {
        return Err(NonceError::InstructionOrder(format!(
            "advance-nonce instruction repeated at position {}",
            position + 1
        )));
    }

    Ok(())
}
