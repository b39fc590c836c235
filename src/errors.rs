//! Error types for nonce assembly
//!
//! Only caller precondition violations live here. Conditions that are
//! expected in normal operation, like a change-log entry that fails to
//! decode or a transaction not yet visible to the lookup, are absence values
//! (`None`), not errors.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Nonce assembly errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NonceError {
    /// Nonce account does not exist on the ledger
    #[error("nonce account {address} does not exist")]
    AccountMissing { address: Pubkey },

    /// Account exists but its data is not a usable nonce state
    #[error("invalid nonce account state: {0}")]
    InvalidState(String),

    /// Account fetch failed at the transport layer
    #[error("account read failed for {address}: {message}")]
    AccountRead { address: Pubkey, message: String },

    /// Instruction ordering violated the advance-nonce-first contract
    #[error("instruction ordering error: {0}")]
    InstructionOrder(String),
}

pub type NonceResult<T> = Result<T, NonceError>;
