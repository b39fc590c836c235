//! Transaction plumbing for compressed-asset mints.
//!
//! This crate carries the protocol-level pieces of the minting pipeline that
//! must match the ledger's wire behavior exactly:
//!
//! - **Wire-size estimation**: compute a draft transaction's serialized byte
//!   size locally, before submission, so oversized drafts can be split or
//!   pruned without a failed round trip (`tx_size`).
//! - **Change-log resolution**: recover the leaf index (and tree address)
//!   assigned to a freshly minted compressed asset from a confirmed
//!   transaction's inner-instruction log (`changelog`).
//! - **Durable-nonce assembly**: pre-build an unsigned transaction anchored
//!   to a durable nonce so it can be signed long before submission (`nonce`).
//! - **Confirmation polling**: bounded "submit now, confirm later" wait with
//!   linear backoff (`confirm`).
//!
//! Everything that talks to the network is reached through the capability
//! traits ([`confirm::TransactionLookup`], [`nonce::AccountReader`]); the
//! `rpc` module provides implementations over `solana-client` for callers
//! that want the default wiring.

// Compiler warning configuration
#![deny(unused_imports)]
#![deny(unused_mut)]
#![warn(dead_code)]
#![warn(unused_must_use)]

// Module declarations
pub mod changelog;
pub mod config;
pub mod confirm;
pub mod errors;
pub mod nonce;
pub mod rpc;
pub mod tx_size;
pub mod types;

// Re-export commonly used types
pub use changelog::{
    resolve_leaf_assignment, resolve_leaf_index, ChangeLogEvent, DecodeAttempt, EventDecoder,
};
pub use confirm::{ConfirmConfig, ConfirmationPoller, TransactionLookup};
pub use errors::{NonceError, NonceResult};
pub use nonce::{build_nonce_skeleton, AccountReader, NonceAccountState, NonceSkeleton};
pub use tx_size::{estimate_transaction_size, fits_packet};
pub use types::{TransactionRecord, MPL_BUBBLEGUM_ID, SPL_NOOP_ID};
