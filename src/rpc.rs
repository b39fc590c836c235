//! RPC-backed implementations of the capability traits
//!
//! Default wiring for callers that talk to a real node. The protocol logic
//! never touches these; tests fake the traits directly.
//!
//! Lookup errors are deliberately absorbed: the poller retries on `None`
//! whatever the cause, so a transient RPC failure just consumes an attempt
//! instead of aborting the wait. Account reads, by contrast, surface
//! transport failures: a nonce assembly that cannot read its account has no
//! sensible retry semantics at this layer.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::CompiledInstruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, InnerInstruction, InnerInstructions, UiInnerInstructions,
    UiInstruction, UiTransactionEncoding,
};
use tracing::{debug, warn};

use crate::confirm::TransactionLookup;
use crate::errors::{NonceError, NonceResult};
use crate::nonce::AccountReader;
use crate::types::TransactionRecord;

/// Transaction lookup over a nonblocking RPC client.
pub struct RpcTransactionLookup {
    client: Arc<RpcClient>,
}

impl RpcTransactionLookup {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionLookup for RpcTransactionLookup {
    async fn lookup_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Option<TransactionRecord> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(commitment),
            max_supported_transaction_version: Some(0),
        };

        match self.client.get_transaction_with_config(signature, config).await {
            Ok(fetched) => decode_record(fetched),
            Err(err) => {
                // Covers both "not yet visible" and transient transport
                // failures; the poller retries either way.
                debug!(signature = %signature, error = %err, "transaction lookup missed");
                None
            }
        }
    }
}

/// Convert a fetched, base64-encoded record into the decoded view the
/// resolvers operate on. Returns `None` when the node hands back a shape
/// that cannot be decoded.
fn decode_record(fetched: EncodedConfirmedTransactionWithStatusMeta) -> Option<TransactionRecord> {
    let tx = match fetched.transaction.transaction.decode() {
        Some(tx) => tx,
        None => {
            warn!("fetched transaction payload did not decode");
            return None;
        }
    };

    let mut account_keys: Vec<Pubkey> = tx.message.static_account_keys().to_vec();
    let instructions = tx.message.instructions().to_vec();
    let mut inner_instructions = Vec::new();

    if let Some(meta) = fetched.transaction.meta {
        // Addresses resolved through lookup tables extend the static table,
        // writable first; compiled indices count into the combined list.
        if let OptionSerializer::Some(loaded) = &meta.loaded_addresses {
            for address in loaded.writable.iter().chain(loaded.readonly.iter()) {
                match Pubkey::from_str(address) {
                    Ok(key) => account_keys.push(key),
                    Err(err) => {
                        warn!(address = %address, error = %err, "unparseable loaded address");
                        return None;
                    }
                }
            }
        }

        if let OptionSerializer::Some(groups) = meta.inner_instructions {
            inner_instructions = convert_inner_groups(groups);
        }
    }

    Some(TransactionRecord {
        account_keys,
        instructions,
        inner_instructions,
    })
}

/// Lower the UI inner-instruction groups to compiled form. Entries that are
/// not in compiled form, or whose payload fails base58 decoding, are dropped
/// with a log line; the resolvers tolerate gaps.
fn convert_inner_groups(groups: Vec<UiInnerInstructions>) -> Vec<InnerInstructions> {
    groups
        .into_iter()
        .map(|group| {
            let instructions = group
                .instructions
                .into_iter()
                .filter_map(|entry| match entry {
                    UiInstruction::Compiled(ui) => match bs58::decode(&ui.data).into_vec() {
                        Ok(data) => Some(InnerInstruction {
                            instruction: CompiledInstruction {
                                program_id_index: ui.program_id_index,
                                accounts: ui.accounts,
                                data,
                            },
                            stack_height: ui.stack_height,
                        }),
                        Err(err) => {
                            warn!(error = %err, "inner instruction payload is not base58");
                            None
                        }
                    },
                    UiInstruction::Parsed(_) => None,
                })
                .collect();

            InnerInstructions {
                index: group.index,
                instructions,
            }
        })
        .collect()
}

/// Account reads over a nonblocking RPC client.
pub struct RpcAccountReader {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl RpcAccountReader {
    pub fn new(client: Arc<RpcClient>, commitment: CommitmentConfig) -> Self {
        Self { client, commitment }
    }
}

#[async_trait]
impl AccountReader for RpcAccountReader {
    async fn account_data(&self, address: &Pubkey) -> NonceResult<Option<Vec<u8>>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|err| NonceError::AccountRead {
                address: *address,
                message: err.to_string(),
            })?;

        Ok(response.value.map(|account| account.data))
    }
}
