//! Change-log event type and the decoder seam

use solana_sdk::pubkey::Pubkey;

/// A change-log record emitted by a tree-mutating invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeLogEvent {
    /// Address of the tree the leaf was written to
    pub tree_address: Pubkey,

    /// Index of the leaf just written
    pub leaf_index: u32,

    /// Monotonic per-tree sequence number
    pub sequence: u64,
}

/// Outcome of attempting to decode one log entry.
///
/// `NotThisFormat` is not an error: the inner-instruction stream routinely
/// carries payloads from other programs or other encodings, and the scan
/// simply moves on. Modeling the miss as a tagged value keeps decode failure
/// out of the error channel entirely.
#[derive(Debug, Clone)]
pub enum DecodeAttempt {
    /// The entry decoded as a change-log event
    Decoded(ChangeLogEvent),

    /// The entry is something else; skip it and keep scanning
    NotThisFormat,
}

/// Decoder for the event byte layout.
///
/// The layout itself is owned by the external tree program; this crate only
/// relies on the success/failure contract. Implementations wrap whatever
/// deserializer matches the program version in use.
pub trait EventDecoder {
    fn decode(&self, data: &[u8]) -> DecodeAttempt;
}

impl<F> EventDecoder for F
where
    F: Fn(&[u8]) -> DecodeAttempt,
{
    fn decode(&self, data: &[u8]) -> DecodeAttempt {
        self(data)
    }
}
