//! Change-log event resolution
//!
//! When a tree-mutating program appends a leaf, it emits a change-log event
//! by invoking the no-op wrapper program with the event bytes as instruction
//! data. The leaf index assigned to a freshly minted asset is therefore only
//! discoverable after the fact, by scanning the confirmed transaction's
//! inner-instruction log and decoding the wrapped payloads.
//!
//! The log stream is noisy: entries from unrelated invocations and payloads
//! in foreign encodings sit next to the event of interest, so decode failure
//! is an expected condition and never aborts a scan.

mod event;
mod resolver;

pub use event::{ChangeLogEvent, DecodeAttempt, EventDecoder};
pub use resolver::{resolve_leaf_assignment, resolve_leaf_index};
