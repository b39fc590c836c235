//! Toolkit configuration
//!
//! Deserializable sections for the tunable pieces: which programs the
//! resolver scans for, and how the confirmation poller paces itself. The
//! surrounding application owns file loading; this crate only defines the
//! shapes and their defaults.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::confirm::ConfirmConfig;
use crate::types::{MPL_BUBBLEGUM_ID, SPL_NOOP_ID};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Resolver configuration
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Confirmation poller configuration
    #[serde(default)]
    pub confirm: ConfirmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Tree-mutating program whose invocation emits the event
    #[serde(default = "default_tree_program")]
    pub tree_program: Pubkey,

    /// Wrapper program whose invocations carry the event payloads
    #[serde(default = "default_event_log_program")]
    pub event_log_program: Pubkey,
}

fn default_tree_program() -> Pubkey {
    MPL_BUBBLEGUM_ID
}

fn default_event_log_program() -> Pubkey {
    SPL_NOOP_ID
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tree_program: default_tree_program(),
            event_log_program: default_event_log_program(),
        }
    }
}

impl ToolkitConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.confirm.max_attempts == 0 {
            return Err("confirm.max_attempts must be at least 1".to_string());
        }
        if self.resolver.tree_program == self.resolver.event_log_program {
            return Err("resolver.tree_program and resolver.event_log_program must differ".to_string());
        }
        Ok(())
    }
}
