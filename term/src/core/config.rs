// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configuration knobs for the terminal data plane.

use serde::{Deserialize, Serialize};

use crate::PageCapacity;

/// Default cap for OSC / DCS payload capture: 1 MiB.
pub const DEFAULT_MAX_BYTES: usize = 1024 * 1024;

/// Payload caps below this reject all non-trivial payloads; used only as
/// documentation of the floor, not enforced.
pub const MIN_USEFUL_MAX_BYTES: usize = 256;

/// Default scrollback history bound, in rows.
pub const DEFAULT_SCROLLBACK_ROWS: usize = 10_000;

/// Top-level configuration. Everything has a sensible default; construct
/// with struct update syntax off [`TermConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermConfig {
    /// Cap for OSC and DCS payload capture. Payloads past the cap are
    /// dropped and the affected command is discarded or marked incomplete.
    pub max_bytes: usize,
    /// Maximum number of history rows kept above the active area.
    pub scrollback_rows: usize,
    /// Capacity knobs for newly allocated pages.
    pub page: PageCapacity,
    /// Allow OSC fields that legitimately exceed the fixed working buffer
    /// (clipboard contents, kitty color lists) to grow on the heap. When
    /// off, such commands are capped and marked incomplete.
    pub large_osc_payloads: bool,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            scrollback_rows: DEFAULT_SCROLLBACK_ROWS,
            page: PageCapacity::default(),
            large_osc_payloads: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TermConfig::default();
        assert_eq!(config.max_bytes, 1024 * 1024);
        assert_eq!(config.scrollback_rows, 10_000);
        assert!(!config.large_osc_payloads);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = TermConfig {
            scrollback_rows: 500,
            large_osc_payloads: true,
            ..TermConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TermConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let back: TermConfig = serde_json::from_str(r#"{"max_bytes": 4096}"#).unwrap();
        assert_eq!(back.max_bytes, 4096);
        assert_eq!(back.scrollback_rows, 10_000);
    }
}
