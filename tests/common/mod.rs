//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Size report and record fixtures
//! - Fake ESP-IDF build directories
//! - The binary under test

pub mod fixtures;

use assert_cmd::Command;

/// Helper to get the idf-size-delta binary command
///
/// `NO_EMOJI` and `RUST_LOG` are cleared so output is stable across hosts.
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_idf-size-delta"));
    cmd.env_remove("NO_EMOJI").env_remove("RUST_LOG");
    cmd
}
