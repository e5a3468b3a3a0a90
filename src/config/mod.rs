//! Configuration management for idf-size-delta
//!
//! This module provides:
//! - .idf-size-delta.toml config file support
//! - Precedence of command-line values over file values over defaults

pub mod file;
pub mod loader;

pub use file::{CollectSettings, ConfigFile, ReportSettings, CONFIG_FILE_NAME, MAX_PRECISION};
pub use loader::ConfigLoader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_name_constant_is_correct() {
        assert_eq!(CONFIG_FILE_NAME, ".idf-size-delta.toml");
    }
}
