//! Configuration file loading for assessgen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./assessgen.toml` or `./.assessgen.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/assessgen/config.toml`
//! 4. Environment: `ASSESSGEN_*` (nested keys joined with `__`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAllocationConfig, FileApiConfig, FileConfig, FileGenerationConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
