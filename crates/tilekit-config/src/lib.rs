//! Configuration for the tilekit tools.
//!
//! Settings persist to disk as a RON file with every section optional.
//! Command-line flags parsed with clap override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, ClassifierConfig, Config, DebugConfig, MAX_GRID_CELLS, MAX_GRID_DIMENSION,
    OutputConfig, WorldConfig,
};
pub use error::ConfigError;
