//! Library half of the `donchian` binary: configuration, CSV loading and
//! output writing. Kept separate from `main.rs` so integration tests can
//! drive it directly.

pub mod config;
pub mod loader;
pub mod output;

pub use config::{AppConfig, ConfigError, OutputFormat};
pub use loader::{check_bars, drop_void_bars, load_bars, DataReport, LoadError};
pub use output::{run_channel, write_rows, ChannelRow, OutputError};
