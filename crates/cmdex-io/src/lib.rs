//! Host-side collaborators for the cmdex line editor.
//!
//! - [`ProcessWorkingDirectory`]: the real working directory via `std::env`
//! - [`history_file`]: command history persistence
//! - [`config`]: YAML configuration loading
//! - [`mock`]: an in-memory console grid, key queue and working directory
//!   for tests and embedders

pub mod config;
pub mod history_file;
pub mod mock;
pub mod working_dir;

pub use config::{load_config, parse_config, ConfigError};
pub use history_file::{
    load_history, read_history_file, save_history, save_history_with_config, write_history_file,
};
pub use mock::{MockConsole, MockKeyInput, MockWorkingDirectory};
pub use working_dir::ProcessWorkingDirectory;
