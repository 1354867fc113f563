//! Input loading and validation for the approval gate
//!
//! Action inputs are merged from several sources. The priority order
//! (highest to lowest):
//!
//! 1. `INPUT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./approval.toml`
//! 4. Default values
//!
//! The run context (`GITHUB_RUN_ID`, `GITHUB_REPOSITORY`, ...) always comes
//! from the environment.

mod file_config;
mod loader;
mod run_context;
mod settings;

pub use file_config::FileConfig;
pub use loader::{ConfigLoader, PROJECT_CONFIG_FILE};
pub use run_context::RunContext;
pub use settings::{DEFAULT_API_URL, DEFAULT_SERVER_URL, GateSettings};
