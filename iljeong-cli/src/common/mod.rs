mod base_cli;
mod cli_mode;
mod editor_utils;
mod logging;

pub use base_cli::BaseCli;
pub use cli_mode::CliModeResult;
pub use editor_utils::{create_editor_buffer, resolve_editor};
pub use logging::init_logging;
