mod cli_modes;
mod common;
mod render;

pub use cli_modes::IljeongCli;
pub use common::{BaseCli, CliModeResult, init_logging};
pub use render::{ColorMode, RenderOptions, Renderer};
