use anyhow::Result;
use iljeong_cli::{BaseCli, IljeongCli, init_logging};
use iljeong_core::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("iljeong: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    init_logging();
    let cli = BaseCli::new();
    let config = Config::load()?;
    let iljeong_cli = IljeongCli::new(cli, config);
    iljeong_cli.run()
}
