mod iljeong_cli;

pub use iljeong_cli::IljeongCli;
