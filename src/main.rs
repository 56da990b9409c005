use std::process::ExitCode;

use clap::Parser;
use log::error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = skysf_cli::Args::parse();
    match skysf_cli::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
