mod cli;
mod logger;

use crate::cli::{Args, USAGE};
use crate::logger::initialize_logger;
use codegen::{build_shaders, Config};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    initialize_logger();
    let Some(args) = Args::parse() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let result = Config::load()
        .and_then(|config| build_shaders(&args.target, &args.out_dir, &args.inputs, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
