use std::process::ExitCode;

use clap::Parser;

use polyomino_tiler::cli;

fn main() -> ExitCode {
    env_logger::init();

    let args = cli::Args::parse();
    match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
