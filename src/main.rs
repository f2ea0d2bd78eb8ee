use std::process::ExitCode;

use bmpfilter::cli::{self, CliError};
use log::{error, LevelFilter};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG takes precedence over -v
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn main() -> ExitCode {
    let result = cli::parse_args(std::env::args_os()).and_then(|invocation| {
        init_logging(invocation.verbose);
        cli::run(&invocation)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Info(info)) => {
            let _ = info.print();
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:?}");
            println!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
