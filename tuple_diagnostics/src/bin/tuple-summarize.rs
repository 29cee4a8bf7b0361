//! Count the records and bytes of a RocksDB database.

use std::process::ExitCode;

use arrrg::CommandLine;
use kvscan::rocksdb::Database;
use tracing::info;

use tuple_diagnostics::cli::{init_logging, store_path, SummarizeOptions};
use tuple_diagnostics::{summarize, Error};

const USAGE: &str = "Usage: tuple-summarize [OPTIONS] <store path>";

fn run(path: &str) -> Result<(), Error> {
    info!(path, "opening store read-only");
    let db = Database::open_read_only(path).map_err(|what| Error::Store { what })?;
    let summary = summarize(db.cursor())?;
    println!("{}", summary);
    Ok(())
}

fn main() -> ExitCode {
    let (options, free) = SummarizeOptions::from_command_line_relaxed(USAGE);
    let path = match store_path(&free) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    init_logging(options.verbose);
    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
