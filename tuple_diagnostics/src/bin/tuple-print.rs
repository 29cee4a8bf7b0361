//! Print the records of a RocksDB database whose keys and values are lexicographic tuples.

use std::io::{self, BufWriter};
use std::process::ExitCode;

use arrrg::CommandLine;
use kvscan::rocksdb::Database;
use tracing::info;

use tuple_diagnostics::cli::{init_logging, store_path, PrintOptions};
use tuple_diagnostics::{Error, RecordPrinter};

const USAGE: &str = "Usage: tuple-print [OPTIONS] <store path>";

fn run(options: &PrintOptions, path: &str) -> Result<(), Error> {
    let printer = RecordPrinter::new(
        &options.key_format,
        &options.value_format,
        &options.key_prefix,
    )?
    .with_policy(options.decode_policy());
    info!(path, "opening store read-only");
    let db = Database::open_read_only(path).map_err(|what| Error::Store { what })?;
    let stdout = io::stdout();
    let stats = printer.print(db.cursor(), BufWriter::new(stdout.lock()))?;
    info!(
        records = stats.records,
        skipped = stats.skipped,
        "printed store"
    );
    Ok(())
}

fn main() -> ExitCode {
    let (options, free) = PrintOptions::from_command_line_relaxed(USAGE);
    let path = match store_path(&free) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    init_logging(options.verbose);
    match run(&options, path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
