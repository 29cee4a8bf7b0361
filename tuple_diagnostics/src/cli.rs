//! Command-line options shared by the binaries.

use arrrg_derive::CommandLine;
use tracing_subscriber::EnvFilter;

use super::{DecodePolicy, Error};

/// Require exactly one free argument, the path of the store.
pub fn store_path(free: &[String]) -> Result<&str, Error> {
    match free {
        [path] => Ok(path.as_str()),
        [] => Err(Error::CommandLine {
            what: "missing store path".to_string(),
        }),
        _ => Err(Error::CommandLine {
            what: format!("expected one store path, got {}", free.len()),
        }),
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set and otherwise at `warn`, or `info` if verbose.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

/////////////////////////////////////////// PrintOptions ///////////////////////////////////////////

/// Options for `tuple-print`.
#[derive(CommandLine, Clone, Debug, Default, Eq, PartialEq)]
pub struct PrintOptions {
    #[arrrg(optional, "Decode keys with this comma-separated list of field types.", "FORMAT")]
    pub key_format: String,
    #[arrrg(optional, "Decode values with this comma-separated list of field types.", "FORMAT")]
    pub value_format: String,
    #[arrrg(optional, "Print only keys that start with these comma-separated values.", "VALUES")]
    pub key_prefix: String,
    #[arrrg(flag, "Warn about records that do not decode instead of stopping.")]
    pub skip_corrupt: bool,
    #[arrrg(flag, "Log progress to stderr.")]
    pub verbose: bool,
}

impl PrintOptions {
    pub fn decode_policy(&self) -> DecodePolicy {
        if self.skip_corrupt {
            DecodePolicy::Skip
        } else {
            DecodePolicy::Halt
        }
    }
}

///////////////////////////////////////// SummarizeOptions /////////////////////////////////////////

/// Options for `tuple-summarize`.
#[derive(CommandLine, Clone, Debug, Default, Eq, PartialEq)]
pub struct SummarizeOptions {
    #[arrrg(flag, "Log progress to stderr.")]
    pub verbose: bool,
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use arrrg::CommandLine;

    use super::*;

    const USAGE: &str = "Usage: tuple-print [OPTIONS] <store path>";

    #[test]
    fn print_defaults() {
        let (options, free) = PrintOptions::from_arguments_relaxed(USAGE, &["/tmp/db"]);
        assert_eq!(PrintOptions::default(), options);
        assert_eq!(DecodePolicy::Halt, options.decode_policy());
        assert_eq!(vec!["/tmp/db".to_string()], free);
        assert_eq!("/tmp/db", store_path(&free).unwrap());
        assert!(options.canonical_command_line(None).is_empty());
    }

    #[test]
    fn print_everything() {
        let args: &[&str] = &[
            "--key-format",
            "uint32,-string",
            "--value-format",
            "raw_string",
            "--key-prefix",
            "42",
            "--skip-corrupt",
            "--verbose",
        ];
        let (options, free) = PrintOptions::from_arguments_relaxed(USAGE, args);
        assert_eq!(
            PrintOptions {
                key_format: "uint32,-string".to_string(),
                value_format: "raw_string".to_string(),
                key_prefix: "42".to_string(),
                skip_corrupt: true,
                verbose: true,
            },
            options
        );
        assert_eq!(DecodePolicy::Skip, options.decode_policy());
        assert!(free.is_empty());
        let got = options.canonical_command_line(None);
        let got: &[String] = &got;
        assert_eq!(args, got);
    }

    #[test]
    fn summarize_verbose() {
        let (options, free) = SummarizeOptions::from_arguments_relaxed(USAGE, &["--verbose", "db"]);
        assert!(options.verbose);
        assert_eq!("db", store_path(&free).unwrap());
    }

    #[test]
    fn exactly_one_store_path() {
        assert!(matches!(
            store_path(&[]),
            Err(Error::CommandLine { .. })
        ));
        let free = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            store_path(&free),
            Err(Error::CommandLine { .. })
        ));
    }
}
