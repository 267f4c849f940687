mod exit;
mod logging;
mod run;

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "cembed",
    version,
    disable_version_flag = true,
    about = "Create C source with file data embedded in char arrays"
)]
pub struct Cli {
    /// Output file (default: standard output).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Prefix to place before variable names.
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Override the default variable name (has to be a valid C identifier).
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Omit the `static` keyword.
    #[arg(short = 's', long = "no-static")]
    pub no_static: bool,

    /// Add a zero byte to the end of each array.
    #[arg(short = 'z', long = "zero-byte")]
    pub zero_byte: bool,

    /// Use normal stdio operations during debugging.
    #[arg(short = 'd', long = "debug-load")]
    pub debug_load: bool,

    /// Embed a decoded image.
    #[arg(short = 'i', long = "image")]
    pub image: bool,

    /// Create a table of { filename, data, size } with this name.
    #[arg(short = 't', long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// Display version number.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Input files.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = err.print();
                std::process::exit(exit::SUCCESS);
            }
            _ => {
                eprintln!("Error: {}", usage_message(&err));
                std::process::exit(exit::USAGE);
            }
        },
    };
    init_logging(cli.log_format, cli.log_level);

    if cli.files.is_empty() {
        let _ = Cli::command().print_help();
        std::process::exit(exit::SUCCESS);
    }

    match run::run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.code);
        }
    }
}

/// First line of a clap parse error, without its own `error: ` prefix.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or("invalid arguments");
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "cembed", "-o", "out.c", "-p", "res_", "-s", "-z", "-d", "-t", "assets", "a.bin",
            "b.bin",
        ])
        .expect("flags should parse");

        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("out.c")));
        assert_eq!(cli.prefix.as_deref(), Some("res_"));
        assert!(cli.no_static);
        assert!(cli.zero_byte);
        assert!(cli.debug_load);
        assert_eq!(cli.table.as_deref(), Some("assets"));
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn rejects_missing_flag_value() {
        let err = Cli::try_parse_from(["cembed", "-t"]).expect_err("missing value should fail");
        assert!(!matches!(
            err.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ));
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = Cli::try_parse_from(["cembed", "-q", "a.bin"]).expect_err("unknown flag");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn no_files_parses_to_empty_list() {
        let cli = Cli::try_parse_from(["cembed"]).expect("bare invocation should parse");
        assert!(cli.files.is_empty());
    }

    #[test]
    fn version_flag_renders_version() {
        let err = Cli::try_parse_from(["cembed", "-v"]).expect_err("version exits parsing");
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}
