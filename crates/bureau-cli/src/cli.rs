//! CLI argument definitions for the bureau ETL.

use std::path::PathBuf;

use bureau_ingest::MAX_INPUT_FILE_SIZE;
use bureau_output::DEFAULT_DB_DRIVER;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bureau-etl",
    version,
    about = "Credit-bureau flat file ETL - decode client and debt records",
    long_about = "Decode a credit-bureau flat file into client and debt tables.\n\n\
                  Writes clientes.csv and deudas.csv and replace-loads the debt\n\
                  table into SQL Server. Database credentials are read from\n\
                  USER, PASSWORD, SERVER and DATABASE (a .env file is honoured)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include packed record values in log output (personal data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, decode and load a bureau file.
    Run(RunArgs),

    /// Print the client columns and the debt offset table.
    Layout,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Bureau file to read.
    #[arg(
        long = "input",
        value_name = "PATH",
        env = "BUREAU_INPUT",
        default_value = "./server_inputs/file.ope"
    )]
    pub input: PathBuf,

    /// Directory receiving clientes.csv and deudas.csv (created if missing).
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        env = "BUREAU_OUTPUT_DIR",
        default_value = "./server_outputs/"
    )]
    pub output_dir: PathBuf,

    /// Driver identifier reported to the server as the application name.
    #[arg(
        long = "db-driver",
        value_name = "NAME",
        env = "BUREAU_DB_DRIVER",
        default_value = DEFAULT_DB_DRIVER
    )]
    pub db_driver: String,

    /// Trust the server certificate without validation.
    #[arg(
        long = "trusted-connection",
        value_name = "BOOL",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub trusted_connection: bool,

    /// Extract and decode only; write nothing and skip credential loading.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the CSV files only; database credentials are not required.
    #[arg(long = "skip-database")]
    pub skip_database: bool,

    /// Largest input file accepted, in bytes.
    #[arg(
        long = "max-input-size",
        value_name = "BYTES",
        default_value_t = MAX_INPUT_FILE_SIZE
    )]
    pub max_input_size: u64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["bureau-etl", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(args.trusted_connection);
        assert!(!args.dry_run);
        assert_eq!(args.max_input_size, MAX_INPUT_FILE_SIZE);
    }

    #[test]
    fn trusted_connection_accepts_explicit_value() {
        let cli = Cli::try_parse_from([
            "bureau-etl",
            "run",
            "--trusted-connection",
            "false",
            "--skip-database",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert!(!args.trusted_connection);
        assert!(args.skip_database);
    }
}
