// blzcheck - command line front end
// Exit code of `check` is the result code: 0 OK, 1 UNKNOWN, 2 ERROR, 3 BANK_NOT_KNOWN

use anyhow::{Context, Result};
use blzcheck::{
    AccountNumberCheck, CheckReport, CheckResult, Config, Method, TextEncoding, BUNDLED_LABEL,
};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for failures other than a check result (bad config, unreadable data)
const EXIT_FAILURE: u8 = 4;

#[derive(Parser)]
#[command(name = "blzcheck", version, about = "Check German account numbers against their bank code")]
struct Cli {
    /// Bank data file or directory (default: $BLZCHECK_DATA, then the bundled data)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Encoding of the bank data file (utf-8, iso-8859-1, iso-8859-15)
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an account number against a bank code
    Check {
        /// Bank code (8 digits)
        bank_id: String,
        /// Account number (up to 10 digits)
        account: String,
    },
    /// Show the record for a bank code
    Find {
        /// Bank code (8 digits)
        bank_id: String,
    },
    /// Show library and dataset information
    Info,
    /// List check methods and how many banks use them
    Methods,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::from_env().context("invalid environment configuration")?;
    if let Some(path) = cli.data {
        config = config.with_data_path(path);
    }
    if let Some(encoding) = cli.encoding {
        config = config.with_encoding(encoding);
    }

    let checker = AccountNumberCheck::from_config(&config).context("failed to load bank data")?;

    match cli.command {
        Commands::Check { bank_id, account } => {
            let report = checker.check_detailed(&bank_id, &account);
            print_check(&report, cli.json)?;
            Ok(exit_code(report.result))
        }
        Commands::Find { bank_id } => match checker.find_bank(&bank_id) {
            Ok(bank) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&bank)?);
                } else {
                    println!("Bank code: {}", bank.bank_id);
                    println!("Name:      {}", bank.name);
                    println!("Location:  {}", bank.location);
                    println!("Method:    {}", bank.method);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                if cli.json {
                    println!("{}", json!({ "error": err.to_string(), "bank_id": err.bank_id() }));
                } else {
                    eprintln!("{}", err);
                }
                Ok(exit_code(CheckResult::BankNotKnown))
            }
        },
        Commands::Info => {
            let metadata = checker.metadata();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                println!("Library version:  {}", metadata.library_version);
                println!("Data directory:   {}", metadata.data_directory);
                println!(
                    "Data file:        {}",
                    metadata.data_file.as_deref().unwrap_or(BUNDLED_LABEL)
                );
                if let Some(date) = metadata.valid_from {
                    println!("Valid from:       {}", date);
                }
                println!("Source encoding:  {}", metadata.source_encoding);
                println!("Text encoding:    {}", metadata.text_encoding);
                println!("Banks:            {}", metadata.bank_count);
                println!("Skipped lines:    {}", metadata.skipped);
                println!("Methods:          {}", metadata.methods_implemented);
                println!("SHA-256:          {}", metadata.fingerprint);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Methods => {
            print_methods(&checker, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(result: CheckResult) -> ExitCode {
    // result codes are 0..=3
    ExitCode::from(result.code() as u8)
}

fn print_check(report: &CheckReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match &report.bank {
        Some(bank) => println!("Bank: '{}' at '{}'", bank.name, bank.location),
        None => println!("Bank code '{}' not found", report.bank_id),
    }
    if let Some(method) = &report.method {
        println!("Method: {}", method);
    }
    println!(
        "Result is: ({}) {} - {}",
        report.result.code(),
        report.result,
        report.result.description()
    );
    Ok(())
}

fn print_methods(checker: &AccountNumberCheck, as_json: bool) -> Result<()> {
    let usage = checker.registry().method_usage();

    let implemented: Vec<_> = Method::all()
        .iter()
        .map(|m| (m.code(), usage.get(m.code()).copied().unwrap_or(0)))
        .collect();
    let unimplemented: Vec<_> = usage
        .iter()
        .filter(|(id, _)| Method::resolve(id).is_none())
        .map(|(id, count)| (*id, *count))
        .collect();

    if as_json {
        fn entries(list: &[(&str, usize)]) -> Vec<serde_json::Value> {
            list.iter()
                .map(|(code, banks)| json!({ "method": code, "banks": banks }))
                .collect()
        }
        let value = json!({
            "implemented": entries(&implemented),
            "unimplemented": entries(&unimplemented),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Implemented methods ({}):", implemented.len());
    for (code, banks) in &implemented {
        println!("  {}  {:>6} banks", code, banks);
    }
    if !unimplemented.is_empty() {
        println!("Not implemented, used in data ({}):", unimplemented.len());
        for (code, banks) in &unimplemented {
            println!("  {}  {:>6} banks", code, banks);
        }
    }
    Ok(())
}
