//! CLI Adapter.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::app::commands::bulk::BulkOptions;
use crate::app::commands::generate::GenerationRequest;
use crate::domain::{AppError, Detection};

#[derive(Parser)]
#[command(name = "intunify")]
#[command(version)]
#[command(
    about = "Generate Intune Win32 application packages from winget package identifiers",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a package for a single application
    #[clap(visible_alias = "o")]
    One(OneArgs),
    /// Generate packages for every entry in a JSON catalog
    #[clap(visible_alias = "b")]
    Bulk(BulkArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("evidence").required(true)))]
struct OneArgs {
    /// The exact '--id' value winget expects for the application; also names
    /// the output folder
    identifier: String,
    /// Version to install; defaults to latest. e.g. "5.21.2"
    #[arg(short, long)]
    version: Option<String>,
    /// Registry key path whose existence is evidence of successful
    /// installation
    #[arg(short = 'k', long = "key", group = "evidence")]
    registry_key: Option<String>,
    /// File path whose existence is evidence of successful installation
    #[arg(short = 'f', long = "file", group = "evidence")]
    file_path: Option<String>,
    /// DisplayName registry value identifying the application's uninstall
    /// entry
    #[arg(short = 'd', long = "display-name", group = "evidence")]
    display_name: Option<String>,
    /// Capture `winget show` output as package_details.yaml
    #[arg(long)]
    show: bool,
    /// Directory to place the generated package folder in
    #[arg(short = 'o', long, default_value = ".")]
    outfolder: PathBuf,
}

#[derive(Args)]
struct BulkArgs {
    /// Path to the JSON catalog file
    #[arg(short, long)]
    infile: PathBuf,
    /// Directory to place the generated package folders in
    #[arg(short, long)]
    outfolder: PathBuf,
    /// Identifiers to exclude. Case insensitive.
    #[arg(short = 'x', long, num_args = 1.., conflicts_with = "excludefile")]
    exclude: Vec<String>,
    /// Path to a JSON file containing an array of identifiers to exclude.
    /// Exclusion is case insensitive.
    #[arg(short = 'X', long)]
    excludefile: Option<PathBuf>,
    /// Capture `winget show` output for each entry
    #[arg(long)]
    show: bool,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::One(args) => run_one(args).map(|_| 0),
        Commands::Bulk(args) => run_bulk(args),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_one(args: OneArgs) -> Result<(), AppError> {
    let detection = match (args.registry_key, args.display_name, args.file_path) {
        (Some(key), None, None) => Detection::RegistryKey(key),
        (None, Some(name), None) => Detection::DisplayName(name),
        (None, None, Some(path)) => Detection::FilePath(path),
        // clap's arg group enforces this already
        _ => {
            return Err(AppError::validation(
                "Exactly one of --key, --display-name, or --file must be supplied",
            ));
        }
    };

    let request = GenerationRequest {
        identifier: args.identifier,
        detection,
        version: args.version,
        show_details: args.show,
        output_root: args.outfolder,
    };

    let report = crate::generate_one(&request)?;
    println!("✅ Generated package at {}/", report.output_dir.display());
    if report.packaged {
        println!("  Packaged {}.intunewin", report.slug);
    }
    Ok(())
}

fn run_bulk(args: BulkArgs) -> Result<i32, AppError> {
    let options = BulkOptions {
        infile: args.infile,
        outfolder: args.outfolder,
        exclude: args.exclude,
        excludefile: args.excludefile,
        show_details: args.show,
    };

    let report = crate::generate_bulk(&options)?;

    println!("✅ Generated {} package(s)", report.generated.len());
    if report.excluded > 0 {
        println!("  Skipped {} excluded catalog entry(ies)", report.excluded);
    }
    if !report.failures.is_empty() {
        eprintln!("⚠️  {} catalog entry(ies) failed:", report.failures.len());
        for failure in &report.failures {
            eprintln!("  • {}: {}", failure.identifier, failure.error);
        }
        return Ok(1);
    }
    Ok(0)
}
