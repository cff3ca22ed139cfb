mod feed;
mod geocode;
mod kinematics;
mod location;
mod trajectory;
mod web;

use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use crate::feed::Dataset;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "iss-tracker")]
#[command(about = "HTTP API over the ISS trajectory feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// YAML configuration file; defaults apply without one
        #[arg(long)]
        config: Option<String>,
    },
    /// Parse a local OEM file and print a summary
    Inspect { file: String },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()),
        Commands::Inspect { file } => inspect(&file),
    }
}

fn serve(path: Option<&str>) -> ExitCode {
    let config = match path {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn inspect(path: &str) -> ExitCode {
    let xml = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = match Dataset::from_xml(&xml) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let metadata = dataset.metadata();
    let trajectory = dataset.trajectory();
    println!(
        "{} ({}) in {}, {} state vectors",
        metadata.object_name.as_deref().unwrap_or("unknown object"),
        metadata.object_id.as_deref().unwrap_or("-"),
        metadata.ref_frame.as_deref().unwrap_or("unknown frame"),
        trajectory.len()
    );
    if let (Some(first), Some(last)) = (trajectory.first(), trajectory.last()) {
        println!("  epochs {} .. {}", first.epoch, last.epoch);
    }

    let malformed = trajectory
        .iter()
        .filter(|sv| {
            sv.position().is_err()
                || sv.velocity().is_err()
                || trajectory::parse_epoch(&sv.epoch).is_err()
        })
        .count();
    let duplicates = dataset.duplicate_epochs().len();
    if malformed > 0 || duplicates > 0 {
        println!("  {} malformed, {} duplicate epochs", malformed, duplicates);
    }

    ExitCode::SUCCESS
}
