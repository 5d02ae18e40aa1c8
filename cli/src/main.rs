//! Sylva CLI - ID3 decision trees for categorical CSV data
//!
//! Every command reads a JSON configuration naming the data file, the fields to keep and the
//! target field:
//! - `train` fits a tree and prints it with its rules
//! - `evaluate` scores the tree on a held-out CSV file
//! - `cross-validate` compares depth limits with k-fold cross-validation

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

/// Sylva CLI - ID3 decision trees
#[derive(Parser, Debug)]
#[command(name = "sylva")]
#[command(about = "Learn ID3 decision trees from categorical CSV data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit a tree and print it together with its rules
    Train {
        /// JSON configuration file
        config: PathBuf,

        /// Limit the depth of the tree, overrides the configuration
        #[arg(short = 'd', long)]
        max_depth: Option<usize>,

        /// Print the fitted tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fit a tree and report its accuracy on a held-out CSV file
    Evaluate {
        /// JSON configuration file
        config: PathBuf,

        /// CSV file with the same fields as the training data
        test: PathBuf,

        /// Limit the depth of the tree, overrides the configuration
        #[arg(short = 'd', long)]
        max_depth: Option<usize>,
    },
    /// Compare depth limits with k-fold cross-validation
    CrossValidate {
        /// JSON configuration file
        config: PathBuf,

        /// Number of folds
        #[arg(short = 'k', long, default_value_t = 5)]
        folds: usize,

        /// Comma separated depth limits to compare
        #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3, 4, 5, 10, 15])]
        depths: Vec<usize>,

        /// Seed for shuffling the dataset
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing, log records of the libraries are forwarded
    let filter = if cli.verbose {
        "sylva=debug,sylva_id3=debug,sylva_datasets=debug"
    } else {
        "sylva=info,sylva_id3=info,sylva_datasets=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Sylva CLI");

    let out = match cli.command {
        Command::Train {
            config,
            max_depth,
            json,
        } => commands::train(&config, max_depth, json)?,
        Command::Evaluate {
            config,
            test,
            max_depth,
        } => commands::evaluate(&config, &test, max_depth)?,
        Command::CrossValidate {
            config,
            folds,
            depths,
            seed,
        } => commands::cross_validate(&config, folds, &depths, seed)?.to_string(),
    };

    println!("{}", out);

    Ok(())
}
