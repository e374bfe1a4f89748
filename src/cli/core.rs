use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::merge::MergeSettings;
use crate::cli::summarize::SummarizeSettings;
use crate::parsing::matrix_error::MatrixError;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.1.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.1.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string containing the legalese.
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2024-{}     pairtab contributors
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// Pairtab, reconciles pairwise ANI and AF genome matrices into one pair table.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Joins a triangular ANI matrix with a square AF matrix into a long-format pair table
    Merge(Box<MergeSettings>),
    /// Computes ANI/AF summary statistics from an existing pair table
    Summarize(Box<SummarizeSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks that the ANI range used for summaries is valid
/// # Arguments
/// * `min_ani` - lower bound, inclusive
/// * `max_ani` - upper bound, inclusive
pub fn check_ani_range(min_ani: f64, max_ani: f64) -> anyhow::Result<()> {
    if !(min_ani.is_finite() && max_ani.is_finite()) {
        bail!("--min-ani and --max-ani must be finite numbers");
    }
    if min_ani > max_ani {
        bail!("--min-ani ({min_ani}) must be <= --max-ani ({max_ani})");
    }
    Ok(())
}

/// Picks the process exit code for a failed input load.
/// Anything caused by reading or opening a file is `IOERR`; format problems are `DATAERR`.
/// # Arguments
/// * `error` - the error chain from a loader
pub fn load_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(matrix_error) = cause.downcast_ref::<MatrixError>() {
            return match matrix_error {
                MatrixError::Io(_) => exitcode::IOERR,
                _ => exitcode::DATAERR
            };
        }
        if let Some(csv_error) = cause.downcast_ref::<csv::Error>() {
            return match csv_error.kind() {
                csv::ErrorKind::Io(_) => exitcode::IOERR,
                _ => exitcode::DATAERR
            };
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return exitcode::IOERR;
        }
    }
    exitcode::DATAERR
}
