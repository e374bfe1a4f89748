
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_ani_range, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::parsing::af_matrix::AfSymmetry;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct MergeSettings {
    #[clap(skip)]
    pairtab_version: String,

    /// Lower-triangular ANI matrix, e.g. from `skani triangle`
    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "ani")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub ani_filename: PathBuf,

    /// Full square AF matrix with a genome name header
    #[clap(required = true)]
    #[clap(short = 'f')]
    #[clap(long = "af")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub af_filename: PathBuf,

    /// Output pair table (genome1, genome2, ANI, AF)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Optional output summary statistics
    #[clap(long = "output-summary")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_summary_filename: Option<PathBuf>,

    /// Optional output of the checked CLI settings
    #[clap(long = "output-settings")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_settings_filename: Option<PathBuf>,

    /// How to handle a pair visited twice in the AF matrix with different values
    #[clap(long = "af-symmetry")]
    #[clap(value_name = "MODE")]
    #[clap(help_heading = Some("Merge parameters"))]
    #[clap(default_value = "last-wins")]
    pub af_symmetry: AfSymmetry,

    /// Minimum ANI of a pair to include in the summary statistics
    #[clap(long = "min-ani")]
    #[clap(value_name = "FLOAT")]
    #[clap(help_heading = Some("Summary parameters"))]
    #[clap(default_value = "95.0")]
    pub min_ani: f64,

    /// Maximum ANI of a pair to include in the summary statistics
    #[clap(long = "max-ani")]
    #[clap(value_name = "FLOAT")]
    #[clap(help_heading = Some("Summary parameters"))]
    #[clap(default_value = "100.0")]
    pub max_ani: f64,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_merge_settings(mut settings: MergeSettings) -> anyhow::Result<MergeSettings> {
    // hard code the version in
    settings.pairtab_version = FULL_VERSION.clone();
    info!("Pairtab version: {:?}", &settings.pairtab_version);
    info!("Sub-command: merge");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.ani_filename, "ANI matrix")?;
    check_required_filename(&settings.af_filename, "AF matrix")?;
    info!("\tANI matrix: {:?}", &settings.ani_filename);
    info!("\tAF matrix: {:?}", &settings.af_filename);

    // outputs
    info!("Outputs:");
    info!("\tPair table: {:?}", &settings.output_filename);
    if let Some(summary_fn) = settings.output_summary_filename.as_deref() {
        info!("\tSummary: {summary_fn:?}");
    } else {
        info!("\tSummary: None");
    }
    if let Some(settings_fn) = settings.output_settings_filename.as_deref() {
        info!("\tSettings: {settings_fn:?}");
    }

    info!("Merge parameters:");
    info!("\tAF symmetry: {}", settings.af_symmetry);

    if settings.output_summary_filename.is_some() {
        check_ani_range(settings.min_ani, settings.max_ani)?;
        info!("Summary parameters:");
        info!("\tANI range: {} - {}", settings.min_ani, settings.max_ani);
    }

    Ok(settings)
}
