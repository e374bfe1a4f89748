
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_ani_range, check_required_filename, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct SummarizeSettings {
    #[clap(skip)]
    pairtab_version: String,

    /// Pair table produced by the merge subcommand
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_filename: PathBuf,

    /// Optional output summary statistics; always logged
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: Option<PathBuf>,

    /// Optional output of the checked CLI settings
    #[clap(long = "output-settings")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_settings_filename: Option<PathBuf>,

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

pub fn check_summarize_settings(mut settings: SummarizeSettings) -> anyhow::Result<SummarizeSettings> {
    // hard code the version in
    settings.pairtab_version = FULL_VERSION.clone();
    info!("Pairtab version: {:?}", &settings.pairtab_version);
    info!("Sub-command: summarize");
    info!("Inputs:");

    check_required_filename(&settings.input_filename, "Pair table")?;
    info!("\tPair table: {:?}", &settings.input_filename);

    info!("Outputs:");
    if let Some(output_fn) = settings.output_filename.as_deref() {
        info!("\tSummary: {output_fn:?}");
    } else {
        info!("\tSummary: None");
    }
    if let Some(settings_fn) = settings.output_settings_filename.as_deref() {
        info!("\tSettings: {settings_fn:?}");
    }

    check_ani_range(settings.min_ani, settings.max_ani)?;
    info!("Summary parameters:");
    info!("\tANI range: {} - {}", settings.min_ani, settings.max_ani);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::json_io::{load_json, save_json};

    #[test]
    fn test_check_summarize_settings() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let input_fn = tmp_dir.path().join("pairs.tsv");

        let settings = SummarizeSettings {
            input_filename: input_fn.clone(),
            min_ani: 95.0,
            max_ani: 100.0,
            ..Default::default()
        };
        assert!(check_summarize_settings(settings.clone()).is_err());

        std::fs::write(&input_fn, "genome1\tgenome2\tANI\tAF\n").unwrap();
        assert!(check_summarize_settings(settings.clone()).is_ok());

        let bad_range = SummarizeSettings {
            min_ani: 99.0,
            max_ani: 98.0,
            ..settings
        };
        assert!(check_summarize_settings(bad_range).is_err());
    }

    #[test]
    fn test_saved_summarize_settings() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let input_fn = tmp_dir.path().join("pairs.tsv");
        std::fs::write(&input_fn, "genome1\tgenome2\tANI\tAF\n").unwrap();
        let settings_fn = tmp_dir.path().join("settings.json.gz");

        let settings = SummarizeSettings {
            input_filename: input_fn.clone(),
            output_settings_filename: Some(settings_fn.clone()),
            min_ani: 90.0,
            max_ani: 99.0,
            ..Default::default()
        };
        let checked = check_summarize_settings(settings).unwrap();
        save_json(&checked, &settings_fn).unwrap();

        let loaded: serde_json::Value = load_json(&settings_fn).unwrap();
        assert_eq!(loaded["pairtab_version"], serde_json::json!(*FULL_VERSION));
        assert_eq!(loaded["input_filename"], serde_json::json!(input_fn));
        assert_eq!(loaded["output_settings_filename"], serde_json::json!(settings_fn));
        assert_eq!(loaded["max_ani"], serde_json::json!(99.0));
    }
}
