use log::{LevelFilter, error, info};
use std::path::Path;
use std::time::Instant;

use pairtab::cli::core::{Commands, get_cli, load_exit_code};
use pairtab::cli::merge::{MergeSettings, check_merge_settings};
use pairtab::cli::summarize::{SummarizeSettings, check_summarize_settings};
use pairtab::data_types::pair_summary::{PairSummary, SummaryConfig, SummaryConfigBuilder};
use pairtab::parsing::af_matrix::AfMatrix;
use pairtab::parsing::ani_matrix::AniMatrix;
use pairtab::parsing::pair_table::load_pair_table;
use pairtab::reconciler::reconcile;
use pairtab::util::json_io::save_json;
use pairtab::writers::pair_table::write_pair_table;

/// Sets up the logger based on the number of -v flags
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Builds the summary configuration from the CLI range
fn summary_config(min_ani: f64, max_ani: f64) -> SummaryConfig {
    match SummaryConfigBuilder::default()
        .min_ani(min_ani)
        .max_ani(max_ani)
        .build() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building summary config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    }
}

/// Saves the checked CLI settings if the user asked for them
fn save_settings<T: serde::Serialize>(settings: &T, settings_fn: Option<&Path>) {
    if let Some(settings_fn) = settings_fn {
        info!("Saving CLI options to {settings_fn:?}...");
        if let Err(e) = save_json(settings, settings_fn) {
            error!("Error while saving CLI options: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }
}

/// Logs the summary numbers
fn log_summary(summary: &PairSummary) {
    info!("Summary:");
    info!("\tTotal rows: {}", summary.total_rows);
    info!("\tDropped (missing or non-numeric): {}", summary.dropped_non_numeric);
    info!("\tDropped (self or duplicate pair): {}", summary.dropped_self_or_duplicate);
    info!("\tDropped (ANI outside {} - {}): {}", summary.min_ani, summary.max_ani, summary.dropped_out_of_range);
    info!("\tPairs used: {}", summary.pairs_used);
    info!("\tAF converted from percent: {}", summary.af_as_percent);
    info!("\tANI mean: {:?}", summary.ani_mean);
    info!("\tANI median: {:?}", summary.ani_median);
    info!("\tAF mean: {:?}", summary.af_mean);
    info!("\tAF median: {:?}", summary.af_median);
    info!("\tPearson r: {:?}", summary.pearson_r);
}

fn run_merge(settings: MergeSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_merge_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    save_settings(&settings, settings.output_settings_filename.as_deref());

    // both matrices are fully loaded before anything is written
    info!("Loading ANI matrix...");
    let ani_matrix = match AniMatrix::from_path(&settings.ani_filename) {
        Ok(m) => m,
        Err(e) => {
            error!("Error while loading ANI matrix: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };
    info!("Loaded {} genomes, {} ANI pairs ({} zero cells skipped).",
        ani_matrix.genomes().len(), ani_matrix.records().len(), ani_matrix.num_filtered());

    info!("Loading AF matrix...");
    let af_matrix = match AfMatrix::from_path(&settings.af_filename, settings.af_symmetry) {
        Ok(m) => m,
        Err(e) => {
            error!("Error while loading AF matrix: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };
    info!("Loaded {} genomes, {} unique AF pairs ({} asymmetric cells).",
        af_matrix.genomes().len(), af_matrix.len(), af_matrix.num_divergent());

    info!("Reconciling pairs...");
    let merged = reconcile(&ani_matrix, &af_matrix);

    info!("Saving pair table to {:?}...", settings.output_filename);
    if let Err(e) = write_pair_table(&merged, &settings.output_filename) {
        error!("Error while saving pair table: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    if let Some(summary_fn) = settings.output_summary_filename.as_deref() {
        let summary = PairSummary::from_records(&merged, summary_config(settings.min_ani, settings.max_ani));
        log_summary(&summary);
        info!("Saving summary to {summary_fn:?}...");
        if let Err(e) = save_json(&summary, summary_fn) {
            error!("Error while saving summary: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Merge completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_summarize(settings: SummarizeSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_summarize_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    save_settings(&settings, settings.output_settings_filename.as_deref());

    info!("Loading pair table...");
    let records = match load_pair_table(&settings.input_filename) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while loading pair table: {e:#}");
            std::process::exit(load_exit_code(&e));
        }
    };
    info!("Loaded {} pairs.", records.len());

    let summary = PairSummary::from_records(&records, summary_config(settings.min_ani, settings.max_ani));
    log_summary(&summary);

    if let Some(summary_fn) = settings.output_filename.as_deref() {
        info!("Saving summary to {summary_fn:?}...");
        if let Err(e) = save_json(&summary, summary_fn) {
            error!("Error while saving summary: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Summary completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Merge(settings) => {
            run_merge(*settings);
        },
        Commands::Summarize(settings) => {
            run_summarize(*settings);
        }
    }

    info!("Process finished successfully.");
}
