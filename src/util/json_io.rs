
use anyhow::Context;
use std::io::{BufWriter, Write};
use std::fs::File;
use std::path::Path;

/// Loads a JSON file into some type, e.g. a previously saved summary.
/// # Arguments
/// * `filename` - the file path to open and parse, ".gz" files are decompressed
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> anyhow::Result<T> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let fp: Box<dyn std::io::Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::read::MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let result: T = serde_json::from_reader(fp)
        .with_context(|| format!("Error while deserializing {filename:?}:"))?;
    Ok(result)
}

/// Saves a serializable struct (summaries, CLI settings) as pretty JSON.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to, ".gz" files are compressed
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> anyhow::Result<()> {
    let file = File::create(out_filename)
        .with_context(|| format!("Error while creating {out_filename:?}:"))?;
    let file: Box<dyn std::io::Write> = if out_filename.extension().unwrap_or_default() == "gz" {
        Box::new(flate2::write::GzEncoder::new(file, flate2::Compression::best()))
    } else {
        Box::new(file)
    };
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error while serializing {out_filename:?}:"))?;
    writer.flush()
        .with_context(|| format!("Error while flushing output to {out_filename:?}:"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::pair_summary::PairSummary;

    #[test]
    fn test_summary_json() {
        let summary = PairSummary {
            total_rows: 10,
            pairs_used: 4,
            dropped_out_of_range: 6,
            min_ani: 95.0,
            max_ani: 100.0,
            ani_mean: Some(97.5),
            ..Default::default()
        };

        let tmp_dir = tempfile::tempdir().unwrap();
        for name in ["summary.json", "summary.json.gz"] {
            let json_fn = tmp_dir.path().join(name);
            save_json(&summary, &json_fn).unwrap();
            let loaded: PairSummary = load_json(&json_fn).unwrap();
            assert_eq!(loaded, summary);
        }
    }
}
