
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data_types::pair_records::MergedRecord;

/// Column names of the pair table, in order
pub const PAIR_TABLE_HEADER: [&str; 4] = ["genome1", "genome2", "ANI", "AF"];

/// Contains all the data written to each row of the pair table
#[derive(Debug, Deserialize, Serialize)]
pub struct PairTableRow {
    /// Lexicographically smaller genome
    pub genome1: String,
    /// Lexicographically larger genome
    pub genome2: String,
    /// Literal ANI value
    #[serde(rename = "ANI")]
    pub ani: String,
    /// Literal AF value, empty when the pair was missing from the AF matrix
    #[serde(rename = "AF")]
    pub af: Option<String>
}

impl From<&MergedRecord> for PairTableRow {
    fn from(record: &MergedRecord) -> Self {
        Self {
            genome1: record.pair().genome1().to_string(),
            genome2: record.pair().genome2().to_string(),
            ani: record.ani().to_string(),
            af: record.af().map(|s| s.to_string())
        }
    }
}

/// Writes the full pair table to the given path.
/// The header is always written, even if there are no records.
/// If the filename ends with ".gz", the output is gzip compressed.
/// # Arguments
/// * `records` - the merged records, written in the provided order
/// * `filename` - the output path
/// # Errors
/// * if the file cannot be created or written to
pub fn write_pair_table(records: &[MergedRecord], filename: &Path) -> anyhow::Result<()> {
    let file = File::create(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;
    if filename.extension().unwrap_or_default() == "gz" {
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let encoder = write_pair_table_to(records, encoder)
            .with_context(|| format!("Error while writing pair table to {filename:?}:"))?;
        // finish explicitly so trailer errors are not lost on drop
        encoder.finish()
            .with_context(|| format!("Error while finishing gzip output {filename:?}:"))?;
    } else {
        write_pair_table_to(records, file)
            .with_context(|| format!("Error while writing pair table to {filename:?}:"))?;
    }
    Ok(())
}

/// Writes the pair table to any writer and hands the flushed writer back; see `write_pair_table`.
pub fn write_pair_table_to<W: Write>(records: &[MergedRecord], handle: W) -> csv::Result<W> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // written manually so that empty tables still get one
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(handle);

    csv_writer.write_record(PAIR_TABLE_HEADER)?;
    for record in records.iter() {
        csv_writer.serialize(PairTableRow::from(record))?;
    }
    let handle = csv_writer.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(handle)
}
