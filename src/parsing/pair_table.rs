
use anyhow::{ensure, Context};
use std::path::Path;

use crate::data_types::genome_pair::GenomePair;
use crate::data_types::pair_records::MergedRecord;
use crate::parsing::text_io::open_text_reader;
use crate::writers::pair_table::{PairTableRow, PAIR_TABLE_HEADER};

/// Loads a pair table previously written by `write_pair_table`.
/// The header must match the expected columns; an empty AF field loads as a missing AF.
/// # Arguments
/// * `filename` - the pair table path, optionally gzip compressed
/// # Errors
/// * if the file cannot be opened or read
/// * if the header does not match or a row is malformed
pub fn load_pair_table(filename: &Path) -> anyhow::Result<Vec<MergedRecord>> {
    let reader = open_text_reader(filename)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .from_reader(reader);

    let header = csv_reader.headers()
        .with_context(|| format!("Error while reading header of {filename:?}:"))?;
    ensure!(
        header.iter().eq(PAIR_TABLE_HEADER.iter().copied()),
        "Unexpected header in {filename:?}: found {:?}, expected {:?}", header, PAIR_TABLE_HEADER
    );

    let mut records = vec![];
    for result in csv_reader.deserialize() {
        let row: PairTableRow = result.with_context(|| format!("Error while reading {filename:?}"))?;
        let pair = GenomePair::new(&row.genome1, &row.genome2);
        records.push(MergedRecord::new(pair, row.ani, row.af));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writers::pair_table::write_pair_table;

    #[test]
    fn test_load_written_table() {
        let records = vec![
            MergedRecord::new(GenomePair::new("g1", "g2"), "98.50".to_string(), Some("0.95".to_string())),
            MergedRecord::new(GenomePair::new("g1", "g3"), "96.00".to_string(), None),
        ];
        let tmp_dir = tempfile::tempdir().unwrap();
        let out_fn = tmp_dir.path().join("pairs.tsv");
        write_pair_table(&records, &out_fn).unwrap();

        let loaded = load_pair_table(&out_fn).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_bad_header() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let out_fn = tmp_dir.path().join("pairs.tsv");
        std::fs::write(&out_fn, "qry\tref\tANI\tAF\ng1\tg2\t99.0\t0.9\n").unwrap();
        assert!(load_pair_table(&out_fn).is_err());
    }

    #[test]
    fn test_short_row() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let out_fn = tmp_dir.path().join("pairs.tsv");
        std::fs::write(&out_fn, "genome1\tgenome2\tANI\tAF\ng1\tg2\n").unwrap();
        assert!(load_pair_table(&out_fn).is_err());
    }
}
