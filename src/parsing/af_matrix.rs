
use anyhow::Context;
use log::{debug, trace, warn};
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;
use strum_macros::EnumString;

use crate::data_types::genome_pair::GenomePair;
use crate::parsing::matrix_error::MatrixError;
use crate::parsing::text_io::{open_text_reader, trimmed_lines};

/// Controls what happens when the same genome pair is visited twice in the AF matrix
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize, clap::ValueEnum)]
pub enum AfSymmetry {
    /// The value from the later row replaces the earlier one
    #[default]
    #[strum(ascii_case_insensitive, serialize = "last-wins")]
    #[clap(name = "last-wins")]
    LastWins,
    /// Both visits must carry the identical literal value, otherwise parsing fails
    #[strum(ascii_case_insensitive, serialize = "strict")]
    #[clap(name = "strict")]
    Strict,
}

/// The parsed contents of a full square AF matrix, keyed by canonical genome pair.
#[derive(Clone, Debug, Default)]
pub struct AfMatrix {
    /// Genome names from the header line, in column order
    genomes: Vec<String>,
    /// Lookup from pair to the literal AF value
    values: HashMap<GenomePair, String>,
    /// Number of cells that replaced an existing value with a different one
    num_divergent: usize
}

impl AfMatrix {
    /// Loads an AF matrix from a file, which may be gzip compressed.
    /// # Arguments
    /// * `filename` - path to the square AF matrix
    /// * `symmetry` - how to treat duplicate visits of the same pair
    /// # Errors
    /// * if the file cannot be opened or read
    /// * if the matrix is not a valid square matrix
    pub fn from_path(filename: &Path, symmetry: AfSymmetry) -> anyhow::Result<Self> {
        let reader = open_text_reader(filename)?;
        let matrix = Self::from_reader(reader, symmetry)
            .with_context(|| format!("Error while parsing AF matrix {filename:?}:"))?;
        Ok(matrix)
    }

    /// Parses an AF matrix from any buffered reader.
    /// The header line holds the genome names; data row `r` holds the values of genome `r` against every column.
    /// # Arguments
    /// * `reader` - the text source
    /// * `symmetry` - how to treat duplicate visits of the same pair
    /// # Errors
    /// * if there is no header line
    /// * if a data row does not have one value per header genome
    /// * if there are more data rows than header genomes
    /// * if `symmetry` is strict and two visits of a pair disagree
    pub fn from_reader<R: BufRead>(reader: R, symmetry: AfSymmetry) -> Result<Self, MatrixError> {
        let mut lines = trimmed_lines(reader);
        let (_header_line, header) = lines.next().ok_or(MatrixError::MissingHeader)??;
        let genomes: Vec<String> = header.split('\t')
            .map(|s| s.to_string())
            .collect();

        let mut values: HashMap<GenomePair, String> = Default::default();
        let mut num_divergent = 0;
        let mut num_rows = 0;
        for line_result in lines {
            let (line_num, line) = line_result?;
            let row_genome = genomes.get(num_rows).ok_or(MatrixError::AfExtraRow {
                line: line_num,
                num_genomes: genomes.len()
            })?;

            let row: Vec<&str> = line.split('\t').collect();
            if row.len() != genomes.len() {
                return Err(MatrixError::AfRowLength {
                    line: line_num,
                    expected: genomes.len(),
                    found: row.len()
                });
            }

            for (column_genome, &af) in genomes.iter().zip(row.iter()) {
                let pair = GenomePair::new(row_genome, column_genome);
                trace!("AF {pair} = {af}");
                if let Some(previous) = values.insert(pair.clone(), af.to_string()) {
                    if previous != af {
                        if symmetry == AfSymmetry::Strict {
                            return Err(MatrixError::AfDivergence {
                                line: line_num,
                                genome1: pair.genome1().to_string(),
                                genome2: pair.genome2().to_string(),
                                previous,
                                current: af.to_string()
                            });
                        }
                        num_divergent += 1;
                    }
                }
            }
            num_rows += 1;
        }

        if num_rows < genomes.len() {
            warn!("AF matrix header lists {} genomes, but only {num_rows} data rows were found", genomes.len());
        }
        if num_divergent > 0 {
            debug!("AF matrix had {num_divergent} asymmetric cells, keeping the later values");
        }
        debug!("Parsed AF matrix: {} genomes, {} unique pairs", genomes.len(), values.len());

        Ok(Self {
            genomes,
            values,
            num_divergent
        })
    }

    /// Returns the AF value for a pair, if present
    pub fn get(&self, pair: &GenomePair) -> Option<&str> {
        self.values.get(pair).map(|s| s.as_str())
    }

    // getters
    pub fn genomes(&self) -> &[String] {
        &self.genomes
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn num_divergent(&self) -> usize {
        self.num_divergent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str, symmetry: AfSymmetry) -> Result<AfMatrix, MatrixError> {
        AfMatrix::from_reader(Cursor::new(text), symmetry)
    }

    #[test]
    fn test_simple_matrix() {
        let matrix = parse("g1\tg2\n100.0\t0.95\n0.95\t100.0\n", AfSymmetry::LastWins).unwrap();
        assert_eq!(matrix.genomes(), &["g1".to_string(), "g2".to_string()]);
        // two self-pairs and one shared pair
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(&GenomePair::new("g2", "g1")), Some("0.95"));
        assert_eq!(matrix.get(&GenomePair::new("g1", "g1")), Some("100.0"));
        assert_eq!(matrix.get(&GenomePair::new("g1", "g3")), None);
        assert_eq!(matrix.num_divergent(), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let text = "b\ta\tc\n100.0\t0.91\t0.50\n0.92\t100.0\t0.00\n0.51\t0.00\t100.0\n";
        let matrix = parse(text, AfSymmetry::LastWins).unwrap();
        // row "a" (the second row) is visited after row "b"
        assert_eq!(matrix.get(&GenomePair::new("a", "b")), Some("0.92"));
        assert_eq!(matrix.get(&GenomePair::new("b", "c")), Some("0.51"));
        // no zero filtering on AF
        assert_eq!(matrix.get(&GenomePair::new("a", "c")), Some("0.00"));
        assert_eq!(matrix.num_divergent(), 2);
    }

    #[test]
    fn test_strict_symmetry() {
        let symmetric = "g1\tg2\n100.0\t0.95\n0.95\t100.0\n";
        assert!(parse(symmetric, AfSymmetry::Strict).is_ok());

        let asymmetric = "g1\tg2\n100.0\t0.95\n0.96\t100.0\n";
        match parse(asymmetric, AfSymmetry::Strict) {
            Err(MatrixError::AfDivergence { line, genome1, genome2, previous, current }) => {
                assert_eq!(line, 3);
                assert_eq!(genome1, "g1");
                assert_eq!(genome2, "g2");
                assert_eq!(previous, "0.95");
                assert_eq!(current, "0.96");
            },
            other => panic!("unexpected result: {other:?}")
        }
    }

    #[test]
    fn test_row_length_mismatch() {
        let result = parse("g1\tg2\n100.0\t0.95\n0.95\n", AfSymmetry::LastWins);
        assert!(matches!(result, Err(MatrixError::AfRowLength { line: 3, expected: 2, found: 1 })));

        let result = parse("g1\tg2\n100.0\t0.95\t0.3\n", AfSymmetry::LastWins);
        assert!(matches!(result, Err(MatrixError::AfRowLength { line: 2, expected: 2, found: 3 })));
    }

    #[test]
    fn test_extra_row() {
        let result = parse("g1\n100.0\n99.0\n", AfSymmetry::LastWins);
        assert!(matches!(result, Err(MatrixError::AfExtraRow { line: 3, num_genomes: 1 })));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse("", AfSymmetry::LastWins), Err(MatrixError::MissingHeader)));
    }

    #[test]
    fn test_partial_rows() {
        // fewer rows than genomes is tolerated
        let matrix = parse("g1\tg2\n100.0\t0.95\n", AfSymmetry::Strict).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get(&GenomePair::new("g1", "g2")), Some("0.95"));
    }

    #[test]
    fn test_symmetry_from_str() {
        use std::str::FromStr;
        assert_eq!(AfSymmetry::from_str("strict").unwrap(), AfSymmetry::Strict);
        assert_eq!(AfSymmetry::from_str("Last-Wins").unwrap(), AfSymmetry::LastWins);
        assert_eq!(AfSymmetry::default().to_string(), "last-wins");
    }
}
