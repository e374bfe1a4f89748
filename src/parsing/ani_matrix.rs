
use anyhow::Context;
use log::{debug, trace, warn};
use std::io::BufRead;
use std::path::Path;

use crate::data_types::genome_pair::{genome_name_from_filename, GenomePair};
use crate::data_types::pair_records::AniRecord;
use crate::parsing::matrix_error::MatrixError;
use crate::parsing::text_io::{open_text_reader, trimmed_lines};

/// ANI values equal to this literal string are treated as "no relationship" and skipped
pub const ANI_ZERO_SENTINEL: &str = "0.00";

/// The parsed contents of a lower-triangular ANI matrix.
/// Row `i` lists a genome filename followed by exactly `i` values, one for each previously listed genome.
#[derive(Clone, Debug, Default)]
pub struct AniMatrix {
    /// Genome names in the order they were listed
    genomes: Vec<String>,
    /// Non-zero ANI records in row-major order
    records: Vec<AniRecord>,
    /// Number of cells skipped because they matched the zero sentinel
    num_filtered: usize
}

impl AniMatrix {
    /// Loads an ANI matrix from a file, which may be gzip compressed.
    /// # Arguments
    /// * `filename` - path to the triangular ANI matrix
    /// # Errors
    /// * if the file cannot be opened or read
    /// * if the matrix is not a valid lower-triangular matrix
    pub fn from_path(filename: &Path) -> anyhow::Result<Self> {
        let reader = open_text_reader(filename)?;
        let matrix = Self::from_reader(reader)
            .with_context(|| format!("Error while parsing ANI matrix {filename:?}:"))?;
        Ok(matrix)
    }

    /// Parses an ANI matrix from any buffered reader.
    /// # Arguments
    /// * `reader` - the text source; the first line is a genome count that is otherwise ignored
    /// # Errors
    /// * if there is no header line
    /// * if any row does not have one value per previously listed genome
    /// * if any genome name is empty after removing the path and suffix
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MatrixError> {
        let mut lines = trimmed_lines(reader);
        let (_header_line, header) = lines.next().ok_or(MatrixError::MissingHeader)??;
        let declared_count: Option<usize> = header.parse().ok();
        if declared_count.is_none() {
            warn!("ANI matrix header {header:?} is not a genome count, ignoring it");
        }

        let mut matrix = Self::default();
        for line_result in lines {
            let (line_num, line) = line_result?;
            let mut fields = line.split('\t');

            // the first field is always present since the line is non-empty
            let filename = fields.next().unwrap_or_default();
            let genome = genome_name_from_filename(filename);
            if genome.is_empty() {
                return Err(MatrixError::EmptyGenomeName { line: line_num });
            }

            let values: Vec<&str> = fields.collect();
            let expected = matrix.genomes.len();
            if values.len() != expected {
                return Err(MatrixError::AniRowLength {
                    line: line_num,
                    genome: genome.to_string(),
                    expected,
                    found: values.len()
                });
            }

            for (previous, &ani) in matrix.genomes.iter().zip(values.iter()) {
                if ani == ANI_ZERO_SENTINEL {
                    matrix.num_filtered += 1;
                    continue;
                }
                let pair = GenomePair::new(genome, previous);
                trace!("ANI {pair} = {ani}");
                matrix.records.push(AniRecord::new(pair, ani.to_string()));
            }

            matrix.genomes.push(genome.to_string());
        }

        if let Some(count) = declared_count {
            if count != matrix.genomes.len() {
                warn!("ANI matrix header declares {count} genomes, but {} rows were found", matrix.genomes.len());
            }
        }
        debug!("Parsed ANI matrix: {} genomes, {} records, {} zero cells", matrix.genomes.len(), matrix.records.len(), matrix.num_filtered);

        Ok(matrix)
    }

    // getters
    pub fn genomes(&self) -> &[String] {
        &self.genomes
    }

    pub fn records(&self) -> &[AniRecord] {
        &self.records
    }

    pub fn num_filtered(&self) -> usize {
        self.num_filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<AniMatrix, MatrixError> {
        AniMatrix::from_reader(Cursor::new(text))
    }

    #[test]
    fn test_simple_matrix() {
        let matrix = parse("2\ng1.fasta\ng2.fasta\t98.50\n").unwrap();
        assert_eq!(matrix.genomes(), &["g1".to_string(), "g2".to_string()]);
        assert_eq!(matrix.records(), &[
            AniRecord::new(GenomePair::new("g1", "g2"), "98.50".to_string())
        ]);
        assert_eq!(matrix.num_filtered(), 0);
    }

    #[test]
    fn test_triangle_with_paths() {
        let text = "4
/data/zeta.fasta
/data/alpha.fasta\t99.10
/data/mid.fasta\t0.00\t97.25
other/beta.fasta\t96.00\t0.00\t95.5
";
        let matrix = parse(text).unwrap();
        assert_eq!(matrix.genomes(), &[
            "zeta".to_string(), "alpha".to_string(), "mid".to_string(), "beta".to_string()
        ]);

        // row-major order, canonical keys, literal values
        let observed: Vec<(&str, &str, &str)> = matrix.records().iter()
            .map(|r| (r.pair().genome1(), r.pair().genome2(), r.ani()))
            .collect();
        assert_eq!(observed, vec![
            ("alpha", "zeta", "99.10"),
            ("alpha", "mid", "97.25"),
            ("beta", "zeta", "96.00"),
            ("beta", "mid", "95.5"),
        ]);
        assert_eq!(matrix.num_filtered(), 2);
    }

    #[test]
    fn test_zero_sentinel_is_exact() {
        // only the literal "0.00" is filtered
        let matrix = parse("4\na\nb\t0.00\nc\t0\t0.0\nd\t0.000\t00.00\t0.00\n").unwrap();
        let values: Vec<&str> = matrix.records().iter().map(|r| r.ani()).collect();
        assert_eq!(values, vec!["0", "0.0", "0.000", "00.00"]);
        assert_eq!(matrix.num_filtered(), 2);
    }

    #[test]
    fn test_single_genome() {
        let matrix = parse("1\ng1.fasta\n").unwrap();
        assert_eq!(matrix.genomes().len(), 1);
        assert!(matrix.records().is_empty());
    }

    #[test]
    fn test_header_only() {
        let matrix = parse("0\n").unwrap();
        assert!(matrix.genomes().is_empty());
        assert!(matrix.records().is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse(""), Err(MatrixError::MissingHeader)));
        assert!(matches!(parse("\n  \n"), Err(MatrixError::MissingHeader)));
    }

    #[test]
    fn test_short_row() {
        let result = parse("3\ng1\ng2\t99.0\ng3\t98.0\n");
        match result {
            Err(MatrixError::AniRowLength { line, genome, expected, found }) => {
                assert_eq!(line, 4);
                assert_eq!(genome, "g3");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            },
            other => panic!("unexpected result: {other:?}")
        }
    }

    #[test]
    fn test_long_row() {
        let result = parse("2\ng1\ng2\t99.0\t100.0\n");
        assert!(matches!(result, Err(MatrixError::AniRowLength { line: 3, expected: 1, found: 2, .. })));
    }

    #[test]
    fn test_empty_name() {
        let result = parse("2\ng1\ndir/.fasta\t99.0\n");
        assert!(matches!(result, Err(MatrixError::EmptyGenomeName { line: 3 })));
    }

    #[test]
    fn test_windows_line_endings() {
        let matrix = parse("2\r\ng1.fasta\r\ng2.fasta\t98.50\r\n").unwrap();
        assert_eq!(matrix.records()[0].ani(), "98.50");
    }
}
