
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Opens a plain text file for buffered line reading.
/// If the file ends with ".gz", it is transparently decompressed.
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_text_reader(filename: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    let reader: Box<dyn BufRead> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

/// Iterates over the non-blank lines of a reader, yielding the 1-based line number and the trimmed line.
/// Matrix files from the upstream tools may carry trailing whitespace or an empty final line.
pub fn trimmed_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<(usize, String)>> {
    reader.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            match line {
                Ok(l) => {
                    let trimmed = l.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(Ok((index + 1, trimmed.to_string())))
                    }
                },
                Err(e) => Some(Err(e))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Write};

    #[test]
    fn test_trimmed_lines() {
        let text = "a\tb \n\n  \n c\t\td\n";
        let lines: Vec<(usize, String)> = trimmed_lines(Cursor::new(text))
            .collect::<std::io::Result<_>>().unwrap();
        assert_eq!(lines, vec![
            (1, "a\tb".to_string()),
            (4, "c\t\td".to_string())
        ]);
    }

    #[test]
    fn test_open_gz() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let gz_fn = tmp_dir.path().join("matrix.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_fn).unwrap(), flate2::Compression::default());
        encoder.write_all(b"g1\tg2\n1\t2\n").unwrap();
        encoder.finish().unwrap();

        let reader = open_text_reader(&gz_fn).unwrap();
        let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>().unwrap();
        assert_eq!(lines, vec!["g1\tg2".to_string(), "1\t2".to_string()]);
    }

    #[test]
    fn test_open_missing() {
        let tmp_dir = tempfile::tempdir().unwrap();
        assert!(open_text_reader(&tmp_dir.path().join("missing.tsv")).is_err());
    }
}
