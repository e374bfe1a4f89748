
/// Input-format problems found while parsing the ANI or AF matrices.
/// All line numbers are 1-based and count every line in the file, including the header.
#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    #[error("matrix is empty, expected a header line")]
    MissingHeader,
    #[error("line {line}: genome name is empty")]
    EmptyGenomeName { line: usize },
    #[error("line {line}: ANI row for {genome:?} has {found} values, expected {expected} (one per previously listed genome)")]
    AniRowLength { line: usize, genome: String, expected: usize, found: usize },
    #[error("line {line}: AF row has {found} values, expected {expected} (one per header genome)")]
    AfRowLength { line: usize, expected: usize, found: usize },
    #[error("line {line}: AF matrix has more data rows than the {num_genomes} genomes in the header")]
    AfExtraRow { line: usize, num_genomes: usize },
    #[error("line {line}: AF values for {genome1:?} and {genome2:?} diverge: {previous:?} != {current:?}")]
    AfDivergence { line: usize, genome1: String, genome2: String, previous: String, current: String },
    #[error("I/O error while reading matrix: {0}")]
    Io(#[from] std::io::Error)
}
