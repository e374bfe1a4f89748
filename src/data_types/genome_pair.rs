
use std::fmt::Display;

/// Extension that is removed from the genome filenames in the ANI matrix
pub const FASTA_SUFFIX: &str = ".fasta";

/// Converts a genome filename into the genome name used for pairing.
/// Any leading path is removed, followed by a single trailing ".fasta" suffix.
/// # Arguments
/// * `filename` - the raw filename field, e.g. "genomes/GCF_000005845.2.fasta"
/// # Examples
/// ```
/// use pairtab::data_types::genome_pair::genome_name_from_filename;
/// assert_eq!(genome_name_from_filename("genomes/g1.fasta"), "g1");
/// assert_eq!(genome_name_from_filename("g1.fna"), "g1.fna");
/// ```
pub fn genome_name_from_filename(filename: &str) -> &str {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    basename.strip_suffix(FASTA_SUFFIX).unwrap_or(basename)
}

/// An unordered pair of genome names, stored as (min, max) so that (A, B) and (B, A) are the same key.
/// Self-pairs are allowed since the AF matrix includes its diagonal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GenomePair {
    /// The lexicographically smaller genome name
    genome1: String,
    /// The lexicographically larger (or equal) genome name
    genome2: String
}

impl GenomePair {
    /// Creates the canonical key for two genomes, order of the arguments does not matter.
    /// # Arguments
    /// * `name_a` - one genome name
    /// * `name_b` - the other genome name
    pub fn new(name_a: &str, name_b: &str) -> Self {
        let (genome1, genome2) = if name_a <= name_b {
            (name_a, name_b)
        } else {
            (name_b, name_a)
        };
        Self {
            genome1: genome1.to_string(),
            genome2: genome2.to_string()
        }
    }

    // getters
    pub fn genome1(&self) -> &str {
        &self.genome1
    }

    pub fn genome2(&self) -> &str {
        &self.genome2
    }

    /// Returns true if both sides are the same genome
    pub fn is_self_pair(&self) -> bool {
        self.genome1 == self.genome2
    }
}

impl Display for GenomePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<->{}", self.genome1, self.genome2)
    }
}
