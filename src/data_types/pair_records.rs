
use crate::data_types::genome_pair::GenomePair;

/// A single non-zero ANI cell from the triangular ANI matrix
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AniRecord {
    /// The canonical genome pair
    pair: GenomePair,
    /// The literal ANI value as it appeared in the matrix
    ani: String
}

impl AniRecord {
    /// Constructor
    pub fn new(pair: GenomePair, ani: String) -> Self {
        Self {
            pair, ani
        }
    }

    // getters
    pub fn pair(&self) -> &GenomePair {
        &self.pair
    }

    pub fn ani(&self) -> &str {
        &self.ani
    }
}

/// One row of the final pair table; the AF is absent if the pair was not in the AF matrix
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MergedRecord {
    /// The canonical genome pair
    pair: GenomePair,
    /// The literal ANI value
    ani: String,
    /// The literal AF value, if one was found
    af: Option<String>
}

impl MergedRecord {
    /// Constructor
    pub fn new(pair: GenomePair, ani: String, af: Option<String>) -> Self {
        Self {
            pair, ani, af
        }
    }

    // getters
    pub fn pair(&self) -> &GenomePair {
        &self.pair
    }

    pub fn ani(&self) -> &str {
        &self.ani
    }

    pub fn af(&self) -> Option<&str> {
        self.af.as_deref()
    }
}
