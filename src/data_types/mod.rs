
/// Genome name handling and the canonical unordered genome pair
pub mod genome_pair;
/// Contains the ANI records and merged output records
pub mod pair_records;
/// Summary statistics over a pair table
pub mod pair_summary;
