/// Command line interface functionality
pub mod cli;
/// Contains the shared data types: genome pairs, records, and summaries
pub mod data_types;
/// Tooling for parsing the ANI/AF matrices and pair tables
pub mod parsing;
/// Core logic for joining the ANI and AF values
pub mod reconciler;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
