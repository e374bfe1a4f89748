/*!
# Writers module
Contains the logic for writing the output files for the merge command.
*/
/// Generates the long-format pair table
pub mod pair_table;
