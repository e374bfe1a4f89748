/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Parser for the square AF matrix
pub mod af_matrix;
/// Parser for the lower-triangular ANI matrix
pub mod ani_matrix;
/// Error types for matrix parsing
pub mod matrix_error;
/// Parser for pair tables written by the merge step
pub mod pair_table;
/// Shared helpers for reading text files line by line
pub mod text_io;
