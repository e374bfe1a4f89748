/*!
# CLI module
Command line interface functionality that is specific to pairtab.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The merge CLI subcommand
pub mod merge;
/// The summarize CLI subcommand
pub mod summarize;
