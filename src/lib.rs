//! mitfixins: command-line tool skeleton
//!
//! A library for resolving command options from built-in defaults, a TOML
//! configuration file and the command line, and for rendering the result
//! back into a configuration file.

pub mod config;
