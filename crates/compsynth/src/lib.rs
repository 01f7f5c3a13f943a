//! Synthesizes shell completion scripts from a description of a command line
//! interface: its options, positionals, subcommands and the conditions under
//! which each of them is offered.
//!
//! ```
//! let cmd = compsynth::parse(r#"
//!     cmd prog {
//!         option -v, --verbose
//!         option --color <COLOR>: choices(red green blue)
//!         positional FILE: file repeatable
//!     }
//! "#).unwrap();
//! let script = compsynth::bash::generate_completion(&cmd, &compsynth::Config::default()).unwrap();
//! assert!(script.contains("complete -F _prog prog"));
//! ```

mod abbrev;
mod ast;
mod config;
mod error;
mod parse;
mod shell;
mod tree;
mod when;

pub mod bash;

pub use crate::{
    abbrev::{Abbreviations, NoAbbreviations, PrefixAbbreviations},
    ast::{Arg, ArgPolicy, CommandLine, Complete, Opt, Positional, Spelling},
    config::Config,
    error::{Error, Result},
    parse::parse,
    when::Condition,
};

/// Parses a description and generates the bash completion script for it.
pub fn compile(src: &str, config: &Config) -> Result<String> {
    let cmd = parse(src)?;
    bash::generate_completion(&cmd, config)
}
