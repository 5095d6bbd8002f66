//! commitlint core library.
//!
//! This crate exposes the commit-message lint configuration, its loader and a
//! small evaluator for conventional-commit rules.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery, loading and effective settings resolution.
//! - `models`: Configuration record, rule tuples, presets and lint output structs.
//! - `message`: Conventional-commit message parsing.
//! - `checks`: Implementation of the individual rules.
//! - `case`: Case styles used by the `*-case` rules.
//! - `lint`: Applies a configuration to commit messages.
//! - `input`: Commit message sources (file, text, stdin, git range).
//! - `output`: Human/JSON printers.
//! - `error`: Error types.
//! - `utils`: Supporting helpers.
pub mod case;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod lint;
pub mod message;
pub mod models;
pub mod output;
pub mod utils;
