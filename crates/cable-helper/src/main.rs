//! cable-helper: command-line tooling for cable documents.
//!
//! - `convert` wraps a JSON array of coordinate lists into a cable
//!   document with one segment per list.
//! - `merge` joins segments whose endpoints coincide into continuous
//!   segments, keeping every other field of the document.
//!
//! # Usage
//!
//! ```text
//! cable-helper convert raw.json cable.json --cable-id apg --cable-name "Asia Pacific Gateway"
//! cable-helper merge cable.json merged.json --stats --svg merged.svg
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod error;
mod io;

use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match commands::run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(": ");
                message.push_str(&cause.to_string());
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
