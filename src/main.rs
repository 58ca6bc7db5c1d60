//! clientsheet CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`, printing errors to
//! stderr and exiting non-zero on failure. All logic lives in the library.

use clientsheet::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
