//! # POS Lite Entry Point
//!
//! ```text
//! pos-lite ──► lib.rs::run() ──► cli ► tracing ► config ► runtime ► shell
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    poslite_terminal_lib::run()
}
