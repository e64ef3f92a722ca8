//! Line-oriented console front end for the user service.
//!
//! The menu reads from any `BufRead` and writes to any `Write`, so the binary
//! wires it to stdin/stdout and tests feed it a `Cursor`.

pub mod menu;

pub use menu::{ConsoleError, ConsoleMenu};
