//! Generic utility primitives with zero domain knowledge.
//!
//! - `artifact` - Glob-based artifact copying
//! - `command` - External command execution behind an injectable runner
//! - `io` - File I/O with consistent error handling

pub mod artifact;
pub mod command;
pub mod io;
