//! Rendering behind the `morny-cli` binary.

pub mod output;

/// Input the original demo program fed to the lexer.
pub const DEMO_SOURCE: &str = "3.5346 34f 36 (36) ";

/// Maximum source file size in bytes (1MB)
pub const MAX_SOURCE_SIZE: usize = 1_000_000;
