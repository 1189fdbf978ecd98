//! Small helpers shared by the CLI.

mod text;

pub use text::terminal_safe;
