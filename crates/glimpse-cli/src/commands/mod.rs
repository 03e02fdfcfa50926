//! CLI command implementations for glimpse.
//!
//! Each module corresponds to a subcommand (`glimpse <command>`).

pub mod check;
pub mod init;
pub mod render;
