pub mod commands;
pub mod report;

pub use commands::{Cli, USAGE};
pub use report::handle_report;
