// CLI subcommand handlers. main.rs parses arguments and dispatches here.

pub mod demo;
pub mod profile;
pub mod submit;
