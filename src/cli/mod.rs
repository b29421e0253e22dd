//! Command-line interface for building and inspecting documents.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, KindArg};

/// Report a failed command and exit non-zero
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{body}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1)
}
