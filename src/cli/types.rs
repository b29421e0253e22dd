//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::models::EntryKind;

#[derive(Parser)]
#[command(name = "appconf")]
#[command(about = "Build and inspect application configuration documents", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Tool settings file (logging, database connect behaviour)
    #[arg(short, long, global = true, env = "APPCONF_SETTINGS")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a document and report the state of every entry
    Check {
        /// Path to the configuration document
        path: PathBuf,
    },

    /// Print the fingerprint of a document without decoding it
    Hash {
        /// Path to the configuration document
        path: PathBuf,
    },

    /// Build a document and show one entry
    Show {
        /// Path to the configuration document
        path: PathBuf,

        /// Collection to look in
        #[arg(value_enum)]
        kind: KindArg,

        /// Entry name
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Database,
    Service,
    Crawler,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Database => Self::Database,
            KindArg::Service => Self::Service,
            KindArg::Crawler => Self::Crawler,
        }
    }
}
