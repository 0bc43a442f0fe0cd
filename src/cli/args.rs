//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::render::OutputFormat;

/// Composite org-unit tree: build, describe and prune an organization chart
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file layered over the global config
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "ORGTREE_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scripted demo: describe, remove a manager, describe again
    Demo {
        /// Attach the compensation committee to Alex instead of Peter
        #[arg(long)]
        corrected: bool,
    },

    /// Load an org chart and describe its roots
    Show {
        /// Org chart TOML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Describe only the entity with this key
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Validate an org chart and print a summary
    Check {
        /// Org chart TOML file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
