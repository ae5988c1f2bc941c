pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect and safely delete keys held in a local key store.
#[derive(Parser, Debug)]
#[command(name = "keybox", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the key stores, config and audit log
    #[arg(long, global = true, env = "KEYBOX_HOME")]
    pub home: Option<PathBuf>,

    /// Use the deprecated on-disk secret store instead of the OS keyring
    #[arg(long, global = true)]
    pub legacy: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors and status lines
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete the given key
    ///
    /// Removing offline or ledger keys only removes the public key
    /// reference stored locally; private keys held on another machine or
    /// on a Ledger device cannot be deleted with this tool.
    ///
    /// With --legacy, the passphrase of a local key is read as a plain
    /// line from stdin and is visible on screen as you type it.
    Delete {
        /// Name of the key to delete
        name: String,
        /// Skip confirmation prompt when deleting offline or ledger key references
        #[arg(short, long)]
        yes: bool,
        /// Remove the key unconditionally without asking for the passphrase
        #[arg(short, long)]
        force: bool,
    },

    /// List all keys in the store
    List,

    /// Show details of a single key
    Show {
        /// Name of the key to show
        name: String,
    },

    /// Show the deletion history
    Log {
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}
