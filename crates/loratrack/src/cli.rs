//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// LoRaTrack - utilities for LoRaWAN tracker devices
#[derive(Parser, Debug)]
#[command(name = "loratrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// Upgrade the CLI to the latest release
    Upgrade(UpgradeArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Upgrade command
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Check for updates only
    #[arg(long, conflicts_with = "list")]
    pub check: bool,

    /// List available versions
    #[arg(long)]
    pub list: bool,

    /// Include prereleases
    #[arg(long)]
    pub prerelease: bool,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
