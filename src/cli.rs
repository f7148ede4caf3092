// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stevedore")]
#[command(about = "Resolve the executable and environment for Docker and Podman clients")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stevedore.yml configuration file
    Init {
        /// Client executable to write into the template
        #[arg(long)]
        executable: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective client executable and environment
    Resolve {
        /// Configuration file (default: discovered in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override property, e.g. -D stevedore.dockerClient.executable=podman
        #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_key_val)]
        define: Vec<(String, String)>,

        /// Explicit client executable (replaces the file's value)
        #[arg(long)]
        executable: Option<PathBuf>,

        /// Explicit client environment variable (replaces the file's map)
        #[arg(short, long = "env", value_name = "NAME=VALUE", value_parser = parse_key_val)]
        env: Vec<(String, String)>,

        /// Print a single JSON object
        #[arg(long, conflicts_with = "quiet")]
        json: bool,

        /// Print only the executable
        #[arg(short, long)]
        quiet: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}
