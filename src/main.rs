// ABOUTME: Entry point for the stevedore CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use stevedore::config::{self, ProjectConfig};
use stevedore::error::{Error, Result};
use stevedore::output::{Output, OutputMode};
use stevedore::overrides::{Layered, ProcessEnv};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(output_mode(&cli.command));

    if let Err(e) = run(cli, &output) {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn output_mode(command: &Commands) -> OutputMode {
    match command {
        Commands::Resolve { json: true, .. } => OutputMode::Json,
        Commands::Resolve { quiet: true, .. } => OutputMode::Quiet,
        _ => OutputMode::Normal,
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init { executable, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, executable.as_deref(), force)?;
            println!("Created {}", config::CONFIG_FILENAME);
            Ok(())
        }
        Commands::Resolve {
            config,
            define,
            executable,
            env: vars,
            ..
        } => resolve(config, define, executable, vars, output),
    }
}

/// Resolve the client settings for the current project.
fn resolve(
    config_path: Option<PathBuf>,
    define: Vec<(String, String)>,
    executable: Option<PathBuf>,
    vars: Vec<(String, String)>,
    output: &Output,
) -> Result<()> {
    let project = match config_path {
        Some(path) => ProjectConfig::load(&path)?,
        None => match ProjectConfig::discover(&env::current_dir()?) {
            Ok(project) => project,
            Err(Error::ConfigNotFound(dir)) => {
                tracing::debug!(dir = %dir.display(), "no project configuration, using defaults");
                ProjectConfig::default()
            }
            Err(e) => return Err(e),
        },
    };

    // Command-line properties shadow the process environment.
    let properties: HashMap<String, String> = define.into_iter().collect();
    let mut params = project.into_parameters(Layered::new(properties, ProcessEnv))?;

    if let Some(executable) = executable {
        params.set_executable(executable);
    }
    if !vars.is_empty() {
        params.set_environment(vars);
    }

    let resolution = params.resolve()?;

    // Validation only: fail on variables a child process cannot receive
    // before anything is printed.
    resolution.configuration()?;

    output.report(&resolution)
}
