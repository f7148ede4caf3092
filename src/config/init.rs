// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates stevedore.yml template files.

use std::path::Path;

use crate::client::DEFAULT_DOCKER_CLIENT;
use crate::error::{Error, Result};
use crate::overrides::{ENVIRONMENT_PROPERTY, EXECUTABLE_PROPERTY, env_var_name};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, executable: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let executable = executable.unwrap_or(DEFAULT_DOCKER_CLIENT);
    if executable.trim().is_empty() {
        return Err(Error::InvalidConfig(
            "executable cannot be empty".to_string(),
        ));
    }

    std::fs::write(&config_path, generate_template_yaml(executable))?;
    Ok(())
}

fn generate_template_yaml(executable: &str) -> String {
    format!(
        r#"docker_client:
  executable: {executable}
  # Variables added to the client's environment.
  # environment:
  #   DOCKER_HOST: unix:///var/run/docker.sock
  #   DOCKER_CONFIG:
  #     env: HOME
  #
  # Per-invocation overrides take precedence over this file:
  #   {env_exec}=/usr/local/bin/podman
  #   {env_env}=DOCKER_HOST=tcp://localhost:2375
  # or on the command line: -D {exec_prop}=... -D {env_prop}=...
"#,
        env_exec = env_var_name(EXECUTABLE_PROPERTY),
        env_env = env_var_name(ENVIRONMENT_PROPERTY),
        exec_prop = EXECUTABLE_PROPERTY,
        env_prop = ENVIRONMENT_PROPERTY,
    )
}
