// ABOUTME: Output formatting for resolved client settings.
// ABOUTME: Supports normal, quiet (scripts), and JSON output modes.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::resolver::Resolution;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly listing with the tier each value came from
    Normal,
    /// Only the executable path, for command substitution
    Quiet,
    /// A single JSON object
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Render a resolution. JSON cannot carry a non-UTF-8 executable path, so
    /// that case is an error rather than a lossy rendering.
    pub fn render(&self, report: &Resolution) -> Result<String> {
        let rendered = match self.mode {
            OutputMode::Normal => {
                let mut out = format!(
                    "executable: {} ({})\nenvironment ({}):\n",
                    report.executable.value.display(),
                    report.executable.tier,
                    report.environment.tier,
                );
                for (name, value) in &report.environment.value {
                    out.push_str(&format!("  {name}={value}\n"));
                }
                out
            }
            OutputMode::Quiet => format!("{}\n", report.executable.value.display()),
            OutputMode::Json => {
                let executable = report.executable.value.to_str().ok_or_else(|| {
                    Error::NotUnicode(report.executable.value.clone())
                })?;
                let json = JsonReport {
                    executable,
                    executable_tier: report.executable.tier.to_string(),
                    environment: &report.environment.value,
                    environment_tier: report.environment.tier.to_string(),
                };
                format!("{}\n", serde_json::to_string(&json)?)
            }
        };
        Ok(rendered)
    }

    pub fn report(&self, report: &Resolution) -> Result<()> {
        print!("{}", self.render(report)?);
        Ok(())
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonError {
                    event: "error",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    executable: &'a str,
    executable_tier: String,
    environment: &'a BTreeMap<String, String>,
    environment_tier: String,
}

#[derive(Serialize)]
struct JsonError<'a> {
    event: &'a str,
    message: &'a str,
}
