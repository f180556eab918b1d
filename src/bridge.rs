//! adb invocation boundary
//!
//! Every device operation is described by a [`BridgeCommand`] and executed by a
//! [`Bridge`]. The real implementation shells out to `adb`; tests inject a fake.

use std::path::PathBuf;
use std::process::Command;

use crate::error::BridgeError;
use crate::listing::DirectoryEntry;

/// One operation against the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    /// Remote `[ -e path ]` test.
    Exists(String),
    /// Remote `ls -F path`.
    List(String),
    Push { local: String, remote: String },
    Pull { remote: String, local: String },
}

impl BridgeCommand {
    /// Render the argv passed to adb (without the program and `-s` selector).
    pub fn args(&self) -> Vec<String> {
        match self {
            BridgeCommand::Exists(path) => vec![
                "shell".into(),
                format!(
                    "[ -e {} ] && echo exists || echo notfound",
                    shell_quote(path)
                ),
            ],
            BridgeCommand::List(path) => {
                vec!["shell".into(), format!("ls -F {} 2>/dev/null", shell_quote(path))]
            }
            BridgeCommand::Push { local, remote } => {
                vec!["push".into(), local.clone(), remote.clone()]
            }
            BridgeCommand::Pull { remote, local } => {
                vec!["pull".into(), remote.clone(), local.clone()]
            }
        }
    }
}

/// Executes bridge commands and returns their stdout.
pub trait Bridge {
    fn run(&self, command: &BridgeCommand) -> Result<String, BridgeError>;
}

/// Blocking `adb` subprocess bridge.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
    serial: Option<String>,
}

impl AdbBridge {
    pub fn new(program: impl Into<PathBuf>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
        }
    }

    fn argv(&self, command: &BridgeCommand) -> Vec<String> {
        let mut argv = Vec::new();
        if let Some(serial) = &self.serial {
            argv.push("-s".to_string());
            argv.push(serial.clone());
        }
        argv.extend(command.args());
        argv
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new("adb", None)
    }
}

impl Bridge for AdbBridge {
    fn run(&self, command: &BridgeCommand) -> Result<String, BridgeError> {
        let argv = self.argv(command);
        let program = self.program.display().to_string();
        let command_line = format!("{} {}", program, argv.join(" "));
        log::debug!("bridge: {}", command_line);

        let output = Command::new(&self.program)
            .args(&argv)
            .output()
            .map_err(|source| BridgeError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        log::debug!("bridge failed ({}): {}", output.status, detail);
        Err(BridgeError::Failed {
            command: command_line,
            status: output.status.to_string(),
            output: detail,
        })
    }
}

/// Quote a path for the device shell.
pub fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// Parse `ls -F` output; a trailing `/` marks a directory.
pub fn parse_listing(stdout: &str) -> Vec<DirectoryEntry> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.strip_suffix('/') {
            Some(name) => DirectoryEntry::new(name, true),
            None => DirectoryEntry::new(line, false),
        })
        .collect()
}

/// Whether the existence test printed its positive token.
pub fn exists_in_output(stdout: &str) -> bool {
    stdout.lines().any(|line| line.trim() == "exists")
}
