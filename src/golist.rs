//! Module list source: `go list -mod=readonly -m all`
//!
//! Produces the newline-separated `<module path> [<version>]` records that
//! the resolver consumes, either from the go tool or from standard input.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

const GO_PROGRAM: &str = "go";
const GO_LIST_ARGS: &[&str] = &["list", "-mod=readonly", "-m", "all"];

#[derive(Error, Debug)]
pub enum GoListError {
    #[error("unable to find `go` in PATH={path}")]
    GoNotFound { path: String },

    #[error("Directory {} does not exist", .0.display())]
    NoDirectory(PathBuf),

    #[error("Failed to execute {}: {source}", .program.display())]
    Exec {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Error executing {}: {stderr}", .program.display())]
    CommandFailed { program: PathBuf, stderr: String },

    #[error("Failed to read module list from stdin: {0}")]
    Stdin(std::io::Error),
}

/// The go command line, for diagnostics
pub fn command_line() -> String {
    format!("{} {}", GO_PROGRAM, GO_LIST_ARGS.join(" "))
}

/// Run `go list -mod=readonly -m all`, optionally inside `dir`
pub fn list_modules(dir: Option<&Path>) -> Result<String, GoListError> {
    if let Some(dir) = dir
        && !dir.is_dir()
    {
        return Err(GoListError::NoDirectory(dir.to_path_buf()));
    }

    let program = which::which(GO_PROGRAM).map_err(|_| GoListError::GoNotFound {
        path: std::env::var("PATH").unwrap_or_default(),
    })?;

    let mut command = Command::new(&program);
    command.args(GO_LIST_ARGS);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }

    debug!(program = %program.display(), dir = ?dir, "running {}", command_line());
    let output = command.output().map_err(|source| GoListError::Exec {
        program: program.clone(),
        source,
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GoListError::CommandFailed {
            program,
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Read a module list produced elsewhere
pub fn read_modules<R: Read>(mut reader: R) -> Result<String, GoListError> {
    let mut listing = String::new();
    reader
        .read_to_string(&mut listing)
        .map_err(GoListError::Stdin)?;
    Ok(listing)
}
