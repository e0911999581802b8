//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::util::errors::CiError;

/// Builder for subprocess execution.
///
/// Commands run with inherited stdio so tool output streams straight into
/// the CI log.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self) -> Result<Command> {
        let program = find_executable(&self.program).ok_or_else(|| CiError::ToolNotFound {
            program: self.program.display().to_string(),
        })?;

        let mut cmd = Command::new(program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        Ok(cmd)
    }

    /// Run to completion and require a zero exit status.
    pub fn run(&self) -> Result<()> {
        tracing::debug!("running `{}`", self.display_command());

        let status = self
            .build_command()?
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;

        if !status.success() {
            return Err(CiError::SubprocessFailed {
                command: self.display_command(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Resolve a program name through PATH; paths are used as-is.
pub fn find_executable(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.exists().then(|| program.to_path_buf());
    }
    which::which(program).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("kiwix-build").args(["libzim", "--hide-progress"]);

        assert_eq!(pb.display_command(), "kiwix-build libzim --hide-progress");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_success() {
        ProcessBuilder::new("true").run().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_run_failure_is_subprocess_error() {
        let err = ProcessBuilder::new("false").run().unwrap_err();
        match err.downcast_ref::<CiError>() {
            Some(CiError::SubprocessFailed { command, code }) => {
                assert_eq!(command, "false");
                assert_eq!(*code, Some(1));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_tool() {
        let err = ProcessBuilder::new("kiwix-ci-no-such-tool").run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CiError>(),
            Some(CiError::ToolNotFound { .. })
        ));
    }
}
