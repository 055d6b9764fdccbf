//! External host tools (installer, interpreter).
//!
//! The [`Toolchain`] trait decouples the install and import steps from the
//! actual process spawning. Tests use scripted toolchains that record requests
//! and return canned outcomes without spawning anything.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::io::process::run_tool;

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    /// Working directory for the child.
    pub workdir: PathBuf,
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    pub timeout: Duration,
    pub output_limit_bytes: usize,
}

/// What happened when a tool ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutcome {
    /// `None` when the child was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ToolOutcome {
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Abstraction over spawning host tools.
pub trait Toolchain {
    fn run(&self, request: &ToolRequest) -> Result<ToolOutcome>;
}

/// Toolchain that spawns real processes.
pub struct SystemToolchain;

impl Toolchain for SystemToolchain {
    fn run(&self, request: &ToolRequest) -> Result<ToolOutcome> {
        info!(argv = ?request.argv, workdir = %request.workdir.display(), "running tool");
        run_tool(request)
    }
}
