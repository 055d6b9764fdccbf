//! Post-scaffold steps: editable install and import check.
//!
//! Both run host tools through a [`Toolchain`]; neither retries. What the tools
//! do (dependency resolution, the import system) is entirely theirs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::{info, instrument, warn};

use crate::io::config::ScaffoldConfig;
use crate::io::paths::ProjectPaths;
use crate::io::toolchain::{ToolOutcome, ToolRequest, Toolchain};

/// Run the configured install command inside the project directory.
#[instrument(skip_all, fields(project_dir = %paths.project_dir.display()))]
pub fn install_project(
    paths: &ProjectPaths,
    cfg: &ScaffoldConfig,
    toolchain: &dyn Toolchain,
) -> Result<ToolOutcome> {
    if !paths.setup_path.is_file() {
        bail!(
            "no build descriptor at {} (run `pkgscaffold new` first)",
            paths.setup_path.display()
        );
    }
    let request = install_request(paths, cfg);
    let outcome = toolchain.run(&request)?;
    log_outcome("install", &outcome);
    Ok(outcome)
}

/// Import the package and call its function from outside the project tree.
#[instrument(skip_all, fields(package = %cfg.project.package))]
pub fn check_import(cfg: &ScaffoldConfig, toolchain: &dyn Toolchain) -> Result<ToolOutcome> {
    let request = check_request(cfg, std::env::temp_dir());
    let outcome = toolchain.run(&request)?;
    log_outcome("check", &outcome);
    Ok(outcome)
}

pub fn install_request(paths: &ProjectPaths, cfg: &ScaffoldConfig) -> ToolRequest {
    ToolRequest {
        workdir: paths.project_dir.clone(),
        argv: cfg.install.command.clone(),
        timeout: Duration::from_secs(cfg.install.timeout_secs),
        output_limit_bytes: cfg.install.output_limit_bytes,
    }
}

pub fn check_request(cfg: &ScaffoldConfig, workdir: PathBuf) -> ToolRequest {
    ToolRequest {
        workdir,
        argv: vec![
            cfg.check.interpreter.clone(),
            "-c".to_string(),
            import_snippet(&cfg.project.package, &cfg.project.function),
        ],
        timeout: Duration::from_secs(cfg.check.timeout_secs),
        output_limit_bytes: cfg.check.output_limit_bytes,
    }
}

fn import_snippet(package: &str, function: &str) -> String {
    format!("from {package} import {function}; {function}()")
}

fn log_outcome(step: &str, outcome: &ToolOutcome) {
    if outcome.timed_out {
        warn!(step, "tool timed out");
    } else if outcome.success() {
        info!(step, "tool succeeded");
    } else {
        warn!(step, exit_code = ?outcome.exit_code, "tool failed");
    }
}
