//! Scaffold configuration (TOML).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Scaffold configuration.
///
/// Every field is optional in the file; missing fields fall back to the
/// `helloworld` defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub project: ProjectSpec,
    pub install: InstallConfig,
    pub check: CheckConfig,
}

/// Names and version baked into the three payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectSpec {
    /// Project directory and distribution name.
    pub name: String,
    /// Package directory and module file name.
    pub package: String,
    pub version: String,
    /// Function defined by the module and re-exported by `__init__.py`.
    pub function: String,
}

impl Default for ProjectSpec {
    fn default() -> Self {
        Self {
            name: "helloworld".to_string(),
            package: "helloworld".to_string(),
            version: "0.1".to_string(),
            function: "say_hello".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallConfig {
    /// Command run inside the project directory (e.g. `["pip","install","-e","."]`).
    pub command: Vec<String>,

    /// Wall-clock budget for the install command in seconds.
    pub timeout_secs: u64,

    /// Truncate captured stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "pip".to_string(),
                "install".to_string(),
                "-e".to_string(),
                ".".to_string(),
            ],
            timeout_secs: 5 * 60,
            output_limit_bytes: 100_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckConfig {
    /// Interpreter used for the post-install import.
    pub interpreter: String,
    pub timeout_secs: u64,
    pub output_limit_bytes: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            interpreter: "python".to_string(),
            timeout_secs: 60,
            output_limit_bytes: 100_000,
        }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.install.command.is_empty() || self.install.command[0].trim().is_empty() {
            return Err(anyhow!("install.command must be a non-empty array"));
        }
        if self.install.timeout_secs == 0 {
            return Err(anyhow!("install.timeout_secs must be > 0"));
        }
        if self.install.output_limit_bytes == 0 {
            return Err(anyhow!("install.output_limit_bytes must be > 0"));
        }
        if self.check.interpreter.trim().is_empty() {
            return Err(anyhow!("check.interpreter must be non-empty"));
        }
        if self.check.timeout_secs == 0 {
            return Err(anyhow!("check.timeout_secs must be > 0"));
        }
        if self.check.output_limit_bytes == 0 {
            return Err(anyhow!("check.output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ScaffoldConfig::default()`.
pub fn load_config(path: &Path) -> Result<ScaffoldConfig> {
    if !path.exists() {
        return Ok(ScaffoldConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<ScaffoldConfig> {
    let cfg: ScaffoldConfig = toml::from_str(contents)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Serialize config as pretty TOML with a trailing newline.
pub fn render_config(cfg: &ScaffoldConfig) -> Result<String> {
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    if !buf.ends_with('\n') {
        buf.push('\n');
    }
    Ok(buf)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ScaffoldConfig) -> Result<()> {
    cfg.validate()?;
    let buf = render_config(cfg)?;
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
