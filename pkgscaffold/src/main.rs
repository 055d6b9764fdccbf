//! Minimal Python package scaffolder.
//!
//! Writes `<base>/<name>/setup.py` and `<base>/<name>/<package>/{__init__,<package>}.py`,
//! and can run the editable install and an import check afterwards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use pkgscaffold::exit_codes;
use pkgscaffold::install::{check_import, install_project};
use pkgscaffold::io::config::{ScaffoldConfig, load_config, render_config, write_config};
use pkgscaffold::io::paths::ProjectPaths;
use pkgscaffold::io::toolchain::{SystemToolchain, ToolOutcome};
use pkgscaffold::logging;
use pkgscaffold::scaffold::scaffold_project;

#[derive(Parser)]
#[command(
    name = "pkgscaffold",
    version,
    about = "Scaffold a minimal installable Python package"
)]
struct Cli {
    /// Directory the project is created in.
    #[arg(long, global = true, env = "PKGSCAFFOLD_BASE_DIR")]
    base: Option<PathBuf>,

    /// Config file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "pkgscaffold.toml")]
    config: PathBuf,

    /// Project directory and distribution name.
    #[arg(long, global = true)]
    name: Option<String>,

    /// Package directory and module name.
    #[arg(long, global = true)]
    package: Option<String>,

    /// Version written into `setup.py`.
    #[arg(long, global = true)]
    pkg_version: Option<String>,

    /// Function defined by the module and re-exported by `__init__.py`.
    #[arg(long, global = true)]
    function: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write `setup.py`, `__init__.py` and the module (overwrites existing files).
    New {
        /// Print a JSON report instead of one line per file.
        #[arg(long)]
        json: bool,
    },
    /// Run the install command (default `pip install -e .`) in the project directory.
    Install,
    /// Import the package and call its function with the configured interpreter.
    Check,
    /// Print the effective configuration as TOML.
    Config {
        /// Save it to the `--config` path instead of printing.
        #[arg(long)]
        write: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return Ok(report_usage(&err)),
    };
    let cfg = effective_config(&cli)?;
    let base = match &cli.base {
        Some(base) => base.clone(),
        None => std::env::current_dir().context("resolve current directory")?,
    };

    match cli.command {
        Command::New { json } => cmd_new(&base, &cfg, json),
        Command::Install => {
            let paths = ProjectPaths::new(&base, &cfg.project.name, &cfg.project.package);
            let outcome = install_project(&paths, &cfg, &SystemToolchain)?;
            Ok(report_tool("install", &outcome))
        }
        Command::Check => {
            let outcome = check_import(&cfg, &SystemToolchain)?;
            Ok(report_tool("check", &outcome))
        }
        Command::Config { write: false } => {
            print!("{}", render_config(&cfg)?);
            Ok(exit_codes::OK)
        }
        Command::Config { write: true } => {
            write_config(&cli.config, &cfg)?;
            println!("wrote {}", cli.config.display());
            Ok(exit_codes::OK)
        }
    }
}

/// Config file values with command-line overrides applied on top.
fn effective_config(cli: &Cli) -> Result<ScaffoldConfig> {
    let mut cfg = load_config(&cli.config)?;
    if let Some(name) = &cli.name {
        cfg.project.name = name.clone();
    }
    if let Some(package) = &cli.package {
        cfg.project.package = package.clone();
    }
    if let Some(version) = &cli.pkg_version {
        cfg.project.version = version.clone();
    }
    if let Some(function) = &cli.function {
        cfg.project.function = function.clone();
    }
    Ok(cfg)
}

fn cmd_new(base: &std::path::Path, cfg: &ScaffoldConfig, json: bool) -> Result<i32> {
    let report = scaffold_project(base, &cfg.project)?;
    if json {
        let payload = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{payload}");
    } else {
        for file in &report.files {
            println!("wrote {}", file.path.display());
        }
    }
    Ok(exit_codes::OK)
}

/// Print clap's message; help and version are not failures.
fn report_usage(err: &clap::Error) -> i32 {
    // Nothing useful to do if stdout/stderr are gone.
    let _ = err.print();
    usage_exit_code(err.kind())
}

fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::OK,
        _ => exit_codes::INVALID,
    }
}

fn report_tool(step: &str, outcome: &ToolOutcome) -> i32 {
    print!("{}", outcome.stdout);
    eprint!("{}", outcome.stderr);
    if outcome.timed_out {
        eprintln!("{step}: timed out");
        exit_codes::TOOL_TIMED_OUT
    } else if outcome.success() {
        exit_codes::OK
    } else {
        match outcome.exit_code {
            Some(code) => eprintln!("{step}: exited with code {code}"),
            None => eprintln!("{step}: terminated by signal"),
        }
        exit_codes::TOOL_FAILED
    }
}
