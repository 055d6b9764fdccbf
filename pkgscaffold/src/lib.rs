//! Scaffolding for a minimal installable Python package.
//!
//! `pkgscaffold` writes a build descriptor (`setup.py`), a package
//! `__init__.py` and a single module under a base directory, then optionally
//! drives the host tools that install and import it.
//!
//! - **[`io`]**: Side-effecting pieces (paths, templates, file writes, config,
//!   child processes).
//! - **[`scaffold`]** and **[`install`]**: Orchestration behind the CLI
//!   commands.

pub mod exit_codes;
pub mod install;
pub mod io;
pub mod logging;
pub mod scaffold;
