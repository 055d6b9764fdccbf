//! I/O helpers for pkgscaffold commands.

pub mod config;
pub mod emit;
pub mod paths;
pub mod process;
pub mod templates;
pub mod toolchain;
