//! Canonical paths of a scaffolded project.

use std::path::{Path, PathBuf};

use crate::io::templates::Payload;

/// All paths written by `pkgscaffold new` for one project.
///
/// Built with plain `Path::join`: names are not checked for legality and are
/// not normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project_dir: PathBuf,
    pub package_dir: PathBuf,
    pub setup_path: PathBuf,
    pub init_path: PathBuf,
    pub module_path: PathBuf,
}

impl ProjectPaths {
    pub fn new(base: impl AsRef<Path>, name: &str, package: &str) -> Self {
        let project_dir = base.as_ref().join(name);
        let package_dir = project_dir.join(package);
        Self {
            setup_path: project_dir.join("setup.py"),
            init_path: package_dir.join("__init__.py"),
            module_path: package_dir.join(format!("{package}.py")),
            project_dir,
            package_dir,
        }
    }

    /// Target file for a payload.
    pub fn target(&self, payload: Payload) -> &Path {
        match payload {
            Payload::BuildDescriptor => &self.setup_path,
            Payload::PackageInit => &self.init_path,
            Payload::Module => &self.module_path,
        }
    }
}
