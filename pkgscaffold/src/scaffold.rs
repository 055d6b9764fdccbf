//! Orchestration for `pkgscaffold new`.
//!
//! Renders the three payloads, creates `<base>/<name>/<package>`, then writes
//! `setup.py`, `__init__.py` and the module in that order. Nothing is rolled
//! back if a later write fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument};

use crate::io::config::ProjectSpec;
use crate::io::emit::{emit_file, materialize_dirs};
use crate::io::paths::ProjectPaths;
use crate::io::templates::{Payload, Templates};

/// Outcome of `pkgscaffold new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub package_dir: PathBuf,
    pub files: Vec<EmittedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    pub payload: Payload,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Write the package described by `spec` under `base`.
///
/// Safe to re-run: directories are reused and every file is overwritten.
#[instrument(skip_all, fields(base = %base.display(), name = %spec.name, package = %spec.package))]
pub fn scaffold_project(base: &Path, spec: &ProjectSpec) -> Result<ScaffoldReport> {
    let paths = ProjectPaths::new(base, &spec.name, &spec.package);
    let templates = Templates::new()?;

    // All payloads are rendered before anything touches the disk.
    let rendered = Payload::ALL
        .iter()
        .map(|&payload| templates.render(payload, spec).map(|text| (payload, text)))
        .collect::<Result<Vec<_>>>()?;

    materialize_dirs(&paths.package_dir).context("create package directory")?;

    let mut files = Vec::with_capacity(rendered.len());
    for (payload, contents) in rendered {
        let path = paths.target(payload);
        let bytes = emit_file(path, &contents)?;
        files.push(EmittedFile {
            payload,
            path: path.to_path_buf(),
            bytes,
        });
    }

    info!(project_dir = %paths.project_dir.display(), files = files.len(), "scaffold written");
    Ok(ScaffoldReport {
        project_dir: paths.project_dir,
        package_dir: paths.package_dir,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SETUP_PY: &str = "from setuptools import setup\n\nsetup(\n    name=\"helloworld\",\n    version=\"0.1\",\n    packages=[\"helloworld\"],\n)\n";
    const INIT_PY: &str = "from .helloworld import say_hello\n";
    const MODULE_PY: &str = "def say_hello():\n    print(\"Hello, World!\")\n";

    fn read(path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }

    #[test]
    fn writes_helloworld_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path();

        let report = scaffold_project(base, &ProjectSpec::default()).expect("scaffold");

        assert!(base.join("helloworld").join("helloworld").is_dir());
        assert_eq!(read(&base.join("helloworld/setup.py")), SETUP_PY);
        assert_eq!(read(&base.join("helloworld/helloworld/__init__.py")), INIT_PY);
        assert_eq!(read(&base.join("helloworld/helloworld/helloworld.py")), MODULE_PY);

        assert_eq!(report.project_dir, base.join("helloworld"));
        let payloads: Vec<Payload> = report.files.iter().map(|file| file.payload).collect();
        assert_eq!(payloads, Payload::ALL.to_vec());
        assert_eq!(report.files[0].bytes, SETUP_PY.len());
    }

    #[test]
    fn rerun_overwrites_without_accumulating() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path();
        scaffold_project(base, &ProjectSpec::default()).expect("first");

        let init_path = base.join("helloworld/helloworld/__init__.py");
        fs::write(&init_path, "# local edit that is longer than the payload\n").expect("edit");

        scaffold_project(base, &ProjectSpec::default()).expect("second");
        assert_eq!(read(&init_path), INIT_PY);
        assert_eq!(read(&base.join("helloworld/setup.py")), SETUP_PY);
    }

    #[test]
    fn leaves_unrelated_files_alone() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path();
        let package_dir = base.join("helloworld/helloworld");
        fs::create_dir_all(&package_dir).expect("pre-create");
        fs::write(package_dir.join("extra.py"), "x = 1\n").expect("write extra");

        scaffold_project(base, &ProjectSpec::default()).expect("scaffold");
        assert_eq!(read(&package_dir.join("extra.py")), "x = 1\n");
    }

    #[test]
    fn custom_spec_lands_at_custom_paths() {
        let temp = tempfile::tempdir().expect("tempdir");
        let spec = ProjectSpec {
            name: "greeter-dist".to_string(),
            package: "greeter".to_string(),
            version: "1.2.3".to_string(),
            function: "greet".to_string(),
        };
        let report = scaffold_project(temp.path(), &spec).expect("scaffold");

        let module = temp.path().join("greeter-dist/greeter/greeter.py");
        assert!(module.is_file());
        assert!(read(&module).starts_with("def greet():"));
        assert_eq!(report.package_dir, temp.path().join("greeter-dist/greeter"));
    }

    #[test]
    fn blocked_package_dir_fails_with_context() {
        let temp = tempfile::tempdir().expect("tempdir");
        let project_dir = temp.path().join("helloworld");
        fs::create_dir_all(&project_dir).expect("project dir");
        fs::write(project_dir.join("helloworld"), "not a directory").expect("blocker");

        let err = scaffold_project(temp.path(), &ProjectSpec::default()).expect_err("blocked");
        assert!(format!("{err:#}").contains("create package directory"));
        assert!(!project_dir.join("setup.py").exists());
    }
}
