//! Text payloads for the three scaffolded files.

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use crate::io::config::ProjectSpec;

const SETUP_TEMPLATE: &str = include_str!("templates/setup.py.j2");
const INIT_TEMPLATE: &str = include_str!("templates/__init__.py.j2");
const MODULE_TEMPLATE: &str = include_str!("templates/module.py.j2");

/// One of the files making up the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// `setup.py` at the project root.
    BuildDescriptor,
    /// `__init__.py` re-exporting the function.
    PackageInit,
    /// `<package>.py` defining the function.
    Module,
}

impl Payload {
    /// Emission order.
    pub const ALL: [Payload; 3] = [Payload::BuildDescriptor, Payload::PackageInit, Payload::Module];

    fn template_name(self) -> &'static str {
        match self {
            Payload::BuildDescriptor => "setup.py",
            Payload::PackageInit => "__init__.py",
            Payload::Module => "module.py",
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(Payload::BuildDescriptor.template_name(), SETUP_TEMPLATE)
            .context("load setup.py template")?;
        env.add_template(Payload::PackageInit.template_name(), INIT_TEMPLATE)
            .context("load __init__.py template")?;
        env.add_template(Payload::Module.template_name(), MODULE_TEMPLATE)
            .context("load module template")?;
        Ok(Self { env })
    }

    /// Render the text of `payload` for `spec`. Values are inserted unescaped.
    pub fn render(&self, payload: Payload, spec: &ProjectSpec) -> Result<String> {
        let name = payload.template_name();
        let template = self.env.get_template(name)?;
        let rendered = template
            .render(context! {
                name => spec.name,
                package => spec.package,
                version => spec.version,
                function => spec.function,
            })
            .with_context(|| format!("render {name}"))?;
        Ok(rendered)
    }
}
