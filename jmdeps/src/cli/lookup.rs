use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use jmdeps_common::config::Config;
use jmdeps_common::error::Result;
use jmdeps_common::mapping::{ModuleMappings, OverrideMappings, SharedMappings};
use jmdeps_common::platform;
use jmdeps_core::Warning;
use prettytable::{format, Cell, Row, Table};

/// Where a module name resolves, modules built locally aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Platform,
    Override(String),
    Shared(String),
    Missing,
}

#[derive(Args, Debug)]
pub struct Lookup {
    /// Module names to look up
    #[arg(required = true)]
    pub modules: Vec<String>,

    /// Multi-module root holding the override mappings
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl Lookup {
    pub fn run(&self, config: &Config) -> Result<()> {
        let config = match &self.root {
            Some(root) => config.clone().with_root(root),
            None => config.clone(),
        };
        let overrides = OverrideMappings::load(&config.override_mappings_path())?;
        let shared = SharedMappings::global()?;

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Module").style_spec("b"),
            Cell::new("Source").style_spec("b"),
            Cell::new("Mapping").style_spec("b"),
        ]));

        let mut missing = Vec::new();
        for module_name in &self.modules {
            let (source, mapping) = match lookup(module_name, &overrides, shared) {
                MappingSource::Platform => ("platform", String::new()),
                MappingSource::Override(mapping) => ("override", mapping),
                MappingSource::Shared(mapping) => ("shared", mapping),
                MappingSource::Missing => {
                    missing.push(Warning::MissingMapping {
                        module: module_name.clone(),
                    });
                    ("missing", String::new())
                }
            };
            table.add_row(Row::new(vec![
                Cell::new(module_name),
                Cell::new(source),
                Cell::new(&mapping),
            ]));
        }
        table.printstd();

        for warning in &missing {
            println!("{} {}", "Warning:".yellow().bold(), warning);
        }
        Ok(())
    }
}

/// Applies the same precedence as resolution, minus the local module index.
pub fn lookup(
    module_name: &str,
    overrides: &dyn ModuleMappings,
    shared: &dyn ModuleMappings,
) -> MappingSource {
    if platform::is_platform_module(module_name) {
        MappingSource::Platform
    } else if let Some(mapping) = overrides.get(module_name) {
        MappingSource::Override(mapping.to_string())
    } else if let Some(mapping) = shared.get(module_name) {
        MappingSource::Shared(mapping.to_string())
    } else {
        MappingSource::Missing
    }
}
