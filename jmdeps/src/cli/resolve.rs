use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use jmdeps_common::config::Config;
use jmdeps_common::error::Result;
use jmdeps_core::session::ProjectReport;
use jmdeps_core::{resolve_session, FsDescriptorSource, ResolutionReport};
use prettytable::{format, Cell, Row, Table};

use crate::manifest::SessionManifest;

#[derive(Args, Debug)]
pub struct Resolve {
    /// JSON file describing the projects of the build
    pub manifest: PathBuf,

    /// Multi-module root, overriding the manifest's own
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Resolve {
    pub fn run(&self, config: &Config) -> Result<()> {
        let manifest = SessionManifest::load(&self.manifest)?;
        let root = match &self.root {
            Some(root) => root.clone(),
            None => manifest.root_in(self.manifest.parent().unwrap_or(Path::new("."))),
        };
        tracing::debug!("Resolving session rooted at {}", root.display());

        let config = config.clone().with_root(&root);
        let mut session = manifest.into_session(&root)?;
        let report = resolve_session(&mut session, &config, &FsDescriptorSource::new(&config))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &ResolutionReport) {
    if report.projects.is_empty() {
        println!("{}", "No projects to resolve".yellow());
        return;
    }

    for project in &report.projects {
        println!("{}", project.project.to_string().bold());
        if project.added.is_empty() {
            println!("  {}", "no module dependencies".dimmed());
        } else {
            project_table(project).printstd();
        }
    }

    let warnings: Vec<_> = report.warnings().collect();
    if !warnings.is_empty() {
        println!();
        for (project, warning) in &warnings {
            println!("{} {}: {}", "Warning:".yellow().bold(), project, warning);
        }
    }

    println!(
        "\n{} dependencies added, {} warnings",
        report.added_count().to_string().green(),
        warnings.len()
    );
}

fn project_table(project: &ProjectReport) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.add_row(Row::new(vec![
        Cell::new("Dependency").style_spec("b"),
        Cell::new("Scope").style_spec("b"),
        Cell::new("Classifier").style_spec("b"),
    ]));
    for dependency in &project.added {
        table.add_row(Row::new(vec![
            Cell::new(&format!(
                "{}:{}:{}",
                dependency.group, dependency.artifact, dependency.version
            )),
            Cell::new(&dependency.scope.to_string()),
            Cell::new(dependency.classifier.as_deref().unwrap_or("")),
        ]));
    }
    table
}
