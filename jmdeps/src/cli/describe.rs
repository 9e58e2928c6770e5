use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use jmdeps_common::config::Config;
use jmdeps_common::error::Result;
use jmdeps_common::ModuleDescriptor;
use jmdeps_core::resolver::scope_for;
use jmdeps_core::SourceSet;
use prettytable::{format, Cell, Row, Table};

#[derive(Args, Debug)]
pub struct Describe {
    /// Path to a module descriptor
    pub descriptor: PathBuf,

    /// Show scopes as if the descriptor belonged to the test sources
    #[arg(long)]
    pub test: bool,

    /// Print the parsed descriptor as JSON
    #[arg(long, conflicts_with = "test")]
    pub json: bool,
}

impl Describe {
    pub fn run(&self, _config: &Config) -> Result<()> {
        let descriptor = ModuleDescriptor::from_file(&self.descriptor)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            return Ok(());
        }

        if descriptor.is_empty() {
            println!("{}", "No module declaration found".yellow());
            return Ok(());
        }

        println!("{} {}", "module".bold(), descriptor.module_name());
        let source_set = if self.test {
            SourceSet::Test
        } else {
            SourceSet::Main
        };

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Directive").style_spec("b"),
            Cell::new("Module").style_spec("b"),
            Cell::new("Scope").style_spec("b"),
        ]));
        let mut count = 0;
        for (kind, module_name) in descriptor.directives() {
            table.add_row(Row::new(vec![
                Cell::new(&kind.to_string()),
                Cell::new(module_name),
                Cell::new(&scope_for(source_set, kind).to_string()),
            ]));
            count += 1;
        }

        if count == 0 {
            println!("  {}", "no requires directives".dimmed());
        } else {
            table.printstd();
        }
        Ok(())
    }
}
