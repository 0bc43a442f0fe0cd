//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DescribeRecord, OrgChartBuilder};
use crate::render::render;
use crate::scenario::{run_demo, Attachment};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load(cli.config_file.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    if !settings.color {
        colored::control::set_override(false);
    }
    debug!("settings: {:?}", settings);

    match &cli.command {
        Commands::Demo { corrected } => _demo(&settings, *corrected),
        Commands::Show { file, root } => _show(&settings, file, root.as_deref()),
        Commands::Check { file } => _check(file),
        Commands::Config { command } => _config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn emit(settings: &Settings, records: &[DescribeRecord]) -> CliResult<()> {
    let mut rendered = render(records, settings.format, &settings.indent)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    output::info(&rendered);
    Ok(())
}

#[instrument(skip(settings))]
fn _demo(settings: &Settings, corrected: bool) -> CliResult<()> {
    let attachment = if corrected {
        Attachment::Corrected
    } else {
        Attachment::AsShipped
    };
    let sections = run_demo(attachment)?;
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            output::separator();
        }
        output::header(&section.heading);
        emit(settings, &section.records)?;
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _show(settings: &Settings, file: &Path, root: Option<&str>) -> CliResult<()> {
    let chart = OrgChartBuilder::new().build_from_path(file)?;
    let roots = match root {
        Some(key) => vec![chart.lookup(key)?],
        None => chart.roots.clone(),
    };
    for id in roots {
        let records = chart.tree.describe(id)?;
        emit(settings, &records)?;
    }
    Ok(())
}

#[instrument]
fn _check(file: &Path) -> CliResult<()> {
    let chart = OrgChartBuilder::new().build_from_path(file)?;
    output::success(&format!(
        "{}: {} entities, {} root(s)",
        file.display(),
        chart.tree.len(),
        chart.roots.len()
    ));
    for &id in &chart.roots {
        let employee = chart.tree.employee(id)?;
        output::detail(&format!(
            "{} (depth {}, {} leaves)",
            employee.name,
            chart.tree.depth(id)?,
            chart.tree.leaves(id)?.len()
        ));
    }
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&format!("{}\n", path.display())),
            None => return Err(CliError::Usage("no home directory".to_string())),
        },
    }
    Ok(())
}
