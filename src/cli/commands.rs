//! Command dispatch

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::render::RenderFormat;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => cmd_run(cli, None),
        Some(Commands::Run { render }) => cmd_run(cli, *render),
        Some(Commands::Draw { format }) => cmd_draw(cli, *format),
        Some(Commands::Info) => cmd_info(cli),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "ntree", &mut io::stdout());
            Ok(())
        }
    }
}

/// Layered settings with command line flags applied last.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(nodes) = cli.nodes {
        settings.nodes = nodes;
    }
    if let Some(max_degree) = cli.max_degree {
        settings.max_degree = max_degree;
    }
    if let Some(frontier) = cli.frontier {
        settings.frontier = frontier;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(cli))]
fn cmd_run(cli: &Cli, render: Option<RenderFormat>) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(render) = render {
        settings.render = render;
    }
    let container = ServiceContainer::new(settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    container.tree_service().run(&mut out)?;
    out.flush()
        .map_err(|e| InfraError::io("flush stdout", e))?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_draw(cli: &Cli, format: RenderFormat) -> CliResult<()> {
    if format == RenderFormat::None {
        return Err(CliError::InvalidArgs(
            "draw needs a visible format: edges, dot or tree".to_string(),
        ));
    }
    let settings = load_settings(cli)?;
    let container = ServiceContainer::with_deps(settings, format.renderer());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    container.tree_service().draw(&mut out)?;
    out.flush()
        .map_err(|e| InfraError::io("flush stdout", e))?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_info(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let container = ServiceContainer::new(settings);
    let service = container.tree_service();
    let summary = service.summary()?;

    output::header(&format!(
        "Tree over {} nodes ({} frontier, degree cap {})",
        summary.nodes,
        service.settings().frontier,
        service.settings().max_degree
    ));
    output::detail(&format!("edges:      {}", summary.edges));
    output::detail(&format!("max degree: {}", summary.max_degree));
    output::detail(&format!("depth:      {} (rooted at 1)", summary.depth));
    output::detail(&format!("leaves:     {}", summary.leaves));
    output::detail(&format!("diameter:   {}", summary.diameter));
    output::detail(&format!(
        "peripheral: {}",
        summary.peripheral.iter().join(" ")
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) if path.exists() => output::action("global", &path.display()),
            Some(path) => {
                output::action("global", &path.display());
                output::warning("global config file does not exist");
            }
            None => output::warning("no config directory available on this system"),
        },
        ConfigCommands::Template => print!("{}", Settings::template()),
    }
    Ok(())
}
