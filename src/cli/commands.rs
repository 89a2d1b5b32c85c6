use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::display;
use crate::reducer::Reducer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert { file, steps, pause }) => _convert(file, *steps, *pause),
        Some(Commands::Show { file }) => _show(file),
        Some(Commands::Check { file }) => _check(file),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

#[instrument]
fn _convert(file: &Path, steps: bool, pause: bool) -> CliResult<()> {
    let settings = Settings::load()?;
    let pause = pause || settings.pause;
    let echo = steps || pause || settings.echo_steps;
    debug!("file: {:?}, echo: {}, pause: {}", file, echo, pause);

    let tree = TreeBuilder::new().from_file(file)?;
    output::header("Inference tree:");
    output::info(&display::render(&tree));

    let mut reducer = if echo {
        Reducer::with_step_hook(move |intermediate| {
            output::header("#############################");
            output::info(&display::render(intermediate));
            if pause {
                wait_for_enter();
            }
        })
    } else {
        Reducer::new()
    };

    let result = reducer.convert(tree)?;
    output::header("Operation tree:");
    output::info(&display::render(&result));
    Ok(())
}

#[instrument]
fn _show(file: &Path) -> CliResult<()> {
    let tree = TreeBuilder::new().from_file(file)?;
    output::info(&display::render(&tree));
    Ok(())
}

#[instrument]
fn _check(file: &Path) -> CliResult<()> {
    let tree = TreeBuilder::new().from_file(file)?;
    Reducer::new().convert(tree)?;
    output::success("tree reduces to an operation tree");
    Ok(())
}

fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match Settings::global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::info("no config directory available"),
            }
            Ok(())
        }
    }
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn wait_for_enter() {
    output::prompt("press Enter to continue");
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
