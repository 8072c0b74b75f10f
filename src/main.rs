use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod app;
mod commands;
mod config;
mod draw;
mod id;

use app::App;
use commands::Outcome;
use config::Config;
use draw::DrawOptions;
use id::IdGenerator;

#[derive(Parser, Debug)]
#[command(name = "termsketch")]
#[command(version, about = "Terminal vector drawing tool with layered character canvases")]
struct Cli {
    /// Execute commands from a file instead of reading stdin
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Disable ANSI color output even if the config enables it
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let opts = DrawOptions {
        ansi_colors: config.ui.ansi_colors && !cli.no_color,
        clear_screen: config.ui.clear_before_plot && cli.script.is_none(),
    };

    let ids = IdGenerator::load(IdGenerator::default_path()?)?;
    let mut app = App::new(&config, ids);

    if let Some(script) = &cli.script {
        run_script(&mut app, script, &opts)?;
    } else {
        run_interactive(&mut app, &opts)?;
    }

    app.shutdown()?;
    Ok(())
}

/// Executes each line of a command file, stopping at `exit` or EOF.
fn run_script(app: &mut App, script: &PathBuf, opts: &DrawOptions) -> anyhow::Result<()> {
    use anyhow::Context;

    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in content.lines() {
        match commands::execute(app, line, &mut out, opts) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue) => {}
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }
    Ok(())
}

/// Prompt/read/execute loop over stdin. A failed command is reported and
/// the loop continues; only `exit` or EOF ends the session.
fn run_interactive(app: &mut App, opts: &DrawOptions) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    log::info!("Starting interactive session (type 'help' for commands)");

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match commands::execute(app, &line, &mut out, opts) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue) => {}
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }

    Ok(())
}
