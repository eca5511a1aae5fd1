use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_core::AppConfig;
use folio_data::PortfolioData;
use folio_observe::Observer;
use folio_ui::interpret;
use serde_json::json;
use std::path::PathBuf;

mod commands;
mod output;
mod render;

use commands::chat_cmd::run_chat;
use commands::terminal::run_terminal;
use output::print_json;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Interactive portfolio terminal with an AI chat assistant", long_about = None)]
struct Cli {
    /// Emit structured JSON instead of rendered text (one-shot commands).
    #[arg(long, global = true)]
    json: bool,

    /// Log extra detail to stderr and the observe log.
    #[arg(long, global = true)]
    verbose: bool,

    /// Workspace directory holding `.folio/` (defaults to the current directory).
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interpret one terminal command line and print the result.
    Run {
        /// The command and its arguments, e.g. `folio run projects --featured`.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Talk to the AI assistant: a REPL, or one exchange when a prompt is given.
    Chat { prompt: Option<String> },
    /// Print the active portfolio content as JSON.
    Data,
    /// Generate shell completions.
    Completions { shell: Shell },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "folio", &mut std::io::stdout());
        return Ok(());
    }

    let workspace = match &cli.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let cfg = AppConfig::ensure(&workspace)?;
    let data = PortfolioData::load_or_builtin(&workspace)?;
    let mut observer = Observer::new(&workspace)?;
    observer.set_verbose(cli.verbose);
    observer.verbose_log(&format!(
        "workspace {} (config at {})",
        workspace.display(),
        AppConfig::config_path(&workspace).display()
    ));

    match cli.command {
        None => run_terminal(&cfg, &data, &observer),
        Some(Command::Run { line }) => run_once(&line.join(" "), &data, cli.json, &observer),
        Some(Command::Chat { prompt }) => run_chat(&cfg, &data, prompt.as_deref(), &observer),
        Some(Command::Data) => print_json(&data),
        Some(Command::Completions { .. }) => Ok(()),
    }
}

fn run_once(line: &str, data: &PortfolioData, json: bool, observer: &Observer) -> Result<()> {
    if let Some(name) = line.split_whitespace().next() {
        observer.record_command(&name.to_lowercase())?;
    }
    let result = interpret(line, data);
    if json {
        print_json(&json!({
            "schema": "folio.command.v1",
            "input": line,
            "output": result.output,
            "effects": result.effects,
        }))
    } else {
        if let Some(output) = &result.output {
            println!("{}", render::render(output));
        }
        for effect in &result.effects {
            if let folio_ui::Effect::OpenUrl(url) = effect {
                println!("  -> {url}");
            }
        }
        Ok(())
    }
}
