//! The interactive portfolio shell: a raw-mode input line over a
//! [`TerminalSession`], printing rendered output per submitted command and
//! executing the effects commands ask for.

use anyhow::Result;
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{self, Clear, ClearType};
use folio_core::{AppConfig, ThemeName};
use folio_data::PortfolioData;
use folio_observe::Observer;
use folio_ui::{Effect, TerminalSession};
use std::io::{self, Write};

use super::chat_cmd::ChatRepl;
use crate::render;

enum LineAction {
    Submit,
    ClearShortcut,
    Exit,
}

pub(crate) fn run_terminal(
    cfg: &AppConfig,
    data: &PortfolioData,
    observer: &Observer,
) -> Result<()> {
    let mut session = TerminalSession::new(data.clone());
    let mut theme = cfg.ui.theme;
    let prompt = cfg.ui.prompt_symbol.clone();
    // The chat conversation outlives individual `chat` commands.
    let mut chat: Option<ChatRepl> = None;

    println!("{}", render::welcome_banner());
    println!();

    loop {
        match read_line(&mut session, &prompt, theme)? {
            LineAction::Exit => break,
            LineAction::ClearShortcut => {
                let effects = session.clear_shortcut();
                apply_effects(&effects, &mut theme, &mut chat, cfg, data, observer)?;
            }
            LineAction::Submit => {
                let raw = session.input().to_string();
                let effects = session.submit();
                if let Some(name) = raw.split_whitespace().next() {
                    observer.record_command(&name.to_lowercase())?;
                }
                if !effects.contains(&Effect::ClearScreen)
                    && let Some(entry) = session.transcript().last()
                    && let Some(output) = &entry.output
                {
                    println!("{}", render::render(output));
                    println!();
                }
                apply_effects(&effects, &mut theme, &mut chat, cfg, data, observer)?;
            }
        }
    }
    Ok(())
}

fn apply_effects(
    effects: &[Effect],
    theme: &mut ThemeName,
    chat: &mut Option<ChatRepl>,
    cfg: &AppConfig,
    data: &PortfolioData,
    observer: &Observer,
) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::SetTheme(next) => *theme = *next,
            Effect::ClearScreen => {
                execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                println!("{}", render::welcome_banner());
                println!();
            }
            Effect::OpenUrl(url) => {
                println!("  -> {url}");
                println!();
            }
            Effect::ShowChat => {
                if chat.is_none() {
                    *chat = Some(ChatRepl::new(cfg, data)?);
                }
                if let Some(repl) = chat {
                    repl.run(observer)?;
                }
            }
        }
    }
    Ok(())
}

/// Collect one input line in raw mode, routing arrows through the session's
/// recall buffer. Leaves the cursor on a fresh line in cooked mode.
fn read_line(
    session: &mut TerminalSession,
    prompt: &str,
    theme: ThemeName,
) -> Result<LineAction> {
    let mut stdout = io::stdout();
    draw_input(&mut stdout, prompt, session.input(), theme)?;
    terminal::enable_raw_mode()?;
    let action = input_events(session, prompt, theme, &mut stdout);
    terminal::disable_raw_mode()?;
    println!();
    action
}

fn input_events(
    session: &mut TerminalSession,
    prompt: &str,
    theme: ThemeName,
    stdout: &mut io::Stdout,
) -> Result<LineAction> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => return Ok(LineAction::Exit),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => return Ok(LineAction::ClearShortcut),
            (KeyCode::Enter, _) => return Ok(LineAction::Submit),
            (KeyCode::Backspace, _) => session.backspace_input(),
            (KeyCode::Up, _) => session.recall_up(),
            (KeyCode::Down, _) => session.recall_down(),
            (KeyCode::Char(c), modifiers)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                session.push_input(c);
            }
            _ => continue,
        }
        draw_input(stdout, prompt, session.input(), theme)?;
    }
}

fn draw_input(
    stdout: &mut io::Stdout,
    prompt: &str,
    input: &str,
    theme: ThemeName,
) -> Result<()> {
    execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    let symbol = match theme {
        ThemeName::Dark => prompt.green(),
        ThemeName::Light => prompt.blue(),
    };
    write!(stdout, "{symbol} {input}")?;
    stdout.flush()?;
    Ok(())
}
