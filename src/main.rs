mod app;
mod cli;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::cli::Cli;
use crate::draw::{Screen, Tui};
use crate::state::app_settings::AppSettings;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::process::ExitCode;
use std::{io, panic};
use tui::{Terminal, backend::CrosstermBackend};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = AppSettings::from_cli(&cli);

    better_panic::install();

    let level = settings.log_level;
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let result = run(&mut terminal, cli, settings);
    cleanup_terminal()?;
    result
}

fn run(terminal: &mut Tui, cli: Cli, settings: AppSettings) -> anyhow::Result<ExitCode> {
    let Some(path) = cli.file else {
        show_screen(terminal, &Screen::NoFile)?;
        return Ok(ExitCode::SUCCESS);
    };

    if settings.show_welcome {
        show_screen(terminal, &Screen::Welcome)?;
    }

    info!("reading {}", path.display());
    let brackets = match bracket_model::load_brackets(&path) {
        Ok(brackets) => brackets,
        Err(e) => {
            error!("{e}");
            show_screen(terminal, &Screen::Error(e.to_string()))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut app = App::new(settings, brackets, terminal.size()?);
    if let Err(e) = main_ui_loop(terminal, &mut app) {
        error!("viewer stopped: {e:#}");
        show_screen(terminal, &Screen::Error(format!("{e:#}")))?;
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Draw, block on one terminal event, transition, repeat.
///
/// The layout is planned from the terminal size on every pass, so a resize
/// only needs the redraw that follows its event.
fn main_ui_loop(terminal: &mut Tui, app: &mut App) -> anyhow::Result<()> {
    loop {
        let size = terminal.size()?;
        app.sync_to_terminal(size);
        draw::draw(terminal, app)?;

        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                if !keys::handle_key_bindings(key_event, app, size) {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => {
                info!("terminal resized to {width}x{height}");
            }
            _ => {}
        }
    }
}

/// Draw a full-screen message and wait for any key.
fn show_screen(terminal: &mut Tui, screen: &Screen) -> io::Result<()> {
    loop {
        draw::draw_screen(terminal, screen)?;
        if let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            return Ok(());
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
