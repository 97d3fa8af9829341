use std::io::{self, Stdout};

use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Layout, Rect, Size};
use tui::style::{Color, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::banner::TitleBanner;
use crate::components::banner_frames::{BannerColor, BannerTheme, resolve};
use crate::components::bracket::BracketPage;
use crate::ui::layout::LayoutAreas;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Smallest pane the bracket view will try to draw into.
const MIN_BRACKET_WIDTH: u16 = 20;
const MIN_BRACKET_HEIGHT: u16 = 12;

static WELCOME_TEXT: &[&str] = &[
    "This tool shows your bracket predictions one tournament at a time.",
    "",
    "How to use:",
    "- Each bracket is displayed on its own, split into pages when it is wide",
    "- ←/→ move between pages, and on to the neighbouring bracket at either end",
    "- n/p jump straight to the next or previous bracket, Enter moves forward",
    "- The champion is highlighted on the last page",
    "",
    "Use it to enter your brackets online or to compare predictions.",
];

/// Full-screen messages shown outside the bracket view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    NoFile,
    Error(String),
}

pub fn draw(terminal: &mut Tui, app: &App) -> io::Result<()> {
    terminal.draw(|f| {
        let layout = LayoutAreas::new(f.area(), app.settings.show_logs);
        draw_bracket(f, layout.main, app);
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    })?;
    Ok(())
}

pub fn draw_screen(terminal: &mut Tui, screen: &Screen) -> io::Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        match screen {
            Screen::Welcome => draw_welcome(f, area),
            Screen::NoFile => draw_no_file(f, area),
            Screen::Error(message) => draw_error(f, area, message),
        }
    })?;
    Ok(())
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    if area.width < MIN_BRACKET_WIDTH || area.height < MIN_BRACKET_HEIGHT {
        draw_centered_message(f, area, "Terminal too small", Style::default().fg(Color::DarkGray));
        return;
    }

    f.render_widget(default_border(Color::White), area);

    let (Some(bracket), Some((rounds, plan))) = (
        app.current_bracket(),
        app.current_layout(Size::new(area.width, area.height)),
    ) else {
        return;
    };

    f.render_widget(
        BracketPage {
            bracket,
            rounds: &rounds,
            plan: &plan,
            page: app.state.view.page,
            bracket_index: app.state.view.bracket,
            bracket_count: app.bracket_count(),
            warning: app.warning_text(),
            theme: BannerTheme::Dark,
        },
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" NCAA BRACKET VIEWER ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_pad, banner_area, _gap, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(TitleBanner::default(), banner_area);

    let body: Vec<Line> = WELCOME_TEXT.iter().map(|line| Line::from(*line)).collect();
    let [_margin, text_area] =
        Layout::horizontal([Constraint::Length(4), Constraint::Fill(1)]).areas(body_area);
    f.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }),
        text_area,
    );

    draw_footer(f, footer_area, "Press any key to start viewing brackets...");
}

fn draw_no_file(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top, message_area, _bottom, footer_area] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let usage = format!("Usage: {} <filename>", env!("CARGO_PKG_NAME"));
    let lines = vec![
        Line::from("No input file provided. Please provide a filename."),
        Line::from(""),
        Line::from(usage),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        message_area,
    );

    draw_footer(f, footer_area, "Press any key to exit...");
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let block = default_border(Color::Red).title(" ERROR ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_pad, title_area, _top, message_area, _bottom, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new("NCAA BRACKET VIEWER - ERROR")
            .style(resolve(BannerColor::Title, BannerTheme::Dark))
            .alignment(Alignment::Center),
        title_area,
    );
    f.render_widget(
        Paragraph::new(format!("Error: {message}"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        message_area,
    );

    draw_footer(f, footer_area, "Press any key to exit...");
}

fn draw_footer(f: &mut Frame, area: Rect, text: &str) {
    let [_margin, text_area] =
        Layout::horizontal([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    f.render_widget(
        Paragraph::new(text).style(resolve(BannerColor::Instruction, BannerTheme::Dark)),
        text_area,
    );
}

fn draw_centered_message(f: &mut Frame, area: Rect, msg: &str, style: Style) {
    let [_top, line, _bottom] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(msg).style(style).alignment(Alignment::Center),
        line,
    );
}
