use tui::style::{Color, Modifier, Style};

/// Named roles for every colored element on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    /// Round titles above each column.
    Header,
    /// Regular team entries.
    Team,
    /// Champion slot and the champion line.
    Champion,
    /// Bracket title and the welcome banner.
    Title,
    /// Key legend along the bottom.
    Instruction,
    Warning,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BannerTheme {
    #[default]
    Dark,
}

pub fn resolve(color: BannerColor, _theme: BannerTheme) -> Style {
    match color {
        BannerColor::Header => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        BannerColor::Team => Style::default().fg(Color::Green),
        BannerColor::Champion => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BannerColor::Title => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        BannerColor::Instruction => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        BannerColor::Warning => Style::default().add_modifier(Modifier::BOLD),
    }
}

pub fn title_rows() -> [&'static str; 4] {
    [
        " ___ ___    _   ___ _  _____ _____ ___ ",
        "| _ ) _ \\  /_\\ / __| |/ / __|_   _/ __|",
        "| _ \\   / / _ \\ (__| ' <| _|  | | \\__ \\",
        "|___/_|_\\/_/ \\_\\___|_|\\_\\___| |_| |___/",
    ]
}
