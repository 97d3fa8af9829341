use tui::layout::{Constraint, Layout, Rect};

/// Rows given to the log pane when it is switched on.
pub const LOG_PANE_HEIGHT: u16 = 8;

/// Below this height the log pane is dropped so the bracket keeps its room.
pub const MIN_HEIGHT_WITH_LOGS: u16 = 24;

/// Pre-computed layout areas for the main draw loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(area: Rect, show_logs: bool) -> Self {
        if !show_logs || area.height < MIN_HEIGHT_WITH_LOGS {
            return LayoutAreas { main: area, logs: None };
        }

        let [main, logs] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(LOG_PANE_HEIGHT),
        ])
        .areas(area);

        LayoutAreas {
            main,
            logs: Some(logs),
        }
    }
}
