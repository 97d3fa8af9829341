use crate::components::banner_frames::{BannerColor, BannerTheme, resolve, title_rows};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::Widget;

/// Block-letter title shown on the welcome screen.
#[derive(Default)]
pub struct TitleBanner {
    pub theme: BannerTheme,
}

impl Widget for TitleBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let rows = title_rows();
        let art_width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        if area.width < art_width || area.height < rows.len() as u16 {
            let title = Line::from(Span::styled(
                "NCAA TOURNAMENT BRACKET VIEWER",
                resolve(BannerColor::Title, self.theme),
            ));
            render_centered(title, area, area.y, buf);
            return;
        }

        for (row, text) in rows.iter().enumerate() {
            let line = Line::from(Span::styled(*text, resolve(BannerColor::Title, self.theme)));
            render_centered(line, area, area.y + row as u16, buf);
        }
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let style: Style = span.style;
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, style);
        }
    }
}
