use bracket_model::{Bracket, Round, TeamEntry};
use std::ops::Range;
use std::str::FromStr;
use tui::buffer::Buffer;
use tui::layout::{Rect, Size};
use tui::style::Style;
use tui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::components::banner_frames::{BannerColor, BannerTheme, resolve};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Blank columns between two adjacent rounds.
pub const GUTTER: usize = 4;

/// Columns held back for the left and right border (2 + 2).
pub const BORDER_RESERVE: usize = 4;

/// Room for a two-digit slot number, the period, a space and a margin.
pub const ENTRY_PREFIX: usize = 6;

/// Rows held back for the title, round headers and footer.
pub const VERTICAL_RESERVE: usize = 8;

/// Leftmost column any round may start at.
pub const MIN_START_X: usize = 2;

pub const TITLE_ROW: u16 = 1;
pub const HEADER_ROW: u16 = 3;
pub const UNDERLINE_ROW: u16 = 4;
pub const FIRST_ENTRY_ROW: u16 = 5;

/// Entry rows stop this many rows above the bottom edge.
pub const FOOTER_ROWS: u16 = 5;

const INVALID_TEAM: &str = "[Error: invalid team]";

// ---------------------------------------------------------------------------
// StridePolicy: which slots of an overflowing round get a row
// ---------------------------------------------------------------------------

/// How a round with more slots than available rows is sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StridePolicy {
    /// Stride of `size / max_lines`, at least 1.
    #[default]
    Auto,
    /// Every entry in order; the column is cut at the footer.
    Off,
    /// Show every Nth entry of an overflowing round.
    Fixed(usize),
}

impl StridePolicy {
    pub fn stride(self, size: usize, max_lines: usize) -> usize {
        if size <= max_lines {
            return 1;
        }
        match self {
            StridePolicy::Auto => (size / max_lines.max(1)).max(1),
            StridePolicy::Off => 1,
            StridePolicy::Fixed(n) => n.max(1),
        }
    }
}

impl FromStr for StridePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StridePolicy::Auto),
            "off" | "none" => Ok(StridePolicy::Off),
            other => match other.parse::<usize>() {
                Ok(0) | Err(_) => Err(format!(
                    "invalid stride '{s}': expected 'auto', 'off' or a positive number"
                )),
                Ok(n) => Ok(StridePolicy::Fixed(n)),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutPlan: column widths and pagination for one bracket
// ---------------------------------------------------------------------------

/// Column widths and page breaks for one bracket at one area size.
///
/// Never cached: rebuilt before every draw from the current area.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// Width in columns of each round, in round order.
    pub column_widths: Vec<usize>,
    /// Rounds shown side by side on every page.
    pub rounds_per_page: usize,
    pub total_pages: usize,
    width: usize,
    height: usize,
    stride: StridePolicy,
}

impl LayoutPlan {
    /// Plan the rounds of `bracket` into an area of `area` cells.
    pub fn compute(rounds: &[Round], bracket: &Bracket, area: Size, stride: StridePolicy) -> Self {
        let longest = longest_names(rounds, bracket);
        let widths = rounds
            .iter()
            .zip(longest)
            .map(|(round, longest)| column_width(&round.name, longest))
            .collect();
        Self::from_widths(widths, area, stride)
    }

    pub fn from_widths(column_widths: Vec<usize>, area: Size, stride: StridePolicy) -> Self {
        let width = usize::from(area.width);
        let rounds_per_page = rounds_per_page(&column_widths, width);
        let total_pages = column_widths.len().div_ceil(rounds_per_page).max(1);
        Self {
            column_widths,
            rounds_per_page,
            total_pages,
            width,
            height: usize::from(area.height),
            stride,
        }
    }

    /// Contiguous round indices shown on `page`.
    pub fn page_rounds(&self, page: usize) -> Range<usize> {
        let start = (page * self.rounds_per_page).min(self.column_widths.len());
        let end = (start + self.rounds_per_page).min(self.column_widths.len());
        start..end
    }

    pub fn is_last_page(&self, page: usize) -> bool {
        page + 1 >= self.total_pages
    }

    /// Columns taken by the rounds on `page`, gutters included.
    pub fn page_width(&self, page: usize) -> usize {
        self.column_widths[self.page_rounds(page)]
            .iter()
            .map(|w| w + GUTTER)
            .sum()
    }

    /// Starting column of each round on `page`; the block is centred.
    pub fn column_offsets(&self, page: usize) -> Vec<usize> {
        let start_x = (self.width.saturating_sub(self.page_width(page)) / 2).max(MIN_START_X);
        let mut x = start_x;
        self.column_widths[self.page_rounds(page)]
            .iter()
            .map(|w| {
                let col_x = x;
                x += w + GUTTER;
                col_x
            })
            .collect()
    }

    /// Entry rows available before a round needs a stride.
    pub fn max_lines(&self) -> usize {
        self.height.saturating_sub(VERTICAL_RESERVE).max(1)
    }

    pub fn stride_for(&self, size: usize) -> usize {
        self.stride.stride(size, self.max_lines())
    }

    /// Round-relative slot indices that get a row, top to bottom.
    pub fn visible_slots(&self, round: &Round) -> Vec<usize> {
        let rows = self
            .height
            .saturating_sub(usize::from(FOOTER_ROWS))
            .saturating_sub(usize::from(FIRST_ENTRY_ROW));
        (0..round.size)
            .step_by(self.stride_for(round.size))
            .take(rows)
            .collect()
    }
}

/// Widest formatted name per round, over the entries actually present.
pub fn longest_names(rounds: &[Round], bracket: &Bracket) -> Vec<usize> {
    rounds
        .iter()
        .map(|round| {
            round
                .slots()
                .filter_map(|slot| bracket.entry(slot))
                .map(|entry| entry.width())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

pub fn column_width(round_name: &str, longest_name: usize) -> usize {
    round_name.width().max(longest_name + ENTRY_PREFIX)
}

/// How many rounds share a page at `area_width` columns.
///
/// Greedy over the leading rounds, then narrowed until every page fits the
/// border-adjusted width. Never less than one.
pub fn rounds_per_page(column_widths: &[usize], area_width: usize) -> usize {
    let limit = area_width.saturating_sub(BORDER_RESERVE);

    let mut total = 0;
    let mut count = 0;
    for width in column_widths {
        if total + width + GUTTER > limit {
            break;
        }
        total += width + GUTTER;
        count += 1;
    }

    let fits = |chunk: &[usize]| chunk.iter().map(|w| w + GUTTER).sum::<usize>() <= limit;
    let mut per_page = count.max(1);
    while per_page > 1 && !column_widths.chunks(per_page).all(fits) {
        per_page -= 1;
    }
    per_page
}

/// `"{n:2}. Name"`, with the name cut to fit `max_width`.
pub fn format_entry(number: usize, entry: &TeamEntry, max_width: usize) -> String {
    match entry {
        TeamEntry::Team(name) if name.width() > max_width.saturating_sub(4) => {
            let kept = truncate_to_width(name, max_width.saturating_sub(7));
            format!("{number:2}. {kept}...")
        }
        TeamEntry::Team(name) => format!("{number:2}. {name}"),
        TeamEntry::Invalid => {
            let text = format!("{number:2}. {INVALID_TEAM}");
            truncate_to_width(&text, max_width).to_string()
        }
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > max_width {
            return &text[..idx];
        }
    }
    text
}

/// Key legend for the bottom row; arrows name what they will do from `page`.
pub fn instructions(page: usize, total_pages: usize) -> String {
    let back = if page > 0 {
        "← Previous Page"
    } else {
        "← Previous Bracket"
    };
    let forward = if page + 1 < total_pages {
        "→ Next Page"
    } else {
        "→ Next Bracket"
    };
    format!("{back} | {forward} | q: Quit")
}

// ---------------------------------------------------------------------------
// BracketPage widget
// ---------------------------------------------------------------------------

/// Renders one page of one bracket: title, round columns, champion line,
/// optional warning and the key legend.
///
/// Row positions assume `area` is the whole bordered pane the plan was
/// computed for.
pub struct BracketPage<'a> {
    pub bracket: &'a Bracket,
    pub rounds: &'a [Round],
    pub plan: &'a LayoutPlan,
    pub page: usize,
    /// 0-based position of this bracket in the file.
    pub bracket_index: usize,
    pub bracket_count: usize,
    /// Shown once above the key legend.
    pub warning: Option<String>,
    pub theme: BannerTheme,
}

impl Widget for BracketPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bottom = area.height;

        let title = format!(
            "NCAA BRACKET {}/{} - Page {}/{}",
            self.bracket_index + 1,
            self.bracket_count,
            self.page + 1,
            self.plan.total_pages
        );
        put_centered(buf, area, TITLE_ROW, &title, resolve(BannerColor::Title, self.theme));

        let page_rounds = self.plan.page_rounds(self.page);
        let offsets = self.plan.column_offsets(self.page);
        for (round, col_x) in self.rounds[page_rounds].iter().zip(offsets) {
            self.render_round(round, col_x, area, buf);
        }

        if self.plan.is_last_page(self.page) && !self.bracket.is_empty() {
            let champion = self
                .rounds
                .last()
                .and_then(|round| self.bracket.entry(round.offset));
            let text = match champion {
                Some(TeamEntry::Team(name)) => Some(format!("CHAMPION: {name}")),
                Some(TeamEntry::Invalid) => Some(format!("CHAMPION: {INVALID_TEAM}")),
                None => None,
            };
            if let Some(text) = text {
                put_centered(
                    buf,
                    area,
                    bottom.saturating_sub(4),
                    &text,
                    resolve(BannerColor::Champion, self.theme),
                );
            }
        }

        if let Some(warning) = &self.warning {
            put_str(
                buf,
                area,
                MIN_START_X as u16,
                bottom.saturating_sub(3),
                warning,
                resolve(BannerColor::Warning, self.theme),
            );
        }

        put_str(
            buf,
            area,
            MIN_START_X as u16,
            bottom.saturating_sub(2),
            &instructions(self.page, self.plan.total_pages),
            resolve(BannerColor::Instruction, self.theme),
        );
    }
}

impl BracketPage<'_> {
    fn render_round(&self, round: &Round, col_x: usize, area: Rect, buf: &mut Buffer) {
        let x = u16::try_from(col_x).unwrap_or(u16::MAX);
        let width = self.plan.column_widths[round.index];

        put_str(buf, area, x, HEADER_ROW, &round.name, resolve(BannerColor::Header, self.theme));
        let underline = "─".repeat(width.min(round.name.width()));
        put_str(buf, area, x, UNDERLINE_ROW, &underline, Style::default());

        let team_style = if round.is_champion() {
            resolve(BannerColor::Champion, self.theme)
        } else {
            resolve(BannerColor::Team, self.theme)
        };

        let mut y = FIRST_ENTRY_ROW;
        for slot in self.plan.visible_slots(round) {
            let Some(entry) = self.bracket.entry(round.offset + slot) else {
                continue;
            };
            let style = match entry {
                TeamEntry::Team(_) => team_style,
                TeamEntry::Invalid => Style::default(),
            };
            put_str(buf, area, x, y, &format_entry(slot + 1, &entry, width), style);
            y += 1;
        }
    }
}

/// Write `text` at an area-relative position, clipped to the area.
fn put_str(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if x >= area.width || y >= area.height {
        return;
    }
    let max_width = usize::from(area.width - x);
    buf.set_stringn(area.x + x, area.y + y, text, max_width, style);
}

fn put_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let w = u16::try_from(text.width()).unwrap_or(u16::MAX);
    put_str(buf, area, area.width.saturating_sub(w) / 2, y, text, style);
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_model::rounds_for;

    fn size(width: u16, height: u16) -> Size {
        Size::new(width, height)
    }

    fn bracket_of(names: &[&str]) -> Bracket {
        Bracket::new(names.iter().map(ToString::to_string).collect())
    }

    fn numbered(n: usize) -> Bracket {
        Bracket::new((0..n).map(|i| format!("team-{i:02}")).collect())
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn column_width_covers_header_and_prefix() {
        assert_eq!(column_width("Championship", 3), 12);
        assert_eq!(column_width("Round 1", 10), 16);
    }

    #[test]
    fn longest_names_use_display_form() {
        let bracket = bracket_of(&["north-carolina", "duke", "unc"]);
        let rounds = rounds_for(bracket.len());
        // 3 entries -> [2, 1]
        assert_eq!(longest_names(&rounds, &bracket), vec![14, 3]);
    }

    #[test]
    fn longest_names_ignore_missing_slots() {
        let bracket = numbered(6);
        let rounds = rounds_for(6); // [4, 2, 1] expects 7
        assert_eq!(longest_names(&rounds, &bracket), vec![7, 7, 0]);
    }

    #[test]
    fn invalid_entries_count_as_twenty_cells() {
        let bracket = bracket_of(&["a", "b\u{1b}", "c"]);
        let rounds = rounds_for(3);
        assert_eq!(longest_names(&rounds, &bracket)[0], 20);
    }

    #[test]
    fn everything_fits_on_one_page() {
        let plan = LayoutPlan::from_widths(vec![10, 10, 10], size(80, 24), StridePolicy::Auto);
        assert_eq!(plan.rounds_per_page, 3);
        assert_eq!(plan.total_pages, 1);
        assert_eq!(plan.page_rounds(0), 0..3);
    }

    #[test]
    fn narrow_terminal_paginates() {
        // limit 36: two 14-wide columns fit (28), a third does not (42)
        let plan = LayoutPlan::from_widths(vec![10; 5], size(40, 24), StridePolicy::Auto);
        assert_eq!(plan.rounds_per_page, 2);
        assert_eq!(plan.total_pages, 3);
        assert_eq!(plan.page_rounds(2), 4..5);
        assert!(plan.is_last_page(2));
        assert!(!plan.is_last_page(1));
    }

    #[test]
    fn oversized_round_still_gets_a_page() {
        let plan = LayoutPlan::from_widths(vec![100, 8], size(40, 24), StridePolicy::Auto);
        assert_eq!(plan.rounds_per_page, 1);
        assert_eq!(plan.total_pages, 2);
    }

    #[test]
    fn later_wide_rounds_shrink_every_page() {
        // the first two rounds fit together, rounds 3 and 4 would not
        let widths = vec![10, 10, 30, 30];
        assert_eq!(rounds_per_page(&widths, 34), 1);
    }

    #[test]
    fn page_width_stays_within_border_limit() {
        let widths_sets: [&[usize]; 5] = [
            &[12, 12, 12, 12, 12, 12],
            &[30, 22, 18, 14, 12, 18],
            &[5, 60, 5, 5],
            &[90],
            &[7, 7, 7, 7, 7, 7, 7, 7],
        ];
        for widths in widths_sets {
            for width in [10u16, 24, 40, 60, 80, 120, 200] {
                let plan = LayoutPlan::from_widths(widths.to_vec(), size(width, 30), StridePolicy::Auto);
                for page in 0..plan.total_pages {
                    let rounds = plan.page_rounds(page);
                    assert!(!rounds.is_empty());
                    if rounds.len() > 1 {
                        assert!(
                            plan.page_width(page) <= usize::from(width) - BORDER_RESERVE,
                            "{widths:?} at {width}: page {page}"
                        );
                    }
                }
                assert_eq!(plan.total_pages, widths.len().div_ceil(plan.rounds_per_page));
            }
        }
    }

    #[test]
    fn columns_are_centred_as_a_block() {
        let plan = LayoutPlan::from_widths(vec![10, 16], size(80, 24), StridePolicy::Auto);
        // page width 14 + 20 = 34, (80 - 34) / 2 = 23
        assert_eq!(plan.column_offsets(0), vec![23, 37]);
    }

    #[test]
    fn offsets_never_start_left_of_border() {
        let plan = LayoutPlan::from_widths(vec![100], size(40, 24), StridePolicy::Auto);
        assert_eq!(plan.column_offsets(0), vec![MIN_START_X]);
    }

    #[test]
    fn short_rounds_show_every_slot() {
        let plan = LayoutPlan::from_widths(vec![10], size(80, 40), StridePolicy::Auto);
        let round = Round { index: 0, size: 8, name: "Round 1".into(), offset: 0 };
        assert_eq!(plan.visible_slots(&round), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn long_rounds_are_sampled_with_a_stride() {
        // height 24: max_lines 16, rows 14
        let plan = LayoutPlan::from_widths(vec![10], size(80, 24), StridePolicy::Auto);
        let round = Round { index: 0, size: 32, name: "First Round".into(), offset: 0 };
        assert_eq!(plan.stride_for(32), 2);
        let slots = plan.visible_slots(&round);
        assert_eq!(slots.len(), 14);
        assert_eq!(&slots[..3], &[0, 2, 4]);
    }

    #[test]
    fn stride_policy_can_be_disabled_or_fixed() {
        let off = LayoutPlan::from_widths(vec![10], size(80, 24), StridePolicy::Off);
        assert_eq!(off.stride_for(32), 1);
        let round = Round { index: 0, size: 32, name: "First Round".into(), offset: 0 };
        assert_eq!(off.visible_slots(&round), (0..14).collect::<Vec<_>>());

        let fixed = LayoutPlan::from_widths(vec![10], size(80, 24), StridePolicy::Fixed(4));
        assert_eq!(fixed.stride_for(32), 4);
        assert_eq!(fixed.stride_for(8), 1);
    }

    #[test]
    fn stride_policy_parses_cli_values() {
        assert_eq!("auto".parse::<StridePolicy>(), Ok(StridePolicy::Auto));
        assert_eq!("OFF".parse::<StridePolicy>(), Ok(StridePolicy::Off));
        assert_eq!("3".parse::<StridePolicy>(), Ok(StridePolicy::Fixed(3)));
        assert!("0".parse::<StridePolicy>().is_err());
        assert!("every".parse::<StridePolicy>().is_err());
    }

    #[test]
    fn tiny_terminal_does_not_divide_by_zero() {
        let plan = LayoutPlan::from_widths(vec![10], size(5, 3), StridePolicy::Auto);
        assert_eq!(plan.max_lines(), 1);
        let round = Round { index: 0, size: 4, name: "Round 1".into(), offset: 0 };
        assert!(plan.visible_slots(&round).is_empty());
    }

    #[test]
    fn entries_are_numbered_and_truncated() {
        let entry = TeamEntry::Team("Gonzaga".into());
        assert_eq!(format_entry(1, &entry, 13), " 1. Gonzaga");
        assert_eq!(format_entry(12, &entry, 10), "12. Gon...");
        assert_eq!(
            format_entry(3, &TeamEntry::Invalid, 40),
            " 3. [Error: invalid team]"
        );
        assert_eq!(format_entry(3, &TeamEntry::Invalid, 8), " 3. [Err");
    }

    #[test]
    fn instructions_name_page_or_bracket_moves() {
        assert_eq!(
            instructions(0, 2),
            "← Previous Bracket | → Next Page | q: Quit"
        );
        assert_eq!(
            instructions(1, 2),
            "← Previous Page | → Next Bracket | q: Quit"
        );
    }

    #[test]
    fn page_renders_title_rounds_and_champion() {
        let bracket = bracket_of(&["duke", "kansas", "unc", "duke"]);
        let rounds = rounds_for(bracket.len());
        let area = Rect::new(0, 0, 60, 20);
        let plan = LayoutPlan::compute(&rounds, &bracket, size(area.width, area.height), StridePolicy::Auto);
        let mut buf = Buffer::empty(area);
        BracketPage {
            bracket: &bracket,
            rounds: &rounds,
            plan: &plan,
            page: 0,
            bracket_index: 1,
            bracket_count: 3,
            warning: None,
            theme: BannerTheme::Dark,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, TITLE_ROW).contains("NCAA BRACKET 2/3 - Page 1/1"));
        assert!(row_text(&buf, HEADER_ROW).contains("Round 1"));
        assert!(row_text(&buf, HEADER_ROW).contains("Round 2"));
        assert!(row_text(&buf, FIRST_ENTRY_ROW).contains(" 1. Duke"));
        assert!(row_text(&buf, FIRST_ENTRY_ROW + 2).contains(" 3. Unc"));
        assert!(row_text(&buf, 16).contains("CHAMPION: Duke"));
        assert!(row_text(&buf, 18).contains("q: Quit"));
    }

    #[test]
    fn short_bracket_shows_warning_and_skips_missing_slots() {
        let bracket = numbered(6); // expects 7
        let rounds = rounds_for(bracket.len());
        let area = Rect::new(0, 0, 80, 20);
        let plan = LayoutPlan::compute(&rounds, &bracket, size(area.width, area.height), StridePolicy::Auto);
        let mut buf = Buffer::empty(area);
        BracketPage {
            bracket: &bracket,
            rounds: &rounds,
            plan: &plan,
            page: 0,
            bracket_index: 0,
            bracket_count: 1,
            warning: Some("Warning: short".into()),
            theme: BannerTheme::Dark,
        }
        .render(area, &mut buf);

        assert!(row_text(&buf, 17).contains("Warning: short"));
        // the champion slot has no entry
        assert!(!row_text(&buf, 16).contains("CHAMPION"));
    }

    fn render_single_page(bracket: &Bracket, area: Rect) -> Buffer {
        let rounds = rounds_for(bracket.len());
        let plan = LayoutPlan::compute(&rounds, bracket, size(area.width, area.height), StridePolicy::Auto);
        assert_eq!(plan.total_pages, 1);
        let mut buf = Buffer::empty(area);
        BracketPage {
            bracket,
            rounds: &rounds,
            plan: &plan,
            page: 0,
            bracket_index: 0,
            bracket_count: 1,
            warning: None,
            theme: BannerTheme::Dark,
        }
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn champion_comes_from_the_final_slot_not_the_last_token() {
        // 5 entries -> rounds [3, 1]; the fifth token is excess
        let bracket = bracket_of(&["gonzaga", "baylor", "houston", "duke", "kansas"]);
        let area = Rect::new(0, 0, 60, 20);
        let buf = render_single_page(&bracket, area);

        assert!(row_text(&buf, 16).contains("CHAMPION: Duke"));
        for y in 0..area.height {
            assert!(!row_text(&buf, y).contains("Kansas"), "row {y} shows the excess entry");
        }
    }

    #[test]
    fn short_bracket_has_no_champion_line_anywhere() {
        // 6 entries -> rounds [4, 2, 1]; the last token sits in round 2
        let bracket = numbered(6);
        let area = Rect::new(0, 0, 80, 20);
        let buf = render_single_page(&bracket, area);

        for y in 0..area.height {
            assert!(!row_text(&buf, y).contains("CHAMPION"), "row {y} has a champion line");
        }
        assert!(row_text(&buf, FIRST_ENTRY_ROW + 1).contains("Team 05"));
    }
}
