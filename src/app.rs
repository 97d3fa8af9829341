use crate::components::bracket::{LayoutPlan, StridePolicy};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::navigation::{NavInput, PageSource, Transition, ViewState};
use crate::ui::layout::LayoutAreas;
use bracket_model::{Bracket, BracketFit, Round};
use log::{debug, info, warn};
use tui::layout::{Rect, Size};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    brackets: Vec<Bracket>,
}

/// The loaded brackets as seen at one terminal size.
struct Deck<'a> {
    brackets: &'a [Bracket],
    area: Size,
    stride: StridePolicy,
}

impl PageSource for Deck<'_> {
    fn bracket_count(&self) -> usize {
        self.brackets.len()
    }

    fn page_count(&self, bracket: usize) -> usize {
        self.brackets.get(bracket).map_or(1, |b| {
            LayoutPlan::compute(&b.rounds(), b, self.area, self.stride).total_pages
        })
    }

    fn is_empty(&self, bracket: usize) -> bool {
        self.brackets.get(bracket).is_none_or(Bracket::is_empty)
    }
}

impl App {
    pub fn new(settings: AppSettings, brackets: Vec<Bracket>, terminal_size: Size) -> Self {
        let mut app = Self {
            settings,
            state: AppState::default(),
            brackets,
        };

        info!("loaded {} bracket(s)", app.brackets.len());
        let deck = app.deck(terminal_size);
        let initial = ViewState::initial(&deck);
        app.enter(initial);
        app
    }

    pub fn bracket_count(&self) -> usize {
        self.brackets.len()
    }

    pub fn current_bracket(&self) -> Option<&Bracket> {
        self.brackets.get(self.state.view.bracket)
    }

    /// Area the bracket pane gets out of the whole terminal.
    pub fn bracket_area(&self, terminal_size: Size) -> Size {
        let rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
        let main = LayoutAreas::new(rect, self.settings.show_logs).main;
        Size::new(main.width, main.height)
    }

    /// Rounds and a fresh layout plan for the current bracket.
    pub fn current_layout(&self, area: Size) -> Option<(Vec<Round>, LayoutPlan)> {
        let bracket = self.current_bracket()?;
        let rounds = bracket.rounds();
        let plan = LayoutPlan::compute(&rounds, bracket, area, self.settings.stride);
        Some((rounds, plan))
    }

    /// Clamp the view after a resize changed the page count.
    pub fn sync_to_terminal(&mut self, terminal_size: Size) {
        let deck = self.deck(terminal_size);
        self.state.view = self.state.view.clamp(&deck);
    }

    /// Apply one input. Returns `false` when the viewer should exit.
    pub fn navigate(&mut self, input: NavInput, terminal_size: Size) -> bool {
        let deck = self.deck(terminal_size);
        match self.state.view.apply(input, &deck) {
            Transition::Quit => {
                debug!("quit requested");
                false
            }
            Transition::View(next) => {
                self.log_move(input, next);
                self.state.view = next;
                true
            }
            Transition::Enter(next) => {
                self.log_move(input, next);
                self.enter(next);
                true
            }
        }
    }

    pub fn dismiss_warning(&mut self) {
        self.state.pending_warning = None;
    }

    /// Warning text for the current bracket, if it is still pending.
    pub fn warning_text(&self) -> Option<String> {
        let index = self.state.pending_warning?;
        if index != self.state.view.bracket {
            return None;
        }
        match self.brackets.get(index)?.fit() {
            BracketFit::Short { expected, actual } => Some(format!(
                "Warning: Bracket {} has {actual} teams, expected {expected}",
                index + 1
            )),
            _ => None,
        }
    }

    fn enter(&mut self, view: ViewState) {
        self.state.view = view;
        self.state.pending_warning = None;

        let Some(bracket) = self.brackets.get(view.bracket) else {
            return;
        };
        match bracket.fit() {
            BracketFit::Exact => {}
            BracketFit::Excess { expected, actual } => {
                info!(
                    "bracket {}: ignoring {} entries past the expected {expected}",
                    view.bracket + 1,
                    actual - expected
                );
            }
            BracketFit::Short { expected, actual } => {
                warn!(
                    "bracket {} has {actual} teams, expected {expected}",
                    view.bracket + 1
                );
                self.state.pending_warning = Some(view.bracket);
            }
        }
    }

    fn log_move(&self, input: NavInput, next: ViewState) {
        debug!(
            "{input:?}: ({}, {}) -> ({}, {})",
            self.state.view.bracket, self.state.view.page, next.bracket, next.page
        );
    }

    fn deck(&self, terminal_size: Size) -> Deck<'_> {
        Deck {
            brackets: &self.brackets,
            area: self.bracket_area(terminal_size),
            stride: self.settings.stride,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(n: usize) -> Bracket {
        Bracket::new((0..n).map(|i| format!("team-{i}")).collect())
    }

    fn settings() -> AppSettings {
        AppSettings::default()
    }

    fn app(brackets: Vec<Bracket>) -> App {
        App::new(settings(), brackets, Size::new(120, 40))
    }

    #[test]
    fn starts_on_first_non_empty_bracket() {
        let app = app(vec![Bracket::default(), bracket(7)]);
        assert_eq!(app.state.view, ViewState { bracket: 1, page: 0 });
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app(vec![bracket(7)]);
        assert!(!app.navigate(NavInput::Quit, Size::new(120, 40)));
        assert!(app.navigate(NavInput::Redraw, Size::new(120, 40)));
    }

    #[test]
    fn empty_bracket_between_two_is_never_shown() {
        let size = Size::new(120, 40);
        let mut app = app(vec![bracket(7), Bracket::default(), bracket(15)]);
        let mut seen = Vec::new();
        for _ in 0..6 {
            assert!(app.navigate(NavInput::NextBracket, size));
            seen.push(app.state.view.bracket);
        }
        assert_eq!(seen, vec![2, 0, 2, 0, 2, 0]);
    }

    #[test]
    fn narrow_terminal_pages_through_rounds() {
        // 63 entries -> six rounds, far wider than 40 columns
        let size = Size::new(40, 30);
        let mut app = App::new(settings(), vec![bracket(63), bracket(7)], size);
        let (_, plan) = app.current_layout(app.bracket_area(size)).unwrap();
        assert!(plan.total_pages > 1);

        for page in 1..plan.total_pages {
            app.navigate(NavInput::NextPage, size);
            assert_eq!(app.state.view, ViewState { bracket: 0, page });
        }
        app.navigate(NavInput::NextPage, size);
        assert_eq!(app.state.view, ViewState { bracket: 1, page: 0 });

        app.navigate(NavInput::PrevPage, size);
        assert_eq!(
            app.state.view,
            ViewState { bracket: 0, page: plan.total_pages - 1 }
        );
    }

    #[test]
    fn growing_the_terminal_clamps_the_page() {
        let narrow = Size::new(40, 30);
        let mut app = App::new(settings(), vec![bracket(63)], narrow);
        app.navigate(NavInput::PrevPage, narrow);
        assert!(app.state.view.page > 0);

        app.sync_to_terminal(Size::new(400, 30));
        assert_eq!(app.state.view.page, 0);
    }

    #[test]
    fn short_bracket_warns_until_a_key_is_pressed() {
        let size = Size::new(120, 40);
        // 6 entries imply 7 slots
        let mut app = app(vec![bracket(6), bracket(7)]);
        let text = app.warning_text().unwrap();
        assert_eq!(text, "Warning: Bracket 1 has 6 teams, expected 7");

        app.dismiss_warning();
        assert!(app.warning_text().is_none());

        app.navigate(NavInput::NextBracket, size);
        assert!(app.warning_text().is_none());
        app.navigate(NavInput::NextBracket, size);
        assert!(app.warning_text().is_some());
    }

    #[test]
    fn lone_short_bracket_warns_again_after_wrapping() {
        let size = Size::new(120, 40);
        let mut app = app(vec![bracket(6)]);
        assert!(app.warning_text().is_some());

        app.dismiss_warning();
        app.navigate(NavInput::Redraw, size);
        assert!(app.warning_text().is_none());

        app.navigate(NavInput::NextBracket, size);
        assert_eq!(app.state.view, ViewState { bracket: 0, page: 0 });
        assert!(app.warning_text().is_some());

        app.dismiss_warning();
        app.navigate(NavInput::NextPage, size);
        assert!(app.warning_text().is_some());
    }
}
