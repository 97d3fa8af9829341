// ---------------------------------------------------------------------------
// View state: which bracket and which page of it is on screen
// ---------------------------------------------------------------------------

/// What the navigation machine needs to know about the loaded brackets.
pub trait PageSource {
    fn bracket_count(&self) -> usize;
    /// Pages in the current layout of `bracket`, at least 1.
    fn page_count(&self, bracket: usize) -> usize;
    /// Brackets with no teams are never shown.
    fn is_empty(&self, bracket: usize) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Quit,
    NextPage,
    PrevPage,
    NextBracket,
    PrevBracket,
    /// Enter; behaves like `NextPage`.
    Confirm,
    /// Any unbound key.
    Redraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Quit,
    /// Same bracket, possibly another page.
    View(ViewState),
    /// A bracket was entered, even if the move wrapped back to the same one.
    Enter(ViewState),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub bracket: usize,
    pub page: usize,
}

/// Page to open when arriving at a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    First,
    Last,
}

impl ViewState {
    /// (0, 0), moved forward past any leading empty brackets.
    pub fn initial(source: &impl PageSource) -> Self {
        Self::default().settle(1, Landing::First, source)
    }

    pub fn apply(self, input: NavInput, source: &impl PageSource) -> Transition {
        match input {
            NavInput::Quit => Transition::Quit,
            NavInput::NextPage | NavInput::Confirm
                if self.page + 1 < source.page_count(self.bracket) =>
            {
                Transition::View(Self { page: self.page + 1, ..self })
            }
            NavInput::NextPage | NavInput::Confirm | NavInput::NextBracket => {
                Transition::Enter(self.step_bracket(1, Landing::First, source))
            }
            NavInput::PrevPage if self.page > 0 => {
                Transition::View(Self { page: self.page - 1, ..self })
            }
            NavInput::PrevPage => Transition::Enter(self.step_bracket(-1, Landing::Last, source)),
            NavInput::PrevBracket => {
                Transition::Enter(self.step_bracket(-1, Landing::First, source))
            }
            NavInput::Redraw => Transition::View(self),
        }
    }

    /// Pull the page back into range after the page count shrank.
    pub fn clamp(self, source: &impl PageSource) -> Self {
        let bracket = self.bracket.min(source.bracket_count().saturating_sub(1));
        let page = self.page.min(source.page_count(bracket).saturating_sub(1));
        Self { bracket, page }
    }

    fn step_bracket(self, delta: isize, landing: Landing, source: &impl PageSource) -> Self {
        let bracket = wrap(self.bracket, delta, source.bracket_count());
        Self { bracket, page: 0 }.settle(delta.signum(), landing, source)
    }

    /// Keep moving in `direction` while the bracket is empty. Stops after one
    /// full lap so an all-empty source can't spin forever.
    fn settle(self, direction: isize, landing: Landing, source: &impl PageSource) -> Self {
        let count = source.bracket_count();
        let mut bracket = self.bracket;
        for _ in 0..count {
            if !source.is_empty(bracket) {
                break;
            }
            bracket = wrap(bracket, direction, count);
        }
        let page = match landing {
            Landing::First => 0,
            Landing::Last => source.page_count(bracket).saturating_sub(1),
        };
        Self { bracket, page }
    }
}

/// `(index + delta) mod count`, wrapping both ways.
pub fn wrap(index: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count = count as isize;
    (index as isize + delta).rem_euclid(count) as usize
}
