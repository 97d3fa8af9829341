use crate::state::navigation::ViewState;

#[derive(Debug, Default)]
pub struct AppState {
    /// Bracket and page currently on screen.
    pub view: ViewState,
    /// Bracket whose short-bracket warning is still waiting to be seen.
    /// Cleared by the next key press.
    pub pending_warning: Option<usize>,
}
