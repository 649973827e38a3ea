use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use crate::state::UiState;
use super::theme::Theme;

/// Work a view asks the event loop to do on its behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadGameStory(i64),
    LoadPlayer(i64),
    /// Star or unstar a team by common name
    ToggleFavorite(String),
    RemoveFavorite(i64),
}

/// Result of key handling by a view
pub enum KeyResult {
    /// The view consumed the key event
    Handled,
    /// The view didn't handle this key, pass to parent
    NotHandled,
    /// Request to drill down into a child view
    DrillDown(Box<dyn View>),
    /// Request to go back up one level
    GoBack,
    /// Ask the event loop to perform an action
    Action(Action),
}

/// Core trait for all views in the hierarchical TUI
pub trait View: Send {
    /// Render the view from a snapshot of the shared state
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme);

    /// Handle a key event
    /// Returns KeyResult indicating what action should be taken
    fn handle_key(&mut self, key: KeyEvent, state: &UiState) -> KeyResult;

    /// Action to run when the view becomes visible
    fn on_enter(&self) -> Option<Action> {
        None
    }

    /// Get the breadcrumb label for this view
    fn breadcrumb_label(&self) -> String {
        "Unknown".to_string()
    }
}
