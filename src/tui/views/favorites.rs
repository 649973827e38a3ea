use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use crate::state::UiState;
use crate::tui::theme::{Theme, LIST_HIGHLIGHT_SYMBOL};
use crate::tui::traits::{Action, KeyResult, View};

pub struct FavoritesView {
    list_state: ListState,
}

impl FavoritesView {
    pub fn new() -> Self {
        FavoritesView {
            list_state: ListState::default().with_selected(Some(0)),
        }
    }
}

impl Default for FavoritesView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for FavoritesView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border_style())
            .title(Span::styled(" Favorite Teams ", theme.card_title_style()));

        if state.favorites.is_empty() {
            let paragraph = Paragraph::new("No favorite teams yet. Open a game and press h or a.")
                .style(theme.base_style())
                .block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(selected.min(state.favorites.len() - 1)));

        let items: Vec<ListItem> = state
            .favorites
            .iter()
            .map(|favorite| ListItem::new(favorite.team_name.clone()))
            .collect();
        let list = List::new(items)
            .style(theme.base_style())
            .highlight_style(theme.list_selected_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL)
            .block(block);

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn handle_key(&mut self, key: KeyEvent, state: &UiState) -> KeyResult {
        let selected = self.list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up => {
                self.list_state.select(Some(selected.saturating_sub(1)));
                KeyResult::Handled
            }
            KeyCode::Down => {
                if selected + 1 < state.favorites.len() {
                    self.list_state.select(Some(selected + 1));
                }
                KeyResult::Handled
            }
            KeyCode::Char('d') | KeyCode::Delete => match state.favorites.get(selected) {
                Some(favorite) => KeyResult::Action(Action::RemoveFavorite(favorite.id)),
                None => KeyResult::Handled,
            },
            KeyCode::Esc => KeyResult::GoBack,
            _ => KeyResult::NotHandled,
        }
    }

    fn breadcrumb_label(&self) -> String {
        "Saved Teams".to_string()
    }
}
