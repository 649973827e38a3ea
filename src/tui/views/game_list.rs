use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders},
};
use crate::formatting::{eastern_today, list_clock_text, list_status_label, score_text, team_record};
use crate::layout_constants::{GAME_ROW_HEIGHT, RECORD_COL_WIDTH, SCORE_COL_WIDTH, TEAM_NAME_COL_WIDTH};
use crate::models::{Game, TeamInfo};
use crate::sorting::group_and_sort_games;
use crate::state::UiState;
use crate::tui::components::Scrollable;
use crate::tui::theme::{Theme, FAVORITE_MARKER, LIST_HIGHLIGHT_SYMBOL};
use crate::tui::traits::{KeyResult, View};
use super::GameDetailView;

/// Games in display order: by date, then live first within each date
pub fn ordered_games(state: &UiState) -> Vec<Game> {
    group_and_sort_games(&state.all_games())
        .into_values()
        .flatten()
        .collect()
}

/// "TOR @ OTT"
pub fn matchup_label(game: &Game) -> String {
    format!("{} @ {}", game.away_team.abbrev, game.home_team.abbrev)
}

/// Selection follows the game, not its row, so re-sorting after a poll
/// keeps the same game highlighted
pub struct GameListView {
    selected_id: Option<i64>,
    scrollable: Scrollable,
}

impl GameListView {
    pub fn new() -> Self {
        GameListView {
            selected_id: None,
            scrollable: Scrollable::new(),
        }
    }

    /// Row of the selected game, first row when it's gone or unset
    fn selected_index(&self, games: &[Game]) -> usize {
        self.selected_id
            .and_then(|id| games.iter().position(|game| game.id == id))
            .unwrap_or(0)
    }

    fn select_index(&mut self, games: &[Game], index: usize) {
        self.selected_id = games.get(index).map(|game| game.id);
    }

    fn team_line(team: &TeamInfo, state: &UiState, prefix: &str, theme: &Theme, selected: bool) -> Line<'static> {
        let mut name = team.full_name();
        if state.is_favorite(&team.common_name.default) {
            name = format!("{} {}", name, FAVORITE_MARKER);
        }
        let text = format!(
            "{}{:<name_width$} {:<record_width$} {:>score_width$}",
            prefix,
            name,
            team_record(state.team_stats_for(team.id)),
            score_text(team),
            name_width = TEAM_NAME_COL_WIDTH,
            record_width = RECORD_COL_WIDTH,
            score_width = SCORE_COL_WIDTH
        );
        let style = if selected {
            theme.list_selected_style()
        } else {
            theme.list_normal_style()
        };
        Line::from(Span::styled(text, style))
    }

    /// Build the list text and the line where the selected game starts
    fn build_lines(&self, state: &UiState, theme: &Theme) -> (Text<'static>, usize) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut selected_line = 0;

        for (date, games) in group_and_sort_games(&state.all_games()) {
            lines.push(Line::from(Span::styled(date, theme.list_header_style())));
            for game in &games {
                let selected = Some(game.id) == self.selected_id;
                if selected {
                    selected_line = lines.len();
                }
                let prefix = if selected { LIST_HIGHLIGHT_SYMBOL } else { "  " };

                let status = list_status_label(&game.game_state);
                let clock = list_clock_text(game, state.game_details.get(&game.id), eastern_today(game));
                let status_style = if game.game_state.is_live() {
                    theme.live_style()
                } else {
                    theme.list_header_style()
                };
                lines.push(Line::from(vec![
                    Span::raw(prefix.to_string()),
                    Span::styled(status, status_style),
                    Span::styled(format!("  {}", clock.trim()), theme.hint_style()),
                ]));
                lines.push(Self::team_line(&game.away_team, state, "  ", theme, selected));
                lines.push(Self::team_line(&game.home_team, state, "  ", theme, selected));
                lines.push(Line::default());
            }
        }

        (Text::from(lines), selected_line)
    }
}

impl Default for GameListView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for GameListView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border_style())
            .title(Span::styled(" Games ", theme.card_title_style()));

        let games = ordered_games(state);
        if games.is_empty() {
            let message = if state.is_loading {
                "Loading games..."
            } else {
                "No games scheduled"
            };
            self.scrollable
                .render_text(f, area, Text::from(message), Some(block), theme.base_style());
            return;
        }

        let index = self.selected_index(&games);
        self.select_index(&games, index);
        let (content, selected_line) = self.build_lines(state, theme);
        // Keep the whole selected game on screen
        self.scrollable.ensure_visible(selected_line + GAME_ROW_HEIGHT - 1);
        self.scrollable.ensure_visible(selected_line.saturating_sub(1));
        self.scrollable
            .render_text(f, area, content, Some(block), theme.base_style());
    }

    fn handle_key(&mut self, key: KeyEvent, state: &UiState) -> KeyResult {
        let games = ordered_games(state);
        let index = self.selected_index(&games);
        match key.code {
            KeyCode::Up => {
                self.select_index(&games, index.saturating_sub(1));
                KeyResult::Handled
            }
            KeyCode::Down => {
                if index + 1 < games.len() {
                    self.select_index(&games, index + 1);
                } else {
                    self.select_index(&games, index);
                }
                KeyResult::Handled
            }
            KeyCode::Enter => match games.get(index) {
                Some(game) => KeyResult::DrillDown(Box::new(GameDetailView::new(
                    game.id,
                    matchup_label(game),
                ))),
                None => KeyResult::Handled,
            },
            KeyCode::Esc => KeyResult::GoBack,
            _ => KeyResult::NotHandled,
        }
    }

    fn breadcrumb_label(&self) -> String {
        "Games".to_string()
    }
}
