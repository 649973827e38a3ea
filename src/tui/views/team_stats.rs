use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use crate::commands::teams::sort_by_points;
use crate::models::TeamStats;
use crate::state::UiState;
use crate::tui::theme::{Theme, FAVORITE_MARKER, LIST_HIGHLIGHT_SYMBOL};
use crate::tui::traits::{KeyResult, View};

const COLUMNS: [&str; 8] = ["Team", "GP", "W", "L", "OT", "PTS", "GF", "GA"];

/// Teams ordered by points, selectable row by row
pub struct TeamStatsView {
    table_state: TableState,
}

impl TeamStatsView {
    pub fn new() -> Self {
        TeamStatsView {
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn sorted(state: &UiState) -> Vec<TeamStats> {
        let stats: Vec<TeamStats> = state.team_stats.values().cloned().collect();
        sort_by_points(&stats)
    }

    fn row(team: &TeamStats, favorite: bool) -> Row<'static> {
        let name = if favorite {
            format!("{} {}", team.team_full_name, FAVORITE_MARKER)
        } else {
            team.team_full_name.clone()
        };
        Row::new(vec![
            Cell::from(name),
            Cell::from(team.games_played.to_string()),
            Cell::from(team.wins.to_string()),
            Cell::from(team.losses.to_string()),
            Cell::from(team.ot_losses.to_string()),
            Cell::from(team.points.to_string()),
            Cell::from(team.goals_for.to_string()),
            Cell::from(team.goals_against.to_string()),
        ])
    }
}

impl Default for TeamStatsView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TeamStatsView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border_style())
            .title(Span::styled(" Team Stats ", theme.card_title_style()));

        let teams = Self::sorted(state);
        if teams.is_empty() {
            let paragraph = Paragraph::new("Loading team stats...")
                .style(theme.base_style())
                .block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let rows: Vec<Row> = teams
            .iter()
            .map(|team| {
                // Favorites store common names; full names end with them
                let favorite = state
                    .favorites
                    .iter()
                    .any(|fav| team.team_full_name.ends_with(&fav.team_name));
                Self::row(team, favorite)
            })
            .collect();

        let widths = [
            Constraint::Min(24),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
        ];
        let table = Table::new(rows, widths)
            .header(Row::new(COLUMNS).style(theme.list_header_style()))
            .style(theme.base_style())
            .row_highlight_style(theme.list_selected_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL)
            .block(block);

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn handle_key(&mut self, key: KeyEvent, state: &UiState) -> KeyResult {
        let count = state.team_stats.len();
        let selected = self.table_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up => {
                self.table_state.select(Some(selected.saturating_sub(1)));
                KeyResult::Handled
            }
            KeyCode::Down => {
                if selected + 1 < count {
                    self.table_state.select(Some(selected + 1));
                }
                KeyResult::Handled
            }
            KeyCode::Esc => KeyResult::GoBack,
            _ => KeyResult::NotHandled,
        }
    }

    fn breadcrumb_label(&self) -> String {
        "Team Stats".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::create_mock_team_stats;
    use crate::tui::test_support::{key, render_to_string};

    fn state() -> UiState {
        UiState {
            team_stats: create_mock_team_stats()
                .data
                .into_iter()
                .map(|s| (s.team_id, s))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_sorted_by_points() {
        let mut view = TeamStatsView::new();
        let output = render_to_string(&mut view, &state(), 80, 14);
        let bruins = output.find("Boston Bruins").unwrap();
        let kings = output.find("Los Angeles Kings").unwrap();
        assert!(bruins < kings);
        assert!(output.contains("PTS"));
    }

    #[test]
    fn test_loading_placeholder() {
        let mut view = TeamStatsView::new();
        let output = render_to_string(&mut view, &UiState::default(), 60, 5);
        assert!(output.contains("Loading team stats..."));
    }

    #[test]
    fn test_selection_bounds() {
        let state = state();
        let mut view = TeamStatsView::new();
        for _ in 0..20 {
            view.handle_key(key(KeyCode::Down), &state);
        }
        assert_eq!(view.table_state.selected(), Some(7));
        view.handle_key(key(KeyCode::Up), &state);
        assert_eq!(view.table_state.selected(), Some(6));
    }
}
