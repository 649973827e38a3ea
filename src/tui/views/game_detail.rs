use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders},
};
use crate::commands::game::format_game_stats;
use crate::formatting::{detail_clock_text, detail_status_label, eastern_today, score_text, team_record};
use crate::models::{Game, TeamInfo};
use crate::state::UiState;
use crate::tui::components::Scrollable;
use crate::tui::theme::Theme;
use crate::tui::traits::{Action, KeyResult, View};

pub struct GameDetailView {
    game_id: i64,
    label: String,
    scrollable: Scrollable,
}

impl GameDetailView {
    pub fn new(game_id: i64, label: String) -> Self {
        GameDetailView {
            game_id,
            label,
            scrollable: Scrollable::new(),
        }
    }

    fn team_lines(team: &TeamInfo, key: char, state: &UiState, theme: &Theme) -> Vec<Line<'static>> {
        let favorite = if state.is_favorite(&team.common_name.default) {
            Span::styled("★ Favorited".to_string(), theme.list_selected_style())
        } else {
            Span::styled(format!("☆ Favorite ({})", key), theme.hint_style())
        };
        vec![
            Line::from(vec![
                Span::styled(format!("{:<4}", team.abbrev), theme.list_header_style()),
                Span::styled(format!("{:>3}  ", score_text(team)), theme.list_selected_style()),
                Span::styled(team.full_name(), theme.list_normal_style()),
                Span::raw("  "),
                favorite,
            ]),
            Line::from(Span::styled(
                format!("         {}", team_record(state.team_stats_for(team.id))),
                theme.hint_style(),
            )),
        ]
    }

    fn build_lines(game: &Game, state: &UiState, theme: &Theme) -> Text<'static> {
        let details = state.game_details.get(&game.id);
        let status_style = if game.game_state.is_live() {
            theme.live_style()
        } else {
            theme.list_header_style()
        };

        let mut lines = vec![
            Line::from(Span::styled(detail_status_label(&game.game_state), status_style)),
            Line::from(Span::styled(
                detail_clock_text(game, details, eastern_today(game)),
                theme.list_normal_style(),
            )),
            Line::default(),
        ];
        lines.extend(Self::team_lines(&game.away_team, 'a', state, theme));
        lines.extend(Self::team_lines(&game.home_team, 'h', state, theme));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Game Stats", theme.list_header_style())));

        let story = state.game_stories.get(&game.id);
        if story.is_none() && !game.game_state.is_scheduled() {
            lines.push(Line::from(Span::styled("Loading game stats...", theme.hint_style())));
        } else {
            for row in format_game_stats(game, story).lines() {
                lines.push(Line::from(Span::styled(row.to_string(), theme.list_normal_style())));
            }
        }
        Text::from(lines)
    }
}

impl View for GameDetailView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border_style())
            .title(Span::styled(format!(" {} ", self.label), theme.card_title_style()));

        let content = match state.find_game(self.game_id) {
            Some(game) => Self::build_lines(game, state, theme),
            None => Text::from("Game is no longer in the schedule"),
        };
        self.scrollable
            .render_text(f, area, content, Some(block), theme.base_style());
    }

    fn handle_key(&mut self, key: KeyEvent, state: &UiState) -> KeyResult {
        match key.code {
            KeyCode::Char('h') | KeyCode::Char('a') => {
                let Some(game) = state.find_game(self.game_id) else {
                    return KeyResult::Handled;
                };
                let team = if key.code == KeyCode::Char('h') {
                    &game.home_team
                } else {
                    &game.away_team
                };
                KeyResult::Action(Action::ToggleFavorite(team.common_name.default.clone()))
            }
            KeyCode::Esc => KeyResult::GoBack,
            _ => {
                if self.scrollable.handle_key(key) {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
        }
    }

    fn on_enter(&self) -> Option<Action> {
        Some(Action::LoadGameStory(self.game_id))
    }

    fn breadcrumb_label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoriteTeam;
    use crate::fixtures::{create_mock_game_details, create_mock_game_story, create_mock_schedule};
    use crate::tui::test_support::{key, render_to_string};

    fn state() -> UiState {
        let mut state = UiState {
            is_loading: false,
            schedule: Some(create_mock_schedule()),
            ..Default::default()
        };
        state
            .game_details
            .insert(2024020002, create_mock_game_details(2024020002));
        state
    }

    #[test]
    fn test_live_game_header_and_pending_stats() {
        let mut view = GameDetailView::new(2024020002, "TOR @ OTT".to_string());
        let output = render_to_string(&mut view, &state(), 80, 30);

        assert!(output.contains("TOR @ OTT"));
        assert!(output.contains("2nd - 12:34"));
        assert!(output.contains("Toronto Maple Leafs"));
        assert!(output.contains("☆ Favorite (h)"));
        assert!(output.contains("Loading game stats..."));
    }

    #[test]
    fn test_stats_and_favorited_team() {
        let mut state = state();
        state
            .game_stories
            .insert(2024020003, create_mock_game_story());
        state.favorites.push(FavoriteTeam {
            id: 1,
            team_name: "Devils".to_string(),
        });

        let mut view = GameDetailView::new(2024020003, "NYR @ NJD".to_string());
        let output = render_to_string(&mut view, &state, 80, 30);

        assert!(output.contains("Game Complete"));
        assert!(output.contains("★ Favorited"));
        assert!(output.contains("Faceoff %"));
        assert!(output.contains("48.0%"));
    }

    #[test]
    fn test_upcoming_game_has_no_stats() {
        let mut view = GameDetailView::new(2024020001, "BOS @ MTL".to_string());
        let output = render_to_string(&mut view, &state(), 80, 30);
        assert!(output.contains("Upcoming Game"));
        assert!(output.contains("No Game Stats Available"));
    }

    #[test]
    fn test_favorite_keys_pick_home_and_away() {
        let state = state();
        let mut view = GameDetailView::new(2024020002, "TOR @ OTT".to_string());

        match view.handle_key(key(KeyCode::Char('h')), &state) {
            KeyResult::Action(action) => {
                assert_eq!(action, Action::ToggleFavorite("Senators".to_string()))
            }
            _ => panic!("expected action"),
        }
        match view.handle_key(key(KeyCode::Char('a')), &state) {
            KeyResult::Action(action) => {
                assert_eq!(action, Action::ToggleFavorite("Maple Leafs".to_string()))
            }
            _ => panic!("expected action"),
        }
        assert!(matches!(view.handle_key(key(KeyCode::Esc), &state), KeyResult::GoBack));
    }

    #[test]
    fn test_entering_loads_story() {
        let view = GameDetailView::new(7, "A @ B".to_string());
        assert_eq!(view.on_enter(), Some(Action::LoadGameStory(7)));
    }

    #[test]
    fn test_missing_game() {
        let mut view = GameDetailView::new(1, "A @ B".to_string());
        let output = render_to_string(&mut view, &state(), 60, 10);
        assert!(output.contains("Game is no longer in the schedule"));
    }
}
