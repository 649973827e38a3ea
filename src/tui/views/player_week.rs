use crossterm::event::{KeyCode, KeyEvent};
use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use crate::models::PlayerDetailsResponse;
use crate::player_week::{star_week_window, sweater_line, weekly_stats, WeekWindow};
use crate::state::UiState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Action, KeyResult, View};

/// Featured player card with totals for the last complete week
pub struct PlayerWeekView {
    player_id: i64,
    window: WeekWindow,
}

impl PlayerWeekView {
    pub fn new(player_id: i64) -> Self {
        Self::for_window(player_id, star_week_window(Local::now().date_naive()))
    }

    pub fn for_window(player_id: i64, window: WeekWindow) -> Self {
        PlayerWeekView { player_id, window }
    }

    fn card(&self, player: &PlayerDetailsResponse, theme: &Theme) -> Text<'static> {
        let stats = weekly_stats(player, self.window);
        Text::from(vec![
            Line::from(Span::styled(player.full_name(), theme.card_title_style())),
            Line::from(Span::styled(sweater_line(player), theme.list_normal_style())),
            Line::from(Span::styled(self.window.label(), theme.hint_style())),
            Line::default(),
            Line::from(Span::styled(
                format!("{:>6} {:>6} {:>6} {:>6}", "Games", "Goals", "Assists", "Points"),
                theme.list_header_style(),
            )),
            Line::from(Span::styled(
                format!(
                    "{:>6} {:>6} {:>7} {:>6}",
                    stats.games, stats.goals, stats.assists, stats.points
                ),
                theme.list_normal_style(),
            )),
        ])
    }
}

impl View for PlayerWeekView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.card_border_style())
            .title(Span::styled(" Star of the Week ", theme.card_title_style()));

        let content = match state.player_details.get(&self.player_id) {
            Some(player) => self.card(player, theme),
            None => Text::from("Loading player..."),
        };
        f.render_widget(
            Paragraph::new(content).style(theme.base_style()).block(block),
            area,
        );
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &UiState) -> KeyResult {
        match key.code {
            KeyCode::Esc => KeyResult::GoBack,
            _ => KeyResult::NotHandled,
        }
    }

    fn on_enter(&self) -> Option<Action> {
        Some(Action::LoadPlayer(self.player_id))
    }

    fn breadcrumb_label(&self) -> String {
        "Featured Player".to_string()
    }
}
