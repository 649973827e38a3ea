use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use crate::tui::app::Tab;
use crate::tui::theme::Theme;

/// Render the top tab bar with number shortcuts
pub fn render_tab_bar(f: &mut Frame, area: Rect, current_tab: Tab, theme: &Theme) {
    let mut spans = Vec::new();

    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", theme.hint_style()));
        }

        let label = format!("{}. {}", tab.number(), tab.label());

        let style = if *tab == current_tab {
            theme.tab_active_style()
        } else {
            theme.tab_inactive_style()
        };

        spans.push(Span::styled(label, style));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(theme.base_style())
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.card_border_style()));

    f.render_widget(paragraph, area);
}
