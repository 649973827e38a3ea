use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use crate::tui::theme::Theme;

/// Render the breadcrumb navigation trail
pub fn render_breadcrumb(f: &mut Frame, area: Rect, breadcrumb: &[String], theme: &Theme) {
    if breadcrumb.is_empty() {
        return;
    }

    let mut spans = Vec::new();

    for (i, crumb) in breadcrumb.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", theme.hint_style()));
        }

        let style = if i == breadcrumb.len() - 1 {
            // Last item (current location) is brighter
            theme.list_normal_style()
        } else {
            theme.hint_style()
        };

        spans.push(Span::styled(crumb.clone(), style));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(theme.base_style())
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.card_border_style()));

    f.render_widget(paragraph, area);
}
