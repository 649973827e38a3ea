use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use std::time::SystemTime;
use crate::config::DEFAULT_TIME_FORMAT;
use crate::tui::theme::Theme;

const ROOT_HELP: [&str; 6] = [
    "↑/↓ Navigate",
    "Enter Open",
    "←/→ Tabs",
    "t Theme",
    "r Refresh",
    "q Quit",
];

const CHILD_HELP: [&str; 4] = ["↑/↓ Scroll", "h/a Favorite", "Esc Back", "q Quit"];

/// What the status bar shows besides the help text
pub struct StatusInfo<'a> {
    pub at_root: bool,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub last_refresh: Option<SystemTime>,
    pub time_format: &'a str,
}

/// Render the bottom status bar with contextual help and refresh time
pub fn render_status_bar(f: &mut Frame, area: Rect, info: &StatusInfo, theme: &Theme) {
    let mut spans = Vec::new();

    if let Some(err) = info.error {
        spans.push(Span::styled(format!("ERROR: {}", err), theme.status_error_style()));
    } else if info.is_loading {
        spans.push(Span::styled("Loading...", theme.list_header_style()));
    } else {
        let help: &[&str] = if info.at_root { &ROOT_HELP } else { &CHILD_HELP };
        for (i, item) in help.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", theme.hint_style()));
            }
            spans.push(Span::styled(*item, theme.hint_style()));
        }
    }

    // Add refresh time on the right side
    if let Some(refresh_time) = info.last_refresh {
        let refresh_text = format!(
            "Last refresh: {}",
            format_refresh_time(refresh_time, info.time_format)
        );

        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let padding = (area.width as usize).saturating_sub(used + refresh_text.chars().count());
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }

        spans.push(Span::styled(refresh_text, theme.hint_style()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme.base_style());
    f.render_widget(paragraph, area);
}

/// Format the refresh time using the configured format
fn format_refresh_time(time: SystemTime, time_format: &str) -> String {
    use chrono::{DateTime, Local};
    use std::fmt::Write;

    let datetime: DateTime<Local> = time.into();
    let mut text = String::new();
    if write!(text, "{}", datetime.format(time_format)).is_err() {
        text.clear();
        let _ = write!(text, "{}", datetime.format(DEFAULT_TIME_FORMAT));
    }
    text
}
