use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Paragraph},
};

/// Lines moved by PageUp/PageDown
const PAGE_SIZE: u16 = 10;

/// Vertical scroll state for content taller than its viewport
#[derive(Debug, Default)]
pub struct Scrollable {
    pub scroll_offset: u16,
    pub content_height: usize,
    pub viewport_height: u16,
}

impl Scrollable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle scroll keys (Up, Down, PageUp, PageDown, Home, End)
    /// Returns true if the key was handled
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.scroll_down(1);
                true
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(PAGE_SIZE);
                true
            }
            KeyCode::PageDown => {
                self.scroll_down(PAGE_SIZE);
                true
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
                true
            }
            KeyCode::End => {
                self.scroll_offset = self.max_scroll();
                true
            }
            _ => false,
        }
    }

    fn scroll_down(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(n).min(self.max_scroll());
    }

    fn max_scroll(&self) -> u16 {
        let content = u16::try_from(self.content_height).unwrap_or(u16::MAX);
        content.saturating_sub(self.viewport_height)
    }

    fn clamp(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Scroll the least amount that brings `line` into view
    pub fn ensure_visible(&mut self, line: usize) {
        let line = u16::try_from(line).unwrap_or(u16::MAX);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if self.viewport_height > 0 && line >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = line + 1 - self.viewport_height;
        }
    }

    /// Record the sizes seen at render time and keep the offset in range
    pub fn update_sizes(&mut self, content_height: usize, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.clamp();
    }

    /// Render styled text inside an optional block at the current offset
    pub fn render_text(
        &mut self,
        f: &mut Frame,
        area: Rect,
        content: Text<'static>,
        block: Option<Block<'static>>,
        style: Style,
    ) {
        // Account for top and bottom borders
        let viewport_height = if block.is_some() {
            area.height.saturating_sub(2)
        } else {
            area.height
        };
        self.update_sizes(content.lines.len(), viewport_height);

        let mut paragraph = Paragraph::new(content)
            .style(style)
            .scroll((self.scroll_offset, 0));
        if let Some(b) = block {
            paragraph = paragraph.block(b);
        }

        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scroll_stays_in_range() {
        let mut scroll = Scrollable::new();
        scroll.update_sizes(30, 10);

        assert!(scroll.handle_key(key(KeyCode::Up)));
        assert_eq!(scroll.scroll_offset, 0);

        scroll.handle_key(key(KeyCode::PageDown));
        scroll.handle_key(key(KeyCode::PageDown));
        scroll.handle_key(key(KeyCode::PageDown));
        assert_eq!(scroll.scroll_offset, 20);

        scroll.handle_key(key(KeyCode::Home));
        assert_eq!(scroll.scroll_offset, 0);
        scroll.handle_key(key(KeyCode::End));
        assert_eq!(scroll.scroll_offset, 20);

        assert!(!scroll.handle_key(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut scroll = Scrollable::new();
        scroll.update_sizes(5, 10);
        scroll.handle_key(key(KeyCode::End));
        assert_eq!(scroll.scroll_offset, 0);
    }

    #[test]
    fn test_ensure_visible() {
        let mut scroll = Scrollable::new();
        scroll.update_sizes(50, 10);

        scroll.ensure_visible(15);
        assert_eq!(scroll.scroll_offset, 6);

        scroll.ensure_visible(8);
        assert_eq!(scroll.scroll_offset, 6);

        scroll.ensure_visible(2);
        assert_eq!(scroll.scroll_offset, 2);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = Scrollable::new();
        scroll.update_sizes(40, 10);
        scroll.handle_key(key(KeyCode::End));
        scroll.update_sizes(12, 10);
        assert_eq!(scroll.scroll_offset, 2);
    }
}
