use super::traits::View;

/// Main tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Scores,
    Teams,
    Star,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Scores, Tab::Teams, Tab::Star, Tab::Favorites];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Scores => "Scores",
            Tab::Teams => "Teams",
            Tab::Star => "Star of the Week",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn number(&self) -> usize {
        match self {
            Tab::Scores => 1,
            Tab::Teams => 2,
            Tab::Star => 3,
            Tab::Favorites => 4,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        match n {
            1 => Some(Tab::Scores),
            2 => Some(Tab::Teams),
            3 => Some(Tab::Star),
            4 => Some(Tab::Favorites),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Scores => Tab::Teams,
            Tab::Teams => Tab::Star,
            Tab::Star => Tab::Favorites,
            Tab::Favorites => Tab::Scores,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Scores => Tab::Favorites,
            Tab::Teams => Tab::Scores,
            Tab::Star => Tab::Teams,
            Tab::Favorites => Tab::Star,
        }
    }
}

/// Application state managing navigation
pub struct AppState {
    pub current_tab: Tab,
    root_view: Box<dyn View>,
    child_views: Vec<Box<dyn View>>,
    pub breadcrumb: Vec<String>,
}

impl AppState {
    pub fn new(initial_tab: Tab, root_view: Box<dyn View>) -> Self {
        let breadcrumb = vec![initial_tab.label().to_string(), root_view.breadcrumb_label()];
        AppState {
            current_tab: initial_tab,
            root_view,
            child_views: Vec::new(),
            breadcrumb,
        }
    }

    /// Get the current active view (top of stack)
    pub fn current_view(&mut self) -> &mut Box<dyn View> {
        self.child_views.last_mut().unwrap_or(&mut self.root_view)
    }

    /// Push a new view onto the stack
    pub fn push_view(&mut self, view: Box<dyn View>) {
        self.breadcrumb.push(view.breadcrumb_label());
        self.child_views.push(view);
    }

    /// Pop the current view from the stack
    /// Returns false if we're already at the root view
    pub fn pop_view(&mut self) -> bool {
        if self.child_views.pop().is_some() {
            self.breadcrumb.pop();
            true
        } else {
            false
        }
    }

    /// Get the current navigation depth (0 = root view)
    pub fn depth(&self) -> usize {
        self.child_views.len()
    }

    /// Check if we're at the root level of the current tab
    pub fn at_root(&self) -> bool {
        self.depth() == 0
    }

    /// Switch tabs, replacing the whole view stack with a new root view
    pub fn replace_root(&mut self, tab: Tab, view: Box<dyn View>) {
        self.current_tab = tab;
        self.child_views.clear();
        self.breadcrumb.clear();
        self.breadcrumb.push(tab.label().to_string());
        self.breadcrumb.push(view.breadcrumb_label());
        self.root_view = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::views::{FavoritesView, GameDetailView, GameListView, TeamStatsView};

    #[test]
    fn test_tab_cycle() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
            assert_eq!(Tab::from_number(tab.number()), Some(tab));
        }
        assert_eq!(Tab::Favorites.next(), Tab::Scores);
        assert_eq!(Tab::from_number(5), None);
    }

    #[test]
    fn test_push_and_pop_keep_breadcrumb_in_sync() {
        let mut app = AppState::new(Tab::Scores, Box::new(GameListView::new()));
        assert_eq!(app.breadcrumb, vec!["Scores", "Games"]);
        assert!(app.at_root());

        app.push_view(Box::new(GameDetailView::new(2024020002, "TOR @ OTT".to_string())));
        assert_eq!(app.depth(), 1);
        assert_eq!(app.breadcrumb.last().map(String::as_str), Some("TOR @ OTT"));

        assert!(app.pop_view());
        assert!(!app.pop_view());
        assert_eq!(app.breadcrumb, vec!["Scores", "Games"]);
    }

    #[test]
    fn test_replace_root_clears_stack() {
        let mut app = AppState::new(Tab::Scores, Box::new(GameListView::new()));
        app.push_view(Box::new(GameDetailView::new(1, "A @ B".to_string())));

        app.replace_root(Tab::Teams, Box::new(TeamStatsView::new()));
        assert_eq!(app.current_tab, Tab::Teams);
        assert!(app.at_root());
        assert_eq!(app.breadcrumb, vec!["Teams", "Team Stats"]);

        app.replace_root(Tab::Favorites, Box::new(FavoritesView::new()));
        assert_eq!(app.breadcrumb[0], "Favorites");
    }
}
