mod app;
mod components;
mod error;
mod theme;
mod traits;
mod views;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::data_provider::NHLDataProvider;
use crate::favorites::FavoriteStore;
use crate::layout_constants::{
    BREADCRUMB_HEIGHT, EVENT_POLL_INTERVAL_MS, STATUS_BAR_HEIGHT, TAB_BAR_HEIGHT,
};
use crate::live;
use crate::state::{SharedDataHandle, UiState};
use app::{AppState, Tab};
use components::status_bar::StatusInfo;
use components::{render_breadcrumb, render_status_bar, render_tab_bar};
use theme::Theme;
use traits::{Action, KeyResult, View};
use views::{FavoritesView, GameListView, PlayerWeekView, TeamStatsView};

pub use error::{TuiError, TuiResult};

/// Handles the event loop needs to reach the rest of the application
pub struct TuiContext {
    pub shared: SharedDataHandle,
    pub refresh_tx: mpsc::Sender<()>,
    pub provider: Arc<dyn NHLDataProvider>,
    pub store: Option<FavoriteStore>,
}

pub async fn run(ctx: TuiContext) -> TuiResult<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &ctx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, ctx: &TuiContext) -> TuiResult<()> {
    if let Some(store) = &ctx.store {
        live::reload_favorites(store, &ctx.shared).await;
    }

    let initial = ctx.shared.read().await.clone();
    let mut app_state = AppState::new(Tab::Scores, root_view(Tab::Scores, &initial));

    loop {
        let snapshot = ctx.shared.read().await.clone();
        let theme = Theme::for_mode(snapshot.is_dark_theme, &snapshot.config.theme);

        terminal.draw(|f| draw(f, &mut app_state, &snapshot, &theme))?;

        if event::poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key_event(key, &mut app_state, &snapshot, ctx).await
                {
                    break; // Exit requested
                }
            }
        }
    }

    info!("TUI exiting");
    Ok(())
}

fn draw(f: &mut Frame, app_state: &mut AppState, state: &UiState, theme: &Theme) {
    let size = f.area();
    f.render_widget(Block::default().style(theme.base_style()), size);

    // Tab bar, breadcrumb, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Length(BREADCRUMB_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(size);

    render_tab_bar(f, chunks[0], app_state.current_tab, theme);
    render_breadcrumb(f, chunks[1], &app_state.breadcrumb, theme);
    app_state.current_view().render(f, chunks[2], state, theme);

    let info = StatusInfo {
        at_root: app_state.at_root(),
        is_loading: state.is_loading,
        error: state.error_message.as_deref(),
        last_refresh: state.last_refresh,
        time_format: &state.config.time_format,
    };
    render_status_bar(f, chunks[3], &info, theme);
}

fn root_view(tab: Tab, state: &UiState) -> Box<dyn View> {
    match tab {
        Tab::Scores => Box::new(GameListView::new()),
        Tab::Teams => Box::new(TeamStatsView::new()),
        Tab::Star => Box::new(PlayerWeekView::new(state.config.featured_player_id)),
        Tab::Favorites => Box::new(FavoritesView::new()),
    }
}

/// Returns true when the user asked to quit
async fn handle_key_event(
    key: KeyEvent,
    app_state: &mut AppState,
    state: &UiState,
    ctx: &TuiContext,
) -> bool {
    // Global keys
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('t') => {
            ctx.shared.write().await.toggle_theme();
            return false;
        }
        KeyCode::Char('r') => {
            if let Err(e) = request_refresh(ctx) {
                report_error(ctx, e).await;
            }
            return false;
        }
        _ => {}
    }

    // Tab switching at root level
    if app_state.at_root() {
        let target = match key.code {
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|n| Tab::from_number(n as usize)),
            KeyCode::Left => Some(app_state.current_tab.prev()),
            KeyCode::Right => Some(app_state.current_tab.next()),
            _ => None,
        };
        if let Some(tab) = target {
            switch_tab(app_state, tab, state, ctx).await;
            return false;
        }
    }

    match app_state.current_view().handle_key(key, state) {
        KeyResult::Handled | KeyResult::NotHandled => {}
        KeyResult::DrillDown(new_view) => {
            let action = new_view.on_enter();
            app_state.push_view(new_view);
            if let Some(action) = action {
                run_action(ctx, action).await;
            }
        }
        KeyResult::GoBack => {
            app_state.pop_view();
        }
        KeyResult::Action(action) => run_action(ctx, action).await,
    }
    false
}

async fn switch_tab(app_state: &mut AppState, new_tab: Tab, state: &UiState, ctx: &TuiContext) {
    if app_state.current_tab == new_tab {
        return; // Already on this tab
    }

    let view = root_view(new_tab, state);
    let action = view.on_enter();
    app_state.replace_root(new_tab, view);
    if let Some(action) = action {
        run_action(ctx, action).await;
    }
}

async fn run_action(ctx: &TuiContext, action: Action) {
    if let Err(e) = dispatch(ctx, action).await {
        report_error(ctx, e).await;
    }
}

async fn report_error(ctx: &TuiContext, error: TuiError) {
    warn!("{}", error);
    ctx.shared.write().await.error_message = Some(error.to_string());
}

/// Wake the live loop for an immediate reload
fn request_refresh(ctx: &TuiContext) -> TuiResult<()> {
    match ctx.refresh_tx.try_send(()) {
        Ok(()) => Ok(()),
        Err(TrySendError::Full(())) => {
            debug!("Refresh already pending");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Start the background work for an action
async fn dispatch(ctx: &TuiContext, action: Action) -> TuiResult<JoinHandle<()>> {
    debug!("Dispatching {:?}", action);
    let shared = Arc::clone(&ctx.shared);

    let handle = match action {
        Action::LoadGameStory(game_id) => {
            let provider = Arc::clone(&ctx.provider);
            tokio::spawn(async move {
                live::load_game_story(provider.as_ref(), &shared, game_id).await;
            })
        }
        Action::LoadPlayer(player_id) => {
            let provider = Arc::clone(&ctx.provider);
            tokio::spawn(async move {
                live::load_player_details(provider.as_ref(), &shared, player_id).await;
            })
        }
        Action::ToggleFavorite(team_name) => {
            let store = ctx.store.clone().ok_or(TuiError::NoFavoriteStore)?;
            tokio::spawn(async move {
                match store.toggle_favorite(&team_name).await {
                    Ok(now_favorite) => info!("{} favorite: {}", team_name, now_favorite),
                    Err(e) => {
                        warn!("Failed to toggle {}: {}", team_name, e);
                        shared.write().await.error_message = Some(e.to_string());
                    }
                }
                live::reload_favorites(&store, &shared).await;
            })
        }
        Action::RemoveFavorite(id) => {
            let store = ctx.store.clone().ok_or(TuiError::NoFavoriteStore)?;
            tokio::spawn(async move {
                if let Err(e) = store.remove_favorite(id).await {
                    warn!("Failed to remove favorite {}: {}", id, e);
                    shared.write().await.error_message = Some(e.to_string());
                }
                live::reload_favorites(&store, &shared).await;
            })
        }
    };
    Ok(handle)
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::key;
    use crate::config::Config;
    use crate::dev::mock_client::MockClient;
    use crate::fixtures::create_mock_schedule;
    use crate::state;

    fn context(store: Option<FavoriteStore>) -> (TuiContext, mpsc::Receiver<()>) {
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let shared = state::shared(Config::default());
        let ctx = TuiContext {
            shared,
            refresh_tx,
            provider: Arc::new(MockClient::new()),
            store,
        };
        (ctx, refresh_rx)
    }

    fn loaded_state() -> UiState {
        UiState {
            is_loading: false,
            schedule: Some(create_mock_schedule()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_quit_and_theme_keys() {
        let (ctx, _rx) = context(None);
        let state = UiState::default();
        let mut app = AppState::new(Tab::Scores, root_view(Tab::Scores, &state));

        assert!(!handle_key_event(key(KeyCode::Char('t')), &mut app, &state, &ctx).await);
        assert!(ctx.shared.read().await.is_dark_theme);
        assert!(handle_key_event(key(KeyCode::Char('q')), &mut app, &state, &ctx).await);
    }

    #[tokio::test]
    async fn test_number_keys_switch_tabs_only_at_root() {
        let (ctx, _rx) = context(None);
        let state = loaded_state();
        let mut app = AppState::new(Tab::Scores, root_view(Tab::Scores, &state));

        handle_key_event(key(KeyCode::Char('2')), &mut app, &state, &ctx).await;
        assert_eq!(app.current_tab, Tab::Teams);
        handle_key_event(key(KeyCode::Left), &mut app, &state, &ctx).await;
        assert_eq!(app.current_tab, Tab::Scores);

        // Drill into the first game, then number keys belong to the view
        handle_key_event(key(KeyCode::Enter), &mut app, &state, &ctx).await;
        assert_eq!(app.depth(), 1);
        handle_key_event(key(KeyCode::Char('4')), &mut app, &state, &ctx).await;
        assert_eq!(app.current_tab, Tab::Scores);

        handle_key_event(key(KeyCode::Esc), &mut app, &state, &ctx).await;
        assert!(app.at_root());
    }

    #[tokio::test]
    async fn test_refresh_key_signals_live_loop() {
        let (ctx, mut rx) = context(None);
        let state = UiState::default();
        let mut app = AppState::new(Tab::Scores, root_view(Tab::Scores, &state));

        handle_key_event(key(KeyCode::Char('r')), &mut app, &state, &ctx).await;
        assert!(rx.try_recv().is_ok());

        // A second press while one is pending is not an error
        handle_key_event(key(KeyCode::Char('r')), &mut app, &state, &ctx).await;
        handle_key_event(key(KeyCode::Char('r')), &mut app, &state, &ctx).await;
        assert!(ctx.shared.read().await.error_message.is_none());
    }

    #[tokio::test]
    async fn test_refresh_after_loop_stopped_reports_error() {
        let (ctx, rx) = context(None);
        drop(rx);
        let state = UiState::default();
        let mut app = AppState::new(Tab::Scores, root_view(Tab::Scores, &state));

        handle_key_event(key(KeyCode::Char('r')), &mut app, &state, &ctx).await;
        assert_eq!(
            ctx.shared.read().await.error_message.as_deref(),
            Some("Failed to send refresh signal")
        );
    }

    #[tokio::test]
    async fn test_dispatch_toggle_favorite() {
        let store = FavoriteStore::in_memory().unwrap();
        let (ctx, _rx) = context(Some(store));

        dispatch(&ctx, Action::ToggleFavorite("Senators".to_string()))
            .await
            .unwrap()
            .await
            .unwrap();
        assert!(ctx.shared.read().await.is_favorite("Senators"));

        let id = ctx.shared.read().await.favorites[0].id;
        dispatch(&ctx, Action::RemoveFavorite(id))
            .await
            .unwrap()
            .await
            .unwrap();
        assert!(ctx.shared.read().await.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_without_store() {
        let (ctx, _rx) = context(None);
        let result = dispatch(&ctx, Action::ToggleFavorite("Jets".to_string())).await;
        assert!(matches!(result, Err(TuiError::NoFavoriteStore)));
    }

    #[tokio::test]
    async fn test_dispatch_loads_player() {
        let (ctx, _rx) = context(None);
        dispatch(&ctx, Action::LoadPlayer(8482116))
            .await
            .unwrap()
            .await
            .unwrap();
        assert!(ctx.shared.read().await.player_details.contains_key(&8482116));
    }

    #[test]
    fn test_full_frame_renders_chrome() {
        use ratatui::backend::TestBackend;

        let state = loaded_state();
        let theme = Theme::light(&state.config.theme);
        let mut app = AppState::new(Tab::Scores, root_view(Tab::Scores, &state));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app, &state, &theme)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("1. Scores"));
        assert!(text.contains("3. Star of the Week"));
        assert!(text.contains("Scores > Games"));
        assert!(text.contains("Enter Open"));
    }
}
