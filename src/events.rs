//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::{
    session::{StartOutcome, TickOutcome},
    types::{MainMenuItem, Screen},
    App,
};

/// Longest time to wait for a key press before redrawing.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. The poll never waits past the next replay tick, so the
/// runner keeps moving at the configured pace while the user is idle.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = app
        .session
        .time_until_tick(Instant::now())
        .map_or(POLL_TIMEOUT, |until_tick| until_tick.min(POLL_TIMEOUT));

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => app.exit = true,
                KeyCode::Char('j') => handle_j_events(app),
                KeyCode::Char('k') => handle_k_events(app),
                KeyCode::Char('l') => handle_l_events(app),
                KeyCode::Char('h') => handle_h_events(app),
                KeyCode::Char('s') => handle_s_events(app),
                KeyCode::Char('r') => handle_r_events(app),
                _ => {}
            }
        }
    }

    if matches!(app.screen, Screen::InGame) {
        advance_replay(app, Instant::now())?;
    }

    Ok(())
}

/// Runs the replay step that is due, if any, and records how a finished run ended.
pub(crate) fn advance_replay(app: &mut App, now: Instant) -> Result<()> {
    match app.session.tick(now)? {
        Some(TickOutcome::Cleared { level }) => {
            app.notice = Some(format!("Exit reached, now on level {level}"));
        }
        Some(TickOutcome::Died) => {
            app.notice = Some("The runner died, back to level 1".to_owned());
        }
        Some(TickOutcome::Advanced { .. }) | None => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    if let Screen::MainMenu(item) = app.screen {
        app.screen = Screen::MainMenu(item.next());
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    if let Screen::MainMenu(item) = app.screen {
        app.screen = Screen::MainMenu(item.previous());
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items. Selecting
/// "Play" enters the maze screen and selecting "Quit" ends the application.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Play) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::InGame => {}
    }
}

/// Handles 'h' key press events for backward navigation.
///
/// Leaving the maze screen resets the session, so no replay keeps running behind the menu.
pub(crate) fn handle_h_events(app: &mut App) {
    if matches!(app.screen, Screen::InGame) {
        app.session.reset();
        app.notice = None;
        app.screen = Screen::MainMenu(MainMenuItem::Play);
    }
}

/// Handles 's' key press events, the Start control of the maze screen.
///
/// Start is disabled while a replay is in flight; the session reports that as busy and nothing
/// changes.
pub(crate) fn handle_s_events(app: &mut App) {
    if !matches!(app.screen, Screen::InGame) {
        return;
    }

    match app.session.start(Instant::now()) {
        StartOutcome::Started { .. } => app.notice = None,
        StartOutcome::NoPath => {
            app.notice = Some("No route through the maze, generated a new one".to_owned());
        }
        StartOutcome::Busy => {}
    }
}

/// Handles 'r' key press events, the Reset control of the maze screen.
pub(crate) fn handle_r_events(app: &mut App) {
    if matches!(app.screen, Screen::InGame) {
        app.session.reset();
        app.notice = Some("Game reset".to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    /// Creates an app on a small seeded maze.
    fn create_test_app() -> App {
        App::new(&Config {
            width: 7,
            height: 7,
            seed: Some(21),
            ..Config::default()
        })
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = create_test_app();

        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_k_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Play));
        handle_l_events(&mut app);
        assert_eq!(app.screen, Screen::InGame);
    }

    #[test]
    fn test_quit_from_menu() {
        let mut app = create_test_app();

        handle_j_events(&mut app);
        handle_l_events(&mut app);

        assert!(app.exit);
    }

    #[test]
    fn test_start_is_ignored_outside_the_maze_screen() {
        let mut app = create_test_app();

        handle_s_events(&mut app);

        assert!(!app.session.is_busy());
    }

    #[test]
    fn test_start_disables_itself_until_reset() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;

        handle_s_events(&mut app);
        assert!(app.session.is_busy());
        advance_replay(&mut app, Instant::now()).expect("replay should advance");
        let grid = app.session.grid().clone();

        handle_s_events(&mut app);
        assert_eq!(app.session.grid(), &grid, "busy start should change nothing");
        assert!(app.session.is_busy());

        handle_r_events(&mut app);
        assert!(!app.session.is_busy());
        assert_eq!(app.notice.as_deref(), Some("Game reset"));
    }

    #[test]
    fn test_leaving_the_maze_resets_the_session() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;

        handle_s_events(&mut app);
        handle_h_events(&mut app);

        assert!(!app.session.is_busy());
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Play));
    }

    #[test]
    fn test_replay_runs_to_a_notice() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        let mut now = Instant::now();

        handle_s_events(&mut app);
        while app.session.is_busy() {
            advance_replay(&mut app, now).expect("replay should advance");
            now += app.session.tick_delay();
        }

        assert!(app.notice.is_some(), "a finished run should leave a notice");
    }
}
