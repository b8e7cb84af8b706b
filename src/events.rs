//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};
use tracing::info;

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Longest time to wait for input before handing control back to the frame loop.
///
/// This keeps the agent and the carving animation moving at a steady frame rate while no key is
/// pressed.
pub(crate) const INPUT_POLL_MS: u64 = 16;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code)?;
        }
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app),
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char(' ') if app.screen == Screen::InGame => app.start_pathfinding(),
        KeyCode::Char('r') if app.screen == Screen::InGame => app.reset_follower(),
        KeyCode::Char('g') if app.screen == Screen::InGame => {
            info!("regeneration requested");
            app.regenerate()?;
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Animate) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::ShowPath);
        }
        Screen::OptionsMenu(OptionsMenuItem::ShowPath) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::ShowPath);
        }
        Screen::OptionsMenu(OptionsMenuItem::ShowPath) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Animate);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. In the options menu it flips the highlighted setting in
/// place; a changed animation setting applies from the next regeneration.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Animate);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Animate) => {
            app.config.animate = !app.config.animate;
            info!(animate = app.config.animate, "carving animation toggled");
        }
        Screen::OptionsMenu(OptionsMenuItem::ShowPath) => {
            app.config.show_path = !app.config.show_path;
            info!(show_path = app.config.show_path, "path preview toggled");
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::InGame => {}
    }
}

/// Handles 'h' key press events for backward navigation.
///
/// Leaving the maze screen abandons the agent's walk.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.reset_follower();
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, follow::FollowerState};

    /// Creates a small app for event testing.
    fn create_test_app() -> App {
        App::new(Config {
            width: 3,
            height: 3,
            ..Config::default()
        })
        .expect("app should start")
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));
        handle_j_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_k_events(&mut app);
        handle_k_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));

        handle_l_events(&mut app);
        assert_eq!(app.screen, Screen::InGame);
    }

    #[test]
    fn test_options_toggle_settings() {
        let mut app = create_test_app();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Animate);
        let animate = app.config.animate;

        handle_l_events(&mut app);
        assert_eq!(app.config.animate, !animate);

        handle_j_events(&mut app);
        let show_path = app.config.show_path;
        handle_l_events(&mut app);
        assert_eq!(app.config.show_path, !show_path);

        handle_j_events(&mut app);
        handle_l_events(&mut app);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_in_game_keys() {
        let mut app = create_test_app();
        app.screen = Screen::InGame;

        handle_key(&mut app, KeyCode::Char(' ')).expect("space should start pathfinding");
        assert_eq!(app.follower.state(), FollowerState::Moving);

        handle_key(&mut app, KeyCode::Char('r')).expect("r should reset");
        assert_eq!(app.follower.state(), FollowerState::Idle);

        handle_key(&mut app, KeyCode::Char('g')).expect("g should regenerate");
        assert_eq!(app.grid.open_passages(), 8);

        handle_key(&mut app, KeyCode::Char('h')).expect("h should leave the maze");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));

        handle_key(&mut app, KeyCode::Char('q')).expect("q should quit");
        assert!(app.exit, "q sets the exit flag");
    }

    #[test]
    fn test_maze_keys_ignored_in_menus() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char(' ')).expect("ignored key");

        assert_eq!(app.follower.state(), FollowerState::Idle);
    }
}
