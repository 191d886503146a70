//! Core application state and logic for the maze runner.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    player::StatusBoard,
    session::Session,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze runner.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Game session driving the maze, the player and the replay.
    ///
    /// This field owns every piece of mutable game state. Key handlers only reach it through the
    /// session's methods, and the status board inside it is what the status panel shows.
    pub(crate) session: Session<StatusBoard>,
    /// Short message about the last finished run.
    ///
    /// This field is shown under the maze and replaced whenever a run ends or the game is reset.
    pub(crate) notice: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    /// Creates a new instance of the App structure from the given configuration.
    ///
    /// The first maze is generated right away so the in-game screen always has something to draw.
    pub fn new(config: &Config) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Play),
            session: Session::new(config, StatusBoard::default()),
            notice: None,
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input, advances the replay and redraws the screen. The loop
    /// continues until the exit condition is `true`, after which the function returns to the call
    /// site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - Replay errors from [`Session::tick`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal
                .try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
