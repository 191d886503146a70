//! Type definitions and enums for the application screens and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game.
    MainMenu(MainMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze is displayed, the runner is replayed
    /// through it and the player status is shown.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Play" menu option.
    ///
    /// This variant represents the option that enters the maze screen.
    Play,
    /// "Quit" menu option.
    ///
    /// This variant represents the "Quit" option in the main menu.
    Quit,
}

impl MainMenuItem {
    /// Every menu item, in display order.
    pub(crate) const ALL: [Self; 2] = [Self::Play, Self::Quit];

    /// Returns the label shown for the item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Play | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Play | Self::Quit => Self::Play,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::Play);
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::Play));
        assert_eq!(in_game, Screen::InGame);
        assert_ne!(main_menu, in_game);
        assert_ne!(main_menu, Screen::MainMenu(MainMenuItem::Quit));
    }

    #[test]
    fn test_menu_navigation_stops_at_the_ends() {
        assert_eq!(MainMenuItem::Play.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::Play);
        assert_eq!(MainMenuItem::Play.previous(), MainMenuItem::Play);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = MainMenuItem::ALL.iter().map(|item| item.label()).collect();

        assert_eq!(labels, ["Play", "Quit"]);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::Play), "Play");
    }
}
