//! Main menu navigation

/// The main menu items, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    HighScores,
    Help,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "New Game",
            MenuItem::HighScores => "High Scores",
            MenuItem::Help => "Help",
            MenuItem::Quit => "Quit",
        }
    }

    pub fn all() -> [MenuItem; 4] {
        [
            MenuItem::NewGame,
            MenuItem::HighScores,
            MenuItem::Help,
            MenuItem::Quit,
        ]
    }
}

/// Cursor state for the main menu
#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor up, wrapping at the top
    pub fn move_up(&mut self) {
        let count = MenuItem::all().len();
        self.selected = (self.selected + count - 1) % count;
    }

    /// Move the cursor down, wrapping at the bottom
    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % MenuItem::all().len();
    }

    /// The currently highlighted item
    pub fn selected_item(&self) -> MenuItem {
        MenuItem::all()[self.selected]
    }
}
