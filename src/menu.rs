/// Keyboard-driven main and options menus.

use crate::sound::VOLUME_MAX;

pub const BUTTON_COUNT: usize = 4;

pub const MAIN_LABELS: [&str; BUTTON_COUNT] = ["NEW GAME", "CONTINUE", "OPTIONS", "EXIT"];
pub const OPTION_LABELS: [&str; BUTTON_COUNT] = ["MUSIC VOL", "SFX VOL", "DIFFICULTY", "BACK"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MenuScreen {
    #[default]
    Main,
    Options,
}

/// What the game should do after a button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    Continue,
    OpenOptions,
    Exit,
    Back,
    MusicVolume(u8),
    SfxVolume(u8),
    /// Relative change, the session clamps the result.
    Difficulty(i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub screen: MenuScreen,
    pub selected: usize,
    pub music: u8,
    pub sfx: u8,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            screen: MenuScreen::Main,
            selected: 0,
            music: 5,
            sfx: 5,
        }
    }
}

fn step(value: u8, change: i32) -> u8 {
    (value as i32 + change).clamp(0, VOLUME_MAX as i32) as u8
}

impl Menu {
    pub fn labels(&self) -> &'static [&'static str; BUTTON_COUNT] {
        match self.screen {
            MenuScreen::Main => &MAIN_LABELS,
            MenuScreen::Options => &OPTION_LABELS,
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(BUTTON_COUNT - 1);
    }

    /// Press the selected button.  `change` is -1 or +1 for the value
    /// buttons of the options screen (left/right), ignored elsewhere.
    pub fn activate(&mut self, change: i32) -> MenuAction {
        match (self.screen, self.selected) {
            (MenuScreen::Main, 0) => MenuAction::NewGame,
            (MenuScreen::Main, 1) => MenuAction::Continue,
            (MenuScreen::Main, 2) => {
                self.screen = MenuScreen::Options;
                MenuAction::OpenOptions
            }
            (MenuScreen::Main, _) => MenuAction::Exit,
            (MenuScreen::Options, 0) => {
                self.music = step(self.music, change);
                MenuAction::MusicVolume(self.music)
            }
            (MenuScreen::Options, 1) => {
                self.sfx = step(self.sfx, change);
                MenuAction::SfxVolume(self.sfx)
            }
            (MenuScreen::Options, 2) => MenuAction::Difficulty(change),
            (MenuScreen::Options, _) => {
                self.screen = MenuScreen::Main;
                MenuAction::Back
            }
        }
    }
}
