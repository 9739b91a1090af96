use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mystery_exe::passcode::MAX_LENGTH;
use mystery_exe::{Config, NavigationTracker, RoomNavigator, RoomView};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tracing::{info, warn};
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    TitleScreen,
    Terminal,
    InRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    Quit,
}

impl MenuOption {
    fn next(&self) -> Self {
        match self {
            MenuOption::NewGame => MenuOption::Quit,
            MenuOption::Quit => MenuOption::NewGame,
        }
    }
}

/// Whether the current room's clue image is on disk. A missing image is
/// shown in place of the clue and never blocks navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueImage {
    Available(PathBuf),
    Unavailable(PathBuf),
}

pub struct App<'a> {
    navigator: RoomNavigator<'a>,
    config: &'a Config,
    pub tracker: NavigationTracker,
    pub input: TextArea<'a>,
    pub room: Option<RoomView<'a>>,
    pub clue: Option<ClueImage>,
    pub message: String,
    pub message_style: Style,
    pub state: GameState,
    pub menu_selection: MenuOption,
    pub command_mode: bool,
    pub command_buffer: String,
    pub show_history: bool,
    pub should_quit: bool,
}

fn passcode_input<'a>() -> TextArea<'a> {
    let mut input = TextArea::default();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Passcode [ENTER: Access | :q Quit] "),
    );
    input.set_cursor_line_style(Style::default());
    input.set_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    input
}

impl<'a> App<'a> {
    pub fn new(navigator: RoomNavigator<'a>, config: &'a Config) -> Self {
        App {
            navigator,
            config,
            tracker: NavigationTracker::new(),
            input: passcode_input(),
            room: None,
            clue: None,
            message: String::from("Enter a passcode to access a room."),
            message_style: Style::default().fg(Color::Green),
            state: GameState::TitleScreen,
            menu_selection: MenuOption::NewGame,
            command_mode: false,
            command_buffer: String::new(),
            show_history: false,
            should_quit: false,
        }
    }

    pub fn start_session(&mut self) {
        self.tracker.reset();
        self.return_to_terminal();
        self.message = String::from("Enter a passcode to access a room.");
        self.message_style = Style::default().fg(Color::Green);
        info!("session started");
    }

    pub fn passcode(&self) -> String {
        self.input.lines().concat()
    }

    pub fn return_to_terminal(&mut self) {
        self.state = GameState::Terminal;
        self.room = None;
        self.clue = None;
        self.input = passcode_input();
        self.tracker.set_current_room(None);
    }

    /// Try the typed passcode. On rejection stay at the terminal with the reason.
    pub fn submit_passcode(&mut self) {
        let passcode = self.passcode();
        self.open_room(&passcode);
    }

    /// Room-entry route: anything that fails lands back on the entry terminal.
    pub fn open_room(&mut self, passcode: &str) {
        match self.navigator.enter(passcode, &mut self.tracker) {
            Ok(view) => {
                self.clue = Some(self.locate_clue(&view.room.clue_image));
                self.message = if view.is_final {
                    String::from("FINAL DESTINATION REACHED")
                } else {
                    String::from("ROOM ACCESS GRANTED")
                };
                self.message_style = Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD);
                self.room = Some(view);
                self.state = GameState::InRoom;
            }
            Err(err) => {
                self.return_to_terminal();
                self.message = err.to_string();
                self.message_style = Style::default().fg(Color::Red);
            }
        }
    }

    pub fn follow_clue(&mut self) {
        let next = self
            .room
            .filter(|view| view.shows_next_passcode())
            .and_then(|view| view.next_room);

        match next {
            Some(code) => self.open_room(code),
            None => {
                self.message =
                    String::from("This is a final room. Press Esc to return to the terminal.");
                self.message_style = Style::default().fg(Color::Yellow);
            }
        }
    }

    fn locate_clue(&self, clue_image: &str) -> ClueImage {
        let path = self.config.clue_path(clue_image);
        if path.is_file() {
            ClueImage::Available(path)
        } else {
            warn!(path = %path.display(), "clue image unavailable");
            ClueImage::Unavailable(path)
        }
    }

    fn run_command(&mut self) {
        match self.command_buffer.as_str() {
            "q" | "quit" => self.should_quit = true,
            "help" => {
                self.message =
                    "Commands: :q (quit), :history (toggle visits), :home (entry terminal)"
                        .to_string();
                self.message_style = Style::default().fg(Color::Cyan);
            }
            "history" => self.show_history = !self.show_history,
            "home" => {
                self.return_to_terminal();
                self.message = String::from("Enter a passcode to access a room.");
                self.message_style = Style::default().fg(Color::Green);
            }
            "" => {}
            other => {
                self.message = format!("Unknown command: {}", other);
                self.message_style = Style::default().fg(Color::Red);
            }
        }
        self.command_mode = false;
        self.command_buffer.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state == GameState::TitleScreen {
            match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                    self.menu_selection = self.menu_selection.next();
                }
                KeyCode::Enter => match self.menu_selection {
                    MenuOption::NewGame => self.start_session(),
                    MenuOption::Quit => self.should_quit = true,
                },
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        // Command mode handling (vim-style :q)
        if self.command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.command_mode = false;
                    self.command_buffer.clear();
                }
                KeyCode::Enter => self.run_command(),
                KeyCode::Backspace => {
                    self.command_buffer.pop();
                    if self.command_buffer.is_empty() {
                        self.command_mode = false;
                    }
                }
                KeyCode::Char(c) => self.command_buffer.push(c),
                _ => {}
            }
            return;
        }

        if let (KeyCode::Char(':'), KeyModifiers::NONE) = (key.code, key.modifiers) {
            self.command_mode = true;
            self.command_buffer.clear();
            return;
        }

        match self.state {
            GameState::Terminal => self.handle_terminal_key(key),
            GameState::InRoom => self.handle_room_key(key),
            GameState::TitleScreen => {}
        }
    }

    fn handle_terminal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_passcode(),
            KeyCode::Backspace => {
                self.input.delete_char();
            }
            KeyCode::Esc => {
                self.message = "Type :q to quit".to_string();
                self.message_style = Style::default().fg(Color::DarkGray);
            }
            // Passcodes are [A-Z0-9]; letters are upper-cased as typed
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                if self.passcode().len() < MAX_LENGTH {
                    self.input.insert_char(c.to_ascii_uppercase());
                }
            }
            _ => {}
        }
    }

    fn handle_room_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('f') => self.follow_clue(),
            KeyCode::Char('h') => self.show_history = !self.show_history,
            KeyCode::Esc => {
                self.return_to_terminal();
                self.message = String::from("Enter a passcode to access a room.");
                self.message_style = Style::default().fg(Color::Green);
            }
            _ => {}
        }
    }
}
