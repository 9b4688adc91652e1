use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::ai::ComputerPlayer;
use crate::config::AppConfig;
use crate::game::{GameState, Player};
use crate::storage::SaveManager;

/// Which screen the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game { vs_computer: bool, over: bool },
    Prompt(Prompt),
}

/// Modal text/choice prompts reached from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    ResizeRows,
    ResizeCols { rows: usize },
    WinLength,
    SaveName,
    LoadName,
    /// A board was just loaded; pick who plays against whom.
    LoadMode,
}

pub const MENU_ITEMS: [&str; 7] = [
    "New two-player game",
    "Play against the computer",
    "Resize board",
    "Change win length",
    "Save board",
    "Load board",
    "Quit",
];

pub struct App {
    state: GameState,
    computer: ComputerPlayer,
    saves: SaveManager,
    screen: Screen,
    menu_index: usize,
    selected_column: usize,
    input: String,
    slots: Vec<String>,
    message: Option<String>,
    /// A won game is wiped before the menu is reachable again, so a
    /// finished board can never be saved.
    wipe_on_exit: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            state: GameState::new(
                config.board.rows,
                config.board.cols,
                config.board.win_length,
            ),
            computer: ComputerPlayer::new(),
            saves: SaveManager::new(&config.storage),
            screen: Screen::Menu,
            menu_index: 0,
            selected_column: config.board.cols / 2,
            input: String::new(),
            slots: Vec::new(),
            message: None,
            wipe_on_exit: false,
            should_quit: false,
        }
    }

    /// Main application loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        match &self.screen {
            Screen::Menu => super::menu_view::render_menu(
                frame,
                &self.state,
                self.menu_index,
                &self.message,
            ),
            Screen::Prompt(prompt) => super::menu_view::render_prompt(
                frame,
                &self.state,
                prompt,
                &self.input,
                &self.slots,
                &self.message,
            ),
            Screen::Game { vs_computer, .. } => {
                let mode = if *vs_computer {
                    "vs computer"
                } else {
                    "two players"
                };
                super::game_view::render(
                    frame,
                    &self.state,
                    self.selected_column,
                    &self.message,
                    mode,
                );
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.message = None;

        match self.screen.clone() {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Game { vs_computer, over } => self.handle_game_key(key, vs_computer, over),
            Screen::Prompt(prompt) => self.handle_prompt_key(key, prompt),
        }
    }

    // ----- menu -----

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.menu_index = self.menu_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.menu_index + 1 < MENU_ITEMS.len() {
                    self.menu_index += 1;
                }
            }
            KeyCode::Enter => self.select_menu_item(),
            _ => {}
        }
    }

    fn select_menu_item(&mut self) {
        match self.menu_index {
            0 => {
                self.state.reset();
                self.enter_game(false);
            }
            1 => {
                self.state.reset();
                self.enter_game(true);
            }
            2 => self.open_prompt(Prompt::ResizeRows),
            3 => self.open_prompt(Prompt::WinLength),
            4 => self.open_prompt(Prompt::SaveName),
            5 => {
                self.slots = self.saves.list().unwrap_or_default();
                self.open_prompt(Prompt::LoadName);
            }
            _ => self.should_quit = true,
        }
    }

    fn open_prompt(&mut self, prompt: Prompt) {
        self.input.clear();
        self.screen = Screen::Prompt(prompt);
    }

    fn enter_game(&mut self, vs_computer: bool) {
        self.selected_column = self.state.cols() / 2;
        self.wipe_on_exit = false;
        self.screen = Screen::Game {
            vs_computer,
            over: false,
        };
        // A loaded position may put the computer on the move.
        if vs_computer && self.state.current_player() == Player::Two {
            self.computer_turn();
        }
    }

    // ----- game -----

    fn handle_game_key(&mut self, key: KeyEvent, vs_computer: bool, over: bool) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.wipe_on_exit {
                    self.state.reset();
                    self.wipe_on_exit = false;
                }
                self.screen = Screen::Menu;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.state.cols() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if over {
                    self.message = Some("Game over! Press 'r' for a new game.".to_string());
                } else {
                    self.drop_disc(vs_computer);
                }
            }
            KeyCode::Char('r') => {
                self.state.reset();
                self.wipe_on_exit = false;
                self.selected_column = self.state.cols() / 2;
                self.screen = Screen::Game {
                    vs_computer,
                    over: false,
                };
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn drop_disc(&mut self, vs_computer: bool) {
        let col = self.selected_column;
        match self.state.make_move(col) {
            Ok(_) => {
                if self.conclude_after(col) {
                    return;
                }
                if vs_computer {
                    self.computer_turn();
                }
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    fn computer_turn(&mut self) {
        let col = self.computer.play_for_win(&self.state);
        if self.state.make_move(col).is_ok() {
            if !self.conclude_after(col) {
                self.message = Some(format!("The computer places a disc in column {}", col + 1));
            }
        }
    }

    /// Endgame check after an applied move. A win wipes the board before
    /// the menu is reachable again; a draw leaves it intact.
    fn conclude_after(&mut self, col: usize) -> bool {
        if self.state.is_game_won(col) {
            let winner = self.state.current_player().other();
            self.message = Some(format!("{} has won the game!", winner.name()));
            self.wipe_on_exit = true;
            self.finish_game();
            true
        } else if self.state.is_board_full() {
            self.message = Some("Board is full, the game is a draw!".to_string());
            self.finish_game();
            true
        } else {
            false
        }
    }

    fn finish_game(&mut self) {
        if let Screen::Game { vs_computer, .. } = self.screen {
            self.screen = Screen::Game {
                vs_computer,
                over: true,
            };
        }
    }

    // ----- prompts -----

    fn handle_prompt_key(&mut self, key: KeyEvent, prompt: Prompt) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => match prompt {
                Prompt::LoadMode => self.pick_load_mode(c),
                Prompt::SaveName | Prompt::LoadName => {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        self.input.push(c);
                    }
                }
                _ => {
                    if c.is_ascii_digit() {
                        self.input.push(c);
                    }
                }
            },
            KeyCode::Enter => self.submit_prompt(prompt),
            _ => {}
        }
    }

    fn pick_load_mode(&mut self, c: char) {
        match c {
            'c' => self.enter_game(true),
            'n' => self.enter_game(false),
            _ => {
                self.message =
                    Some("Enter 'c' for the computer or 'n' for another human".to_string());
            }
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        match prompt {
            Prompt::ResizeRows => {
                let win_length = self.state.win_length();
                match self.input.parse::<usize>() {
                    Ok(rows) if rows >= win_length => {
                        self.open_prompt(Prompt::ResizeCols { rows });
                    }
                    _ => {
                        self.message = Some(format!(
                            "Not enough rows to win, enter a dimension of at least {win_length}"
                        ));
                        self.input.clear();
                    }
                }
            }
            Prompt::ResizeCols { rows } => {
                let win_length = self.state.win_length();
                match self.input.parse::<usize>() {
                    Ok(cols) if cols >= win_length => {
                        self.state.resize(rows, cols);
                        self.selected_column = cols / 2;
                        self.message = Some(format!("Board resized to {rows} rows x {cols} columns"));
                        self.screen = Screen::Menu;
                    }
                    _ => {
                        self.message = Some(format!(
                            "Not enough columns to win, enter a dimension of at least {win_length}"
                        ));
                        self.input.clear();
                    }
                }
            }
            Prompt::WinLength => {
                let max = self.state.rows().min(self.state.cols());
                match self.input.parse::<usize>() {
                    Ok(n) if n >= 2 && n <= max => {
                        self.state.set_win_length(n);
                        self.message = Some(format!("Now playing Connect-{n}"));
                        self.screen = Screen::Menu;
                    }
                    Ok(n) if n > max => {
                        self.message = Some(format!(
                            "Win length cannot exceed the smallest board dimension ({max})"
                        ));
                        self.input.clear();
                    }
                    _ => {
                        self.message =
                            Some("At least 2 discs in a row are needed for a game".to_string());
                        self.input.clear();
                    }
                }
            }
            Prompt::SaveName => match self.saves.save(&self.input, &self.state) {
                Ok(path) => {
                    self.message = Some(format!("Board saved to {}", path.display()));
                    self.screen = Screen::Menu;
                }
                Err(err) => {
                    self.message = Some(err.to_string());
                    self.input.clear();
                }
            },
            Prompt::LoadName => match self.saves.load(&self.input, &mut self.state) {
                Ok(()) => {
                    self.message = Some("Board loaded — continue against whom?".to_string());
                    self.screen = Screen::Prompt(Prompt::LoadMode);
                }
                Err(err) => {
                    self.message = Some(err.to_string());
                    self.screen = Screen::Menu;
                }
            },
            Prompt::LoadMode => {
                // Mode is chosen with 'c'/'n'; Enter alone does nothing.
            }
        }
    }
}
