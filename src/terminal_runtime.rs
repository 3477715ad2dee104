use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::DisplayConfig;
use crate::game::Game;
use crate::renderer;

type GameTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw-mode alternate screen that the game draws into.
///
/// The terminal is handed back to the shell when the session drops, and also
/// from the panic hook so a crash message stays readable.
pub struct TerminalSession {
    terminal: GameTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        install_restore_on_panic();
        enable_raw_mode()?;

        let terminal = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        match terminal {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws one frame of `game`.
    pub fn draw(&mut self, game: &Game, display: &DisplayConfig) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, game, display))
            .map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn install_restore_on_panic() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        log::error!("panic: {panic_info}");
        previous(panic_info);
    }));
}

fn restore_terminal() {
    if let Err(error) = disable_raw_mode() {
        warn!("could not leave raw mode: {error}");
    }
    if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        warn!("could not leave alternate screen: {error}");
    }
}
