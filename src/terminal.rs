use std::io::{self, stdout, Stdout, Write};

use crossterm::{
    cursor,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Raw mode and the alternate screen, held for as long as this value lives.
///
/// Dropping the session (normal exit, early `?` return or a panic unwinding
/// through the main loop) hands the terminal back in its original state.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(err) = out
            .execute(EnterAlternateScreen)
            .and_then(|out| out.execute(cursor::Hide))
        {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        restore_terminal(self.terminal.backend_mut(), disable_raw_mode)
    }
}

/// Shows the cursor, leaves the alternate screen and releases raw mode.
///
/// Every step runs even if an earlier one failed; the first error is returned.
fn restore_terminal<W, F>(out: &mut W, release_raw: F) -> io::Result<()>
where
    W: Write + ?Sized,
    F: FnOnce() -> io::Result<()>,
{
    let shown = out.execute(cursor::Show).map(|_| ());
    let left = out.execute(LeaveAlternateScreen).map(|_| ());
    let released = release_raw();
    shown.and(left).and(released)
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("failed to restore terminal: {err}");
        }
    }
}
