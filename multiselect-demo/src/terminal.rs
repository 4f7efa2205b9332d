use std::io::{self, Write};

use crossterm::{cursor, event, execute, queue, style, terminal};
use multiselect::{Controller, FixedSizeList};

use crate::view::{self, Frame};

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard {
    stdout: io::Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn draw(
        &mut self,
        control: &Controller<usize>,
        list: &mut FixedSizeList,
        hovered: Option<usize>,
        selected: usize,
    ) -> io::Result<Frame> {
        let size = terminal::size()?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        let frame = view::draw(&mut self.stdout, size, control, list, hovered, selected)?;
        queue!(self.stdout, style::SetAttribute(style::Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(frame)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
