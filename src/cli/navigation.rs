use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Esc,
    Char(char),
    Unknown,
}

pub fn read_nav_key() -> io::Result<NavKey> {
    Ok(match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Left => NavKey::Left,
            KeyCode::Right => NavKey::Right,
            KeyCode::Esc => NavKey::Esc,
            KeyCode::Char(c) => NavKey::Char(c),
            _ => NavKey::Unknown,
        },
        _ => NavKey::Unknown,
    })
}

/// What a key press means for the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// Horizontal gesture; positive advances.
    Swipe(i8),
    Select(usize),
    Quit,
    Ignore,
}

pub fn browse_action(key: NavKey) -> BrowseAction {
    match key {
        // Arrow keys stand in for a finger travelling the opposite way.
        NavKey::Right | NavKey::Char('l') => BrowseAction::Swipe(1),
        NavKey::Left | NavKey::Char('h') => BrowseAction::Swipe(-1),
        NavKey::Char(c @ '1'..='3') => BrowseAction::Select(c as usize - '1' as usize),
        NavKey::Esc | NavKey::Char('q') => BrowseAction::Quit,
        _ => BrowseAction::Ignore,
    }
}

/// Raw-mode guard; restores the terminal when dropped.
pub struct RawMode;

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Redraws the screen with `text`. Raw mode needs explicit carriage returns.
pub fn redraw(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(stdout, "{}\r\n", text.replace('\n', "\r\n"))?;
    stdout.flush()
}
