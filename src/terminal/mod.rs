use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use crate::field::TextField;

const PROMPT: &str = "> ";

/// What the event loop should do after an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Leave, keeping the text
    Submit,
    /// Leave, discarding the text
    Quit,
}

/// Terminal handler responsible for rendering and input
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();

        // Enter raw mode and alternate screen
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, EnableBracketedPaste)?;

        Ok(Self { stdout })
    }

    /// Get terminal size
    pub fn size() -> anyhow::Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Render the field and its counter
    pub fn render(&mut self, field: &TextField, max: usize) -> anyhow::Result<()> {
        let counter = field.counter(max);
        let counter_color = if counter.is_full() {
            Color::Yellow
        } else {
            Color::DarkGrey
        };

        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All),
            Print(PROMPT),
            Print(field.text()),
            cursor::MoveTo(0, 1),
            SetForegroundColor(counter_color),
            Print(counter.to_string()),
            ResetColor,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::DarkGrey),
            Print("Enter: done  Esc: quit  Ctrl-A: select all  Ctrl-U: clear"),
            ResetColor,
        )?;

        let (width, _) = Self::size()?;
        let col = caret_column(field).min(width.saturating_sub(1) as usize);
        queue!(self.stdout, cursor::MoveTo(col as u16, 0), cursor::Show)?;

        self.stdout.flush()?;
        Ok(())
    }

    /// Read the next event we care about (blocking)
    pub fn read_event(&self) -> anyhow::Result<Event> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Release => continue,
                ev @ (Event::Key(_) | Event::Paste(_) | Event::Resize(_, _)) => return Ok(ev),
                _ => continue,
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(
            self.stdout,
            DisableBracketedPaste,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Display column of the caret on the input line
fn caret_column(field: &TextField) -> usize {
    PROMPT.width() + field.before_cursor().width()
}

/// Handle an input event and update the field
pub fn handle_event(field: &mut TextField, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(field, key),
        Event::Paste(text) => {
            // Single-line field
            let text = text.replace(['\r', '\n'], " ");
            field.insert_str(&text);
            Action::Continue
        }
        _ => Action::Continue,
    }
}

/// Handle a key event and update the field
pub fn handle_key(field: &mut TextField, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('a') if ctrl => field.select_all(),
        KeyCode::Char('u') if ctrl => field.clear(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(ch) => {
            let mut buf = [0u8; 4];
            field.insert_str(ch.encode_utf8(&mut buf));
        }
        KeyCode::Backspace => {
            field.backspace();
        }
        KeyCode::Delete => {
            field.delete_forward();
        }
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        KeyCode::Enter => return Action::Submit,
        KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CharCountFilter;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn field() -> TextField {
        TextField::new().with_filter(CharCountFilter::new(3))
    }

    #[test]
    fn test_typing_respects_budget() {
        let mut field = field();
        for ch in "你好abcd".chars() {
            assert_eq!(handle_key(&mut field, key(KeyCode::Char(ch))), Action::Continue);
        }
        assert_eq!(field.text(), "你好ab");
    }

    #[test]
    fn test_editing_keys() {
        let mut field = field();
        for ch in "abc".chars() {
            handle_key(&mut field, key(KeyCode::Char(ch)));
        }
        handle_key(&mut field, key(KeyCode::Home));
        handle_key(&mut field, key(KeyCode::Delete));
        assert_eq!(field.text(), "bc");
        handle_key(&mut field, key(KeyCode::End));
        handle_key(&mut field, key(KeyCode::Backspace));
        assert_eq!(field.text(), "b");

        handle_key(&mut field, ctrl('a'));
        handle_key(&mut field, key(KeyCode::Char('z')));
        assert_eq!(field.text(), "z");

        handle_key(&mut field, ctrl('u'));
        assert!(field.is_empty());
    }

    #[test]
    fn test_ctrl_chars_are_not_inserted() {
        let mut field = field();
        handle_key(&mut field, ctrl('x'));
        assert!(field.is_empty());
    }

    #[test]
    fn test_exit_keys() {
        let mut field = field();
        assert_eq!(handle_key(&mut field, key(KeyCode::Enter)), Action::Submit);
        assert_eq!(handle_key(&mut field, key(KeyCode::Esc)), Action::Quit);
        assert_eq!(handle_key(&mut field, ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_paste_is_filtered_and_flattened() {
        let mut field = field();
        let action = handle_event(&mut field, Event::Paste("ab\ncd你好".to_string()));
        assert_eq!(action, Action::Continue);
        // 5 ASCII units = 2.5, 你 would make 3.5
        assert_eq!(field.text(), "ab cd");
    }

    #[test]
    fn test_caret_column_uses_display_width() {
        let mut field = field();
        field.insert_str("a你");
        assert_eq!(caret_column(&field), PROMPT.len() + 3);
        field.move_left();
        assert_eq!(caret_column(&field), PROMPT.len() + 1);
    }
}
