use crate::matcher::GuessEvent;

/// A key press as the session sees it, independent of the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Tab,
    Esc,
    /// Ctrl-C. Raw mode swallows the signal, so it arrives as a key.
    Interrupt,
}

/// How keys turn into guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Every letter narrows the candidate titles immediately.
    #[default]
    CharStream,
    /// A line is typed and submitted with Enter: a title number or a
    /// one-letter action.
    LineBuffered,
}

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Feed the prefix matcher.
    Match(GuessEvent),
    /// Accept the title whose letters equal the buffer exactly.
    Submit,
    /// Guess the title at this index of the library's title list.
    Pick(usize),
    Replay,
    Skip,
    Reveal,
    Quit,
    /// A submitted line that means nothing.
    Invalid,
}

/// Map a key in character-stream mode. Keys with no meaning return `None`.
pub fn char_command(key: Key) -> Option<Command> {
    let command = match key {
        Key::Char(' ') => Command::Replay,
        Key::Char('?') => Command::Reveal,
        Key::Char(ch) if ch.is_alphabetic() => Command::Match(GuessEvent::Letter(ch)),
        Key::Char(ch) if ch.is_control() => return None,
        Key::Char(_) => Command::Match(GuessEvent::Reject),
        Key::Backspace => Command::Match(GuessEvent::Backspace),
        Key::Enter => Command::Submit,
        Key::Tab => Command::Skip,
        Key::Esc | Key::Interrupt => Command::Quit,
    };
    Some(command)
}

/// Interpret a submitted line in line-buffered mode. `title_count` bounds the
/// accepted title numbers, which start at 1 on screen.
pub fn line_command(line: &str, title_count: usize) -> Command {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "q" => Command::Quit,
        "r" => Command::Replay,
        "s" => Command::Skip,
        "a" => Command::Reveal,
        number => match number.parse::<usize>() {
            Ok(n) if (1..=title_count).contains(&n) => Command::Pick(n - 1),
            _ => Command::Invalid,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_mode_keys() {
        assert_eq!(
            char_command(Key::Char('B')),
            Some(Command::Match(GuessEvent::Letter('B')))
        );
        assert_eq!(
            char_command(Key::Char('4')),
            Some(Command::Match(GuessEvent::Reject))
        );
        assert_eq!(char_command(Key::Char(' ')), Some(Command::Replay));
        assert_eq!(char_command(Key::Tab), Some(Command::Skip));
        assert_eq!(char_command(Key::Interrupt), Some(Command::Quit));
        assert_eq!(char_command(Key::Char('\u{7}')), None);
    }

    #[test]
    fn line_mode_actions_and_numbers() {
        assert_eq!(line_command("Q", 3), Command::Quit);
        assert_eq!(line_command(" r ", 3), Command::Replay);
        assert_eq!(line_command("s", 3), Command::Skip);
        assert_eq!(line_command("a", 3), Command::Reveal);
        assert_eq!(line_command("1", 3), Command::Pick(0));
        assert_eq!(line_command("3", 3), Command::Pick(2));
        assert_eq!(line_command("0", 3), Command::Invalid);
        assert_eq!(line_command("4", 3), Command::Invalid);
        assert_eq!(line_command("beaver", 3), Command::Invalid);
        assert_eq!(line_command("", 3), Command::Invalid);
    }
}
