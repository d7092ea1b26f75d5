//! Line-oriented prompts over any reader and writer.

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, instrument};

/// Parses `"row col"` as entered by a player: two whitespace-separated
/// one-based integers. Returns zero-based coordinates.
///
/// Numbers above 3 pass through so the board can reject them as off-board.
pub fn parse_coords(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

/// A turn's input in a two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInput {
    /// Zero-based `(row, col)`.
    Cell(usize, usize),
    /// Take back the last move.
    Undo,
}

/// Parses a cell as [`parse_coords`] does, or `u`/`undo`.
pub fn parse_move_input(line: &str) -> Option<MoveInput> {
    match line.trim().to_ascii_lowercase().as_str() {
        "u" | "undo" => Some(MoveInput::Undo),
        other => parse_coords(other).map(|(row, col)| MoveInput::Cell(row, col)),
    }
}

/// Parses a yes/no answer. Accepts `y`, `yes`, `1`, `n`, `no`, `0`.
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "1" => Some(true),
        "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Prompts and messages for the text front end.
///
/// End of input surfaces as an [`ErrorKind::UnexpectedEof`] error from every
/// prompt.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wraps `input` and `output`; screen clearing is on.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: true,
        }
    }

    /// Turns screen clearing off, for piped output.
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    /// Consumes the console and returns its writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Clears the screen and homes the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Asks for a menu number in `1..=max` until one is given.
    #[instrument(skip(self))]
    pub fn prompt_choice(&mut self, prompt: &str, max: u32) -> io::Result<u32> {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<u32>() {
                Ok(choice) if (1..=max).contains(&choice) => return Ok(choice),
                _ => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    /// Like [`Console::prompt_choice`], but an empty answer picks `default`.
    #[instrument(skip(self))]
    pub fn prompt_choice_or(&mut self, prompt: &str, max: u32, default: u32) -> io::Result<u32> {
        loop {
            let line = self.read_line(prompt)?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<u32>() {
                Ok(choice) if (1..=max).contains(&choice) => return Ok(choice),
                _ => self.say("Invalid choice. Please try again.")?,
            }
        }
    }

    /// Asks until a non-blank name is given.
    pub fn prompt_name(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.say("Name must not be empty.")?;
        }
    }

    /// Asks for a `row col` pair until one parses; returns zero-based
    /// coordinates.
    pub fn prompt_coords(&mut self, prompt: &str) -> io::Result<(usize, usize)> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_coords(&line) {
                Some(coords) => return Ok(coords),
                None => self.say("Invalid input. Please enter numeric values for row and column.")?,
            }
        }
    }

    /// Asks for a cell or an undo request until one parses.
    pub fn prompt_move(&mut self, prompt: &str) -> io::Result<MoveInput> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_move_input(&line) {
                Some(input) => return Ok(input),
                None => self.say("Invalid input. Enter row and column, or 'u' to undo.")?,
            }
        }
    }

    /// Asks a yes/no question until it is answered.
    pub fn prompt_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_yes_no(&line) {
                Some(answer) => return Ok(answer),
                None => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Waits for Enter. End of input counts as Enter.
    pub fn pause(&mut self) -> io::Result<()> {
        match self.read_line("\nPress Enter to continue...") {
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(()),
            other => other.map(|_| ()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()).without_clearing()
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).expect("UTF-8 output")
    }

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("1 1"), Some((0, 0)));
        assert_eq!(parse_coords("  3   2 "), Some((2, 1)));
        assert_eq!(parse_coords("4 1"), Some((3, 0)));
        assert_eq!(parse_coords("0 1"), None);
        assert_eq!(parse_coords("a b"), None);
        assert_eq!(parse_coords("1"), None);
        assert_eq!(parse_coords("1 2 3"), None);
    }

    #[test]
    fn test_parse_move_input() {
        assert_eq!(parse_move_input("U"), Some(MoveInput::Undo));
        assert_eq!(parse_move_input("2 2"), Some(MoveInput::Cell(1, 1)));
        assert_eq!(parse_move_input("up"), None);
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("1"), Some(true));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_choice_reprompts() {
        let mut console = console("7\nx\n2\n");
        assert_eq!(console.prompt_choice("> ", 3).expect("Answered"), 2);
        let text = output(console);
        assert_eq!(text.matches("Invalid choice").count(), 2);
    }

    #[test]
    fn test_choice_default_on_empty() {
        let mut console = console("\n");
        assert_eq!(console.prompt_choice_or("> ", 3, 3).expect("Answered"), 3);
    }

    #[test]
    fn test_coords_reprompts_on_text() {
        let mut console = console("one two\n2 3\n");
        assert_eq!(console.prompt_coords("> ").expect("Answered"), (1, 2));
        assert!(output(console).contains("Invalid input"));
    }

    #[test]
    fn test_eof_is_error_except_pause() {
        let mut console = console("");
        let err = console.prompt_name("> ").expect_err("No input");
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        console.pause().expect("Pause tolerates end of input");
    }
}
