use anyhow::{Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use crate::planner::Choice;

/// Line-oriented prompts over any reader/writer pair, so the interactive
/// flows run against in-memory buffers in tests.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    /// Read secrets key by key with echo off instead of from `input`.
    hide_secrets: bool,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub(crate) fn stdio() -> Self {
        let hide_secrets = io::stdin().is_terminal();
        Self {
            hide_secrets,
            ..Self::new(io::stdin().lock(), io::stdout())
        }
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `message` and reads one trimmed line; `None` at end of input.
    pub(crate) fn try_line(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Like [`Prompter::try_line`] but end of input is an error, so retry
    /// loops never spin on a closed stdin.
    pub(crate) fn line(&mut self, message: &str) -> Result<String> {
        match self.try_line(message)? {
            Some(input) => Ok(input),
            None => bail!("Input closed"),
        }
    }

    pub(crate) fn string_with_default(&mut self, prompt: &str, default: &str) -> Result<String> {
        let message = if default.is_empty() {
            format!("{prompt}: ")
        } else {
            format!("{prompt} (default: {default}): ")
        };
        let input = self.line(&message)?;

        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// API key prompt. Without an existing value it keeps asking until one is
    /// given; otherwise enter keeps the existing value, shown masked.
    pub(crate) fn secret(&mut self, prompt: &str, existing: &str) -> Result<String> {
        let hint = if self.hide_secrets { " (input hidden)" } else { "" };

        if existing.trim().is_empty() {
            loop {
                let input = self.secret_line(&format!("{prompt}{hint}: "))?;
                if !input.is_empty() {
                    return Ok(input);
                }
                writeln!(self.output, "❌ A value is required.")?;
            }
        }

        let masked = mask_api_key(existing);
        let input = self.secret_line(&format!("{prompt}{hint} (current: {masked}): "))?;
        if input.is_empty() {
            Ok(existing.to_string())
        } else {
            Ok(input)
        }
    }

    fn secret_line(&mut self, message: &str) -> Result<String> {
        if !self.hide_secrets {
            return self.line(message);
        }

        write!(self.output, "{message}")?;
        self.output.flush()?;
        let input = read_hidden_line()?;
        writeln!(self.output)?;
        match input {
            Some(input) => Ok(input),
            None => bail!("Input closed"),
        }
    }

    pub(crate) fn u32_in_range(
        &mut self,
        prompt: &str,
        default: u32,
        min: u32,
        max: u32,
    ) -> Result<u32> {
        loop {
            let input = self.line(&format!("{prompt} ({min}-{max}, default: {default}): "))?;

            if input.is_empty() {
                return Ok(default);
            }

            match input.parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => writeln!(self.output, "❌ Value must be between {min} and {max}.")?,
                Err(_) => writeln!(self.output, "❌ Please enter a valid number.")?,
            }
        }
    }

    pub(crate) fn u64_positive(&mut self, prompt: &str, default: u64) -> Result<u64> {
        loop {
            let input = self.line(&format!("{prompt} (default: {default}): "))?;

            if input.is_empty() {
                return Ok(default);
            }

            match input.parse::<u64>() {
                Ok(value) if value > 0 => return Ok(value),
                Ok(_) => writeln!(self.output, "❌ Value must be greater than zero.")?,
                Err(_) => writeln!(self.output, "❌ Please enter a valid number.")?,
            }
        }
    }

    pub(crate) fn yes_no(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let input = self.line(&format!("{prompt} [{hint}]: "))?;
            match input.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "❌ Please answer y or n.")?,
            }
        }
    }

    /// Single selection from a numbered list.
    pub(crate) fn choice<T: Choice>(&mut self, prompt: &str, default: T) -> Result<T> {
        self.print_options::<T>(prompt)?;
        loop {
            let input = self.line(&format!(
                "Select 1-{} (default: {}): ",
                T::ALL.len(),
                default.label()
            ))?;
            if input.is_empty() {
                return Ok(default);
            }
            match parse_selection(&input, T::ALL.len()) {
                Some(indexes) if indexes.len() == 1 => return Ok(T::ALL[indexes[0]]),
                _ => writeln!(self.output, "❌ Please enter one number from the list.")?,
            }
        }
    }

    /// Multiple selection from a numbered list; `-` clears the selection.
    pub(crate) fn multi_choice<T: Choice>(
        &mut self,
        prompt: &str,
        current: &[T],
    ) -> Result<Vec<T>> {
        self.print_options::<T>(prompt)?;
        let current_labels = if current.is_empty() {
            "none".to_string()
        } else {
            current.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
        };
        loop {
            let input = self.line(&format!(
                "Comma-separated numbers, '-' for none (default: {current_labels}): "
            ))?;
            if input.is_empty() {
                return Ok(current.to_vec());
            }
            if input == "-" {
                return Ok(Vec::new());
            }
            match parse_selection(&input, T::ALL.len()) {
                Some(indexes) => return Ok(indexes.into_iter().map(|idx| T::ALL[idx]).collect()),
                None => writeln!(
                    self.output,
                    "❌ Please enter numbers between 1 and {}.",
                    T::ALL.len()
                )?,
            }
        }
    }

    fn print_options<T: Choice>(&mut self, prompt: &str) -> Result<()> {
        writeln!(self.output, "\n{prompt}")?;
        for (idx, option) in T::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, option.label())?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HiddenKey {
    Continue,
    Submit,
    Abort,
}

fn apply_hidden_key(buffer: &mut String, key: KeyEvent) -> HiddenKey {
    if key.kind == KeyEventKind::Release {
        return HiddenKey::Continue;
    }

    match key.code {
        KeyCode::Enter => HiddenKey::Submit,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            HiddenKey::Abort
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            HiddenKey::Continue
        }
        KeyCode::Backspace => {
            buffer.pop();
            HiddenKey::Continue
        }
        _ => HiddenKey::Continue,
    }
}

/// Reads one line from the terminal in raw mode so nothing is echoed.
/// `None` on Ctrl-C or Ctrl-D.
fn read_hidden_line() -> Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let result = read_hidden_keys();
    terminal::disable_raw_mode()?;
    result
}

fn read_hidden_keys() -> Result<Option<String>> {
    let mut buffer = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_hidden_key(&mut buffer, key) {
                HiddenKey::Continue => {}
                HiddenKey::Submit => return Ok(Some(buffer.trim().to_string())),
                HiddenKey::Abort => return Ok(None),
            }
        }
    }
}

/// Parses "1, 3 2" style input into zero-based indexes, keeping the order
/// given and dropping repeats. `None` when anything is out of range.
pub(crate) fn parse_selection(input: &str, max: usize) -> Option<Vec<usize>> {
    let mut indexes = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let value = token.parse::<usize>().ok()?;
        if value == 0 || value > max {
            return None;
        }
        if !indexes.contains(&(value - 1)) {
            indexes.push(value - 1);
        }
    }

    if indexes.is_empty() { None } else { Some(indexes) }
}

pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible: String = key.chars().take(8).collect();
    format!("{visible}***")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{BudgetTier, TravelStyle};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parse_selection_accepts_commas_and_spaces() {
        assert_eq!(parse_selection("1, 3 2", 5), Some(vec![0, 2, 1]));
        assert_eq!(parse_selection("2,2", 5), Some(vec![1]));
    }

    #[test]
    fn parse_selection_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_selection("0", 5), None);
        assert_eq!(parse_selection("6", 5), None);
        assert_eq!(parse_selection("two", 5), None);
        assert_eq!(parse_selection("  ", 5), None);
    }

    #[test]
    fn mask_api_key_hides_tail() {
        assert_eq!(mask_api_key(""), "(not set)");
        assert_eq!(mask_api_key("gsk_1234567890"), "gsk_1234***");
        assert_eq!(mask_api_key("abc"), "abc***");
    }

    #[test]
    fn string_with_default_uses_default_on_empty_line() {
        let mut p = prompter("\nTokyo\n");
        assert_eq!(p.string_with_default("Destination", "Paris").unwrap(), "Paris");
        assert_eq!(p.string_with_default("Destination", "Paris").unwrap(), "Tokyo");
    }

    #[test]
    fn u32_in_range_retries_until_valid() {
        let mut p = prompter("0\nabc\n31\n7\n");
        assert_eq!(p.u32_in_range("Days", 5, 1, 30).unwrap(), 7);
        let output = String::from_utf8(p.output().clone()).unwrap();
        assert!(output.contains("between 1 and 30"));
        assert!(output.contains("valid number"));
    }

    #[test]
    fn line_fails_when_input_closed() {
        let mut p = prompter("");
        let err = p.line("Question: ").unwrap_err();
        assert!(err.to_string().contains("Input closed"));
    }

    #[test]
    fn yes_no_defaults_and_parses() {
        let mut p = prompter("\nmaybe\nYES\nn\n");
        assert!(!p.yes_no("Confirm", false).unwrap());
        assert!(p.yes_no("Confirm", false).unwrap());
        assert!(!p.yes_no("Confirm", true).unwrap());
    }

    #[test]
    fn choice_picks_by_number() {
        let mut p = prompter("3\n");
        assert_eq!(p.choice("Budget", BudgetTier::Moderate).unwrap(), BudgetTier::Luxury);

        let mut p = prompter("\n");
        assert_eq!(p.choice("Budget", BudgetTier::Moderate).unwrap(), BudgetTier::Moderate);
    }

    #[test]
    fn multi_choice_keeps_current_clears_and_selects() {
        let current = [TravelStyle::Culture, TravelStyle::Nature];

        let mut p = prompter("\n");
        assert_eq!(p.multi_choice("Style", &current).unwrap(), current.to_vec());

        let mut p = prompter("-\n");
        assert!(p.multi_choice("Style", &current).unwrap().is_empty());

        let mut p = prompter("5,3\n");
        assert_eq!(
            p.multi_choice("Style", &current).unwrap(),
            vec![TravelStyle::Food, TravelStyle::Adventure]
        );
    }

    #[test]
    fn hidden_keys_build_the_secret() {
        let mut buffer = String::new();
        for c in "gsk_x".chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(apply_hidden_key(&mut buffer, key), HiddenKey::Continue);
        }
        let backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        apply_hidden_key(&mut buffer, backspace);
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('z'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        apply_hidden_key(&mut buffer, release);

        assert_eq!(buffer, "gsk_");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(apply_hidden_key(&mut buffer, enter), HiddenKey::Submit);
    }

    #[test]
    fn hidden_keys_abort_on_ctrl_c() {
        let mut buffer = String::from("partial");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_hidden_key(&mut buffer, ctrl_c), HiddenKey::Abort);
    }

    #[test]
    fn secret_reads_piped_input_without_hiding() {
        let mut p = prompter("gsk_piped\n");
        assert_eq!(p.secret("Groq API key", "").unwrap(), "gsk_piped");
        let output = String::from_utf8(p.output().clone()).unwrap();
        assert!(!output.contains("input hidden"));
    }

    #[test]
    fn secret_keeps_existing_value() {
        let mut p = prompter("\n");
        assert_eq!(p.secret("Groq API key", "gsk_existing").unwrap(), "gsk_existing");

        let mut p = prompter("\n\nnew-key\n");
        assert_eq!(p.secret("Groq API key", "").unwrap(), "new-key");
    }
}
