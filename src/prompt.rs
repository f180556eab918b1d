//! Interactive prompts
//!
//! Every prompt returns `Ok(None)` when the user cancels (Esc or Ctrl-C), so
//! callers decide how far a cancellation propagates.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, Stylize},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Capability to ask the user for choices.
pub trait Prompter {
    /// Pick one option; returns its index.
    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>>;

    /// Pick at least one option; returns indices in the order they were picked.
    fn multiselect(&mut self, message: &str, options: &[String]) -> Result<Option<Vec<usize>>>;

    /// Free text; empty input is rejected by the prompt itself.
    fn text(&mut self, message: &str, placeholder: &str) -> Result<Option<String>>;

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    fn info(&mut self, msg: &str) {
        println!("{} {}", "│".with(Color::DarkGrey), msg);
    }

    fn warn(&mut self, msg: &str) {
        eprintln!("{} {}", "Error:".with(Color::Red).bold(), msg);
    }
}

/// Rows of a list shown at once; longer menus scroll.
const VISIBLE_ROWS: usize = 12;

/// Columns taken by `"│ › ◼ "` in front of a list option.
const OPTION_INDENT: usize = 6;

/// Columns taken by the `"◆ "` or `"│ "` gutter.
const GUTTER: usize = 2;

/// crossterm-backed prompts on stdout.
pub struct TermPrompter {
    out: Stdout,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw mode for the lifetime of one prompt.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort terminal restoration
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), cursor::Show);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    Enter,
    Cancel,
    Backspace,
    Char(char),
    Other,
}

fn key_from(code: KeyCode, modifiers: KeyModifiers) -> Key {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char('c') if ctrl => Key::Cancel,
        KeyCode::Char(_) if ctrl => Key::Other,
        KeyCode::Esc => Key::Cancel,
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(' ') => Key::Toggle,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn read_key() -> io::Result<Key> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        {
            if kind == KeyEventKind::Press {
                return Ok(key_from(code, modifiers));
            }
        }
    }
}

fn term_width() -> usize {
    terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Like [`fit`] but keeps the end of `text`, so typing stays visible.
fn fit_tail(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut tail = Vec::new();
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(c);
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

fn prev(cursor: usize, len: usize) -> usize {
    cursor.checked_sub(1).unwrap_or(len - 1)
}

fn next(cursor: usize, len: usize) -> usize {
    (cursor + 1) % len
}

/// Cursor and picks of a multiselect. Picks keep the order they were made in.
struct MultiSelectState {
    len: usize,
    cursor: usize,
    order: Vec<usize>,
}

impl MultiSelectState {
    fn new(len: usize) -> Self {
        Self {
            len,
            cursor: 0,
            order: Vec::new(),
        }
    }

    fn is_chosen(&self, i: usize) -> bool {
        self.order.contains(&i)
    }

    fn up(&mut self) {
        self.cursor = prev(self.cursor, self.len);
    }

    fn down(&mut self) {
        self.cursor = next(self.cursor, self.len);
    }

    fn toggle(&mut self) {
        match self.order.iter().position(|&i| i == self.cursor) {
            Some(pos) => {
                self.order.remove(pos);
            }
            None => self.order.push(self.cursor),
        }
    }

    /// Pick everything still unpicked, in option order; clear when all are picked.
    fn toggle_all(&mut self) {
        if self.order.len() == self.len {
            self.order.clear();
            return;
        }
        for i in 0..self.len {
            if !self.is_chosen(i) {
                self.order.push(i);
            }
        }
    }

    fn picked(&self) -> &[usize] {
        &self.order
    }
}

/// Redraws a block of lines in place.
struct Frame<'a> {
    out: &'a mut Stdout,
    drawn: u16,
}

impl<'a> Frame<'a> {
    fn new(out: &'a mut Stdout) -> Self {
        Self { out, drawn: 0 }
    }

    /// Lines must fit the terminal width; `drawn` counts one row per line.
    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.drawn > 0 {
            queue!(self.out, cursor::MoveUp(self.drawn))?;
        }
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            queue!(self.out, Print(line))?;
        }
        self.drawn = lines.len().saturating_sub(1) as u16;
        self.out.flush()
    }

    /// Replace the prompt with a one-line summary.
    fn finish(&mut self, message: &str, answer: Option<&str>) -> io::Result<()> {
        let width = term_width().saturating_sub(GUTTER);
        let message = fit(message, width);
        let room = width.saturating_sub(message.width() + 1);
        let summary = match answer {
            Some(a) => format!(
                "{} {} {}",
                "◇".with(Color::Green),
                message,
                fit(a, room).with(Color::DarkGrey)
            ),
            None => format!(
                "{} {} {}",
                "■".with(Color::Red),
                message,
                "cancelled".with(Color::DarkGrey)
            ),
        };
        self.draw(&[summary])?;
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()
    }
}

fn header(message: &str, width: usize) -> String {
    let message = fit(message, width.saturating_sub(GUTTER));
    format!("{} {}", "◆".with(Color::Cyan), message.bold())
}

/// First row of the visible window so that `cursor` stays on screen.
fn window_start(cursor: usize, len: usize) -> usize {
    if len <= VISIBLE_ROWS || cursor < VISIBLE_ROWS / 2 {
        0
    } else {
        (cursor - VISIBLE_ROWS / 2).min(len - VISIBLE_ROWS)
    }
}

/// Lines of a list prompt, each cut to `width` columns so redraws stay aligned.
fn list_lines(
    message: &str,
    options: &[String],
    cursor: usize,
    marker: impl Fn(usize) -> Option<bool>,
    hint: &str,
    error: Option<&str>,
    width: usize,
) -> Vec<String> {
    let mut lines = vec![header(message, width)];
    let start = window_start(cursor, options.len());
    let end = (start + VISIBLE_ROWS).min(options.len());
    if start > 0 {
        lines.push(format!("{}  ...", "│".with(Color::DarkGrey)));
    }
    for (i, option) in options.iter().enumerate().take(end).skip(start) {
        let pointer = if i == cursor { "›" } else { " " };
        let check = match marker(i) {
            Some(true) => "◼ ",
            Some(false) => "◻ ",
            None => "",
        };
        let option = fit(option, width.saturating_sub(OPTION_INDENT));
        let text = format!("{} {}{}", pointer, check, option);
        let text = if i == cursor {
            text.with(Color::Cyan).to_string()
        } else {
            text
        };
        lines.push(format!("{} {}", "│".with(Color::DarkGrey), text));
    }
    if end < options.len() {
        lines.push(format!("{}  ...", "│".with(Color::DarkGrey)));
    }
    let room = width.saturating_sub(GUTTER);
    match error {
        Some(e) => lines.push(format!(
            "{} {}",
            "└".with(Color::Yellow),
            fit(e, room).with(Color::Yellow)
        )),
        None => lines.push(format!(
            "{} {}",
            "└".with(Color::DarkGrey),
            fit(hint, room).with(Color::DarkGrey)
        )),
    }
    lines
}

impl Prompter for TermPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        let _guard = RawModeGuard::enable()?;
        queue!(self.out, cursor::Hide)?;
        let mut frame = Frame::new(&mut self.out);
        let mut cursor = 0usize;
        loop {
            frame.draw(&list_lines(
                message,
                options,
                cursor,
                |_| None,
                "↑/↓ move · enter select · esc cancel",
                None,
                term_width(),
            ))?;
            match read_key()? {
                Key::Up | Key::Char('k') => cursor = prev(cursor, options.len()),
                Key::Down | Key::Char('j') => cursor = next(cursor, options.len()),
                Key::Enter => {
                    frame.finish(message, Some(&options[cursor]))?;
                    return Ok(Some(cursor));
                }
                Key::Cancel => {
                    frame.finish(message, None)?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn multiselect(&mut self, message: &str, options: &[String]) -> Result<Option<Vec<usize>>> {
        if options.is_empty() {
            return Ok(None);
        }
        let _guard = RawModeGuard::enable()?;
        queue!(self.out, cursor::Hide)?;
        let mut frame = Frame::new(&mut self.out);
        let mut state = MultiSelectState::new(options.len());
        let mut error: Option<&str> = None;
        loop {
            frame.draw(&list_lines(
                message,
                options,
                state.cursor,
                |i| Some(state.is_chosen(i)),
                "space toggle · a all · enter confirm · esc cancel",
                error,
                term_width(),
            ))?;
            match read_key()? {
                Key::Up | Key::Char('k') => state.up(),
                Key::Down | Key::Char('j') => state.down(),
                Key::Toggle => {
                    state.toggle();
                    error = None;
                }
                Key::Char('a') => {
                    state.toggle_all();
                    error = None;
                }
                Key::Enter => {
                    let picked = state.picked().to_vec();
                    if picked.is_empty() {
                        error = Some("Please select at least one option (space to toggle)");
                        continue;
                    }
                    let summary = picked
                        .iter()
                        .map(|i| options[*i].as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    frame.finish(message, Some(&summary))?;
                    return Ok(Some(picked));
                }
                Key::Cancel => {
                    frame.finish(message, None)?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn text(&mut self, message: &str, placeholder: &str) -> Result<Option<String>> {
        let _guard = RawModeGuard::enable()?;
        let mut frame = Frame::new(&mut self.out);
        let mut input = String::new();
        let mut error: Option<&str> = None;
        loop {
            let width = term_width();
            let room = width.saturating_sub(GUTTER);
            let shown = if input.is_empty() {
                fit(placeholder, room).with(Color::DarkGrey).to_string()
            } else {
                fit_tail(&input, room)
            };
            let footer = match error {
                Some(e) => format!("{} {}", "└".with(Color::Yellow), e.with(Color::Yellow)),
                None => format!("{}", "└".with(Color::DarkGrey)),
            };
            frame.draw(&[
                header(message, width),
                format!("{} {}", "│".with(Color::DarkGrey), shown),
                footer,
            ])?;
            match read_key()? {
                Key::Char(c) => {
                    input.push(c);
                    error = None;
                }
                Key::Toggle => {
                    input.push(' ');
                    error = None;
                }
                Key::Backspace => {
                    input.pop();
                }
                Key::Enter => {
                    if input.is_empty() {
                        error = Some("Path cannot be empty");
                        continue;
                    }
                    frame.finish(message, Some(&input))?;
                    return Ok(Some(input));
                }
                Key::Cancel => {
                    frame.finish(message, None)?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        let _guard = RawModeGuard::enable()?;
        queue!(self.out, cursor::Hide)?;
        let mut frame = Frame::new(&mut self.out);
        let mut value = default;
        loop {
            let (yes, no) = if value {
                ("● Yes".with(Color::Cyan).to_string(), "○ No".to_string())
            } else {
                ("○ Yes".to_string(), "● No".with(Color::Cyan).to_string())
            };
            frame.draw(&[
                header(message, term_width()),
                format!("{} {} / {}", "│".with(Color::DarkGrey), yes, no),
                format!("{}", "└".with(Color::DarkGrey)),
            ])?;
            match read_key()? {
                Key::Left | Key::Right | Key::Up | Key::Down | Key::Toggle => value = !value,
                Key::Char('y') | Key::Char('Y') => value = true,
                Key::Char('n') | Key::Char('N') => value = false,
                Key::Enter => {
                    frame.finish(message, Some(if value { "Yes" } else { "No" }))?;
                    return Ok(Some(value));
                }
                Key::Cancel => {
                    frame.finish(message, None)?;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(window_start(0, 5), 0);
        assert_eq!(window_start(4, 5), 0);
        assert_eq!(window_start(3, 40), 0);
        assert_eq!(window_start(20, 40), 14);
        assert_eq!(window_start(39, 40), 28);
    }

    #[test]
    fn list_lines_marks_cursor_and_selection() {
        let options = vec!["a".to_string(), "b".to_string()];
        let lines = list_lines("Pick", &options, 1, |i| Some(i == 0), "hint", None, 80);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("◼ a"));
        assert!(lines[2].contains("› ◻ b"));
        assert!(lines[3].contains("hint"));
    }

    #[test]
    fn long_options_are_cut_to_the_terminal() {
        let options = vec![format!("📄 {}.mp4", "x".repeat(200))];
        let lines = list_lines("Pick", &options, 0, |_| Some(false), "hint", None, 40);
        assert!(lines[1].contains('…'));
        assert!(!lines[1].contains(&"x".repeat(40)));
    }

    #[test]
    fn fit_respects_display_width() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abcdefghij", 5), "abcd…");
        assert_eq!(fit("📁 photos", 4), "📁 …");
        assert!(fit(&"漫".repeat(30), 11).width() <= 11);
        assert_eq!(fit_tail("/sdcard/Download/long", 9), "…oad/long");
        assert_eq!(fit_tail("/sdcard", 10), "/sdcard");
    }

    #[test]
    fn multiselect_returns_picks_in_pick_order() {
        let mut state = MultiSelectState::new(3);
        state.down();
        state.down();
        state.toggle();
        state.down();
        state.toggle();
        state.down();
        state.toggle();
        assert_eq!(state.picked(), [2, 0, 1]);
    }

    #[test]
    fn untoggling_removes_from_pick_order() {
        let mut state = MultiSelectState::new(4);
        state.up();
        state.toggle(); // 3
        state.up();
        state.up();
        state.toggle(); // 1
        state.down();
        state.down();
        state.toggle(); // 3 off
        assert_eq!(state.picked(), [1]);
        assert!(!state.is_chosen(3));
    }

    #[test]
    fn select_all_appends_missing_in_option_order() {
        let mut state = MultiSelectState::new(4);
        state.down();
        state.down();
        state.toggle();
        state.toggle_all();
        assert_eq!(state.picked(), [2, 0, 1, 3]);
        state.toggle_all();
        assert!(state.picked().is_empty());
    }

    #[test]
    fn control_chords_are_not_typed() {
        assert_eq!(key_from(KeyCode::Char('c'), KeyModifiers::CONTROL), Key::Cancel);
        assert_eq!(key_from(KeyCode::Char('u'), KeyModifiers::CONTROL), Key::Other);
        assert_eq!(key_from(KeyCode::Char('u'), KeyModifiers::NONE), Key::Char('u'));
        assert_eq!(key_from(KeyCode::Char('U'), KeyModifiers::SHIFT), Key::Char('U'));
        assert_eq!(key_from(KeyCode::Char(' '), KeyModifiers::NONE), Key::Toggle);
    }
}
