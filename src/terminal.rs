use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style,
    terminal::{self, disable_raw_mode, enable_raw_mode},
    ExecutableCommand, QueueableCommand,
};
use itertools::Itertools as _;

use crate::{
    builtin::Registry,
    completion::{self, Completion},
    prompt::Prompt,
    repl::{Input, ReadLine},
};

pub const BELL: char = '\u{07}';
pub const NEWLINE_RAW_TERM: &str = "\r\n";

#[derive(Debug, thiserror::Error)]
pub enum ReadLineError {
    #[error("Io Error <{0}>")]
    Io(#[from] std::io::Error),
}

/// Raw mode line editor with history and command-name completion.
pub struct Editor {
    stdout: Stdout,
    history: Vec<String>,
    completion: Completion,
}

impl Editor {
    pub fn new(registry: &Registry) -> Self {
        Self {
            stdout: std::io::stdout(),
            history: Vec::with_capacity(100),
            completion: completion::generate_completion(registry),
        }
    }
}

impl Input for Editor {
    type Error = ReadLineError;

    fn read_line(&mut self, prompt: &Prompt, line: &mut String) -> Result<ReadLine, ReadLineError> {
        write!(self.stdout, "{}", prompt.text())?;
        self.stdout.flush()?;

        enable_raw_mode()?;
        let mut session = Session {
            line: &mut *line,
            stdout: &mut self.stdout,
            prompt,
            history: &self.history,
            history_idx: self.history.len(),
            completion: &self.completion,
            tab_state: TabCompletionState::None,
        };
        let res = session.run();
        // children must never inherit a raw terminal
        disable_raw_mode()?;

        if let Ok(ReadLine::Line) = res {
            let trimmed = line.trim();
            if !trimmed.is_empty() && self.history.last().map(String::as_str) != Some(trimmed) {
                self.history.push(trimmed.to_string());
            }
        }
        res
    }
}

#[derive(Clone, Copy)]
enum TabCompletionState {
    /// No completion required
    None,
    /// A previous tab was ambiguous
    Active,
}

enum Step {
    Continue,
    Submit,
    EndOfInput,
}

struct Session<'a> {
    line: &'a mut String,
    stdout: &'a mut Stdout,
    prompt: &'a Prompt,
    history: &'a [String],
    history_idx: usize,
    completion: &'a Completion,
    tab_state: TabCompletionState,
}

impl Session<'_> {
    fn run(&mut self) -> Result<ReadLine, ReadLineError> {
        loop {
            let step = match event::read()? {
                Event::Paste(s) => {
                    self.stdout.execute(style::Print(&s))?;
                    self.line.push_str(&s);
                    Step::Continue
                }
                Event::Key(KeyEvent { kind, .. }) if kind != KeyEventKind::Press => {
                    Step::Continue
                }
                Event::Key(KeyEvent {
                    code,
                    modifiers: KeyModifiers::CONTROL,
                    ..
                }) => self.handle_control(code)?,
                Event::Key(KeyEvent {
                    code: KeyCode::Tab, ..
                }) => {
                    self.handle_tab()?;
                    Step::Continue
                }
                Event::Key(KeyEvent { code, .. }) => self.handle_key(code)?,
                _ => Step::Continue,
            };

            match step {
                Step::Continue => {}
                Step::Submit => return Ok(ReadLine::Line),
                Step::EndOfInput => return Ok(ReadLine::EndOfInput),
            }
        }
    }

    fn redraw_line(&mut self) -> std::io::Result<()> {
        self.stdout
            .queue(cursor::MoveToColumn(self.prompt.width()))?
            .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?
            .queue(style::Print(&self.line))?;
        self.stdout.flush()
    }

    fn handle_control(&mut self, code: KeyCode) -> Result<Step, ReadLineError> {
        match code {
            KeyCode::Char('l' | 'L') => {
                self.stdout
                    .queue(terminal::Clear(terminal::ClearType::All))?
                    .queue(cursor::MoveTo(0, 0))?
                    .queue(style::Print(self.prompt.text()))?
                    .queue(style::Print(&self.line))?;

                self.stdout.flush()?;
            }
            KeyCode::Char('d' | 'D') if self.line.is_empty() => {
                self.stdout.execute(style::Print(NEWLINE_RAW_TERM))?;
                return Ok(Step::EndOfInput);
            }
            KeyCode::Char('c' | 'C') => {
                // drop the line and start over
                self.line.clear();

                self.stdout
                    .queue(style::Print("^C"))?
                    .queue(style::Print(NEWLINE_RAW_TERM))?
                    .queue(style::Print(self.prompt.text()))?;

                self.stdout.flush()?;
            }
            KeyCode::Char('j' | 'J') => {
                self.stdout.execute(style::Print(NEWLINE_RAW_TERM))?;
                return Ok(Step::Submit);
            }
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<Step, ReadLineError> {
        match code {
            KeyCode::Up => {
                if self.history.is_empty() {
                    return Ok(Step::Continue);
                }
                self.history_idx = self.history_idx.saturating_sub(1);

                self.line.clear();
                self.line.push_str(&self.history[self.history_idx]);
                self.redraw_line()?;
            }
            KeyCode::Down => {
                if self.history_idx >= self.history.len() {
                    return Ok(Step::Continue);
                }
                self.history_idx += 1;

                self.line.clear();
                if let Some(entry) = self.history.get(self.history_idx) {
                    self.line.push_str(entry);
                }
                self.redraw_line()?;
            }
            KeyCode::Enter | KeyCode::Char('\r' | '\n') => {
                self.stdout.execute(style::Print(NEWLINE_RAW_TERM))?;
                return Ok(Step::Submit);
            }
            KeyCode::Backspace => {
                if self.line.pop().is_some() {
                    self.redraw_line()?;
                }
            }
            KeyCode::Char(c) => {
                self.stdout.execute(style::Print(c))?;
                self.line.push(c);
            }
            _ => {}
        }
        self.tab_state = TabCompletionState::None;
        Ok(Step::Continue)
    }

    fn handle_tab(&mut self) -> std::io::Result<()> {
        // only the command name is completed
        if self.line.contains(crate::args::DELIMITERS) {
            self.stdout.execute(style::Print(BELL))?;
            return Ok(());
        }

        let matches: Vec<String> = self
            .completion
            .predictive_search(self.line.as_bytes())
            .collect();

        match matches.as_slice() {
            [] => {
                self.stdout.execute(style::Print(BELL))?;
                self.tab_state = TabCompletionState::None;
                return Ok(());
            }
            [only] => {
                self.line.clear();
                self.line.push_str(only);
                self.line.push(' ');
                self.redraw_line()?;
                self.tab_state = TabCompletionState::None;
                return Ok(());
            }
            _ => {}
        }

        let prefix: Option<String> = self.completion.longest_prefix(self.line.as_bytes());

        if let Some(s) = prefix {
            if s.len() > self.line.len() {
                self.line.clear();
                self.line.push_str(&s);
                self.redraw_line()?;
                self.tab_state = TabCompletionState::Active;
                return Ok(());
            }
        }

        if let TabCompletionState::None = self.tab_state {
            self.stdout.execute(style::Print(BELL))?;
            self.tab_state = TabCompletionState::Active;
            return Ok(());
        }

        self.stdout.queue(style::Print(NEWLINE_RAW_TERM))?;

        for option in matches.iter().sorted_unstable() {
            self.stdout
                .queue(style::Print(option))?
                .queue(style::Print("  "))?;
        }

        self.stdout
            .queue(style::Print(NEWLINE_RAW_TERM))?
            .queue(style::Print(self.prompt.text()))?
            .queue(style::Print(&self.line))?;

        self.stdout.flush()?;
        self.tab_state = TabCompletionState::None;

        Ok(())
    }
}
