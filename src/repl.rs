use std::io::{BufRead, Write};

use crate::{args, dispatch::Dispatcher, prompt::Prompt, Outcome};

/// Result of asking an [`Input`] for the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLine {
    Line,
    EndOfInput,
}

/// Where command lines come from.
pub trait Input {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Show `prompt` and read the next line into `line`, without its newline.
    fn read_line(&mut self, prompt: &Prompt, line: &mut String) -> Result<ReadLine, Self::Error>;
}

/// Line by line reader for pipes, files and terminals without the editor.
pub struct Piped<R, W> {
    reader: R,
    prompt_out: W,
    buf: Vec<u8>,
}

impl<R: BufRead, W: Write> Piped<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self {
            reader,
            prompt_out,
            buf: Vec::with_capacity(1024),
        }
    }
}

impl<R: BufRead, W: Write> Input for Piped<R, W> {
    type Error = std::io::Error;

    fn read_line(&mut self, prompt: &Prompt, line: &mut String) -> std::io::Result<ReadLine> {
        write!(self.prompt_out, "{}", prompt.text())?;
        self.prompt_out.flush()?;

        self.buf.clear();
        self.reader.read_until(b'\n', &mut self.buf)?;
        // a line cut short by end of input is dropped, not run
        if self.buf.pop() != Some(b'\n') {
            return Ok(ReadLine::EndOfInput);
        }

        // input is bytes, not necessarily UTF-8
        line.push_str(&String::from_utf8_lossy(&self.buf));
        Ok(ReadLine::Line)
    }
}

fn flush(stream: &mut dyn Write, name: &str) {
    if let Err(err) = stream.flush() {
        log::debug!("flushing {} failed: {}", name, err);
    }
}

/// Read, tokenize and dispatch until a command or end of input terminates the loop.
///
/// Only a failure to read input ends the loop with an error.
pub fn repl<I: Input>(
    input: &mut I,
    prompt: &Prompt,
    dispatcher: &Dispatcher<'_>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut line = String::with_capacity(1024);

    loop {
        line.clear();

        flush(stdout, "stdout");
        flush(stderr, "stderr");

        match input.read_line(prompt, &mut line)? {
            ReadLine::Line => {}
            ReadLine::EndOfInput => {
                log::debug!("end of input");
                if let Err(err) = writeln!(stdout) {
                    log::debug!("writing to stdout failed: {}", err);
                }
                break;
            }
        }

        let argv = args::tokenize(&line);
        match dispatcher.dispatch(&argv, stdout, stderr) {
            Outcome::Continue => {}
            Outcome::Terminate => break,
        }
    }

    flush(stdout, "stdout");
    Ok(())
}
