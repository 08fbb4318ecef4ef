/*!
 * Operator interaction.
 *
 * Every question the pipeline asks goes through the `Operator` trait so the
 * controller can run headless. `TerminalOperator` talks to stdin/stdout;
 * `ScriptedOperator` replays queued answers and records what was shown.
 */

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Interaction surface used by the controller
pub trait Operator {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;

    /// Ask the operator to pick one of `options`; returns the chosen option
    fn choose(&mut self, prompt: &str, options: &[String]) -> io::Result<String>;

    /// Ask for free text
    fn input_text(&mut self, prompt: &str) -> io::Result<String>;

    /// Show a message
    fn show(&mut self, message: &str);
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_choice(answer: &str, options: &[String]) -> Option<String> {
    let answer = answer.trim();
    if let Ok(index) = answer.parse::<usize>() {
        if index >= 1 && index <= options.len() {
            return Some(options[index - 1].clone());
        }
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .cloned()
}

/// Operator backed by a reader and a writer, stdin/stdout by default
pub struct TerminalOperator<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    /// Answer every confirmation with yes without asking
    assume_yes: bool,
}

impl TerminalOperator<io::StdinLock<'static>, io::Stdout> {
    /// Operator on the process terminal
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    /// Operator on arbitrary streams
    pub fn new(reader: R, writer: W, assume_yes: bool) -> Self {
        Self {
            reader,
            writer,
            assume_yes,
        }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        if self.assume_yes {
            writeln!(self.writer, "{} yes", prompt)?;
            return Ok(true);
        }
        loop {
            let answer = self.ask(&format!("{} Y/N", prompt))?;
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(yes),
                None => writeln!(self.writer, "Please answer yes or no.")?,
            }
        }
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_choice(&answer, options) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.writer, "Please choose one of: {}", options.join(", "))?,
            }
        }
    }

    fn input_text(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    fn show(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{}", message);
    }
}

/// Operator replaying queued answers, for headless runs and tests
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    /// Prompts asked, in order
    pub prompts: Vec<String>,
    /// Messages shown, in order
    pub messages: Vec<String>,
}

impl ScriptedOperator {
    /// Operator answering with `answers` in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, format!("no scripted answer for '{}'", prompt))
        })
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.next_answer(prompt)?;
        Ok(parse_yes_no(&answer).unwrap_or(false))
    }

    fn choose(&mut self, prompt: &str, options: &[String]) -> io::Result<String> {
        let answer = self.next_answer(prompt)?;
        parse_choice(&answer, options).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("'{}' is not an option", answer))
        })
    }

    fn input_text(&mut self, prompt: &str) -> io::Result<String> {
        self.next_answer(prompt)
    }

    fn show(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
