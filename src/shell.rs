//! Interactive command shell driving the converter.
//!
//! Commands are parsed into [`Command`] values first and only then applied to
//! [`ShellState`], so a malformed line never touches the state.

use crate::config::Config;
use crate::output::{AsciiOutput, ConsoleOutput, HtmlOutput};
use crate::{AsciiGrid, Converter, GlyphRasterizer, PaddedImage, Result};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const PROMPT: &str = ">>> ";

const FIRST_PRINTABLE: char = '!';
const LAST_PRINTABLE: char = '~';
// Each output character covers at least this many pixels per side
const MIN_PIXELS_PER_CHAR: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Did not add due to incorrect format")]
    AddFormat,
    #[error("Did not remove due to incorrect format")]
    RemoveFormat,
    #[error("Did not change due to exceeding boundaries")]
    ResolutionBounds,
    #[error("Did not executed due to incorrect command")]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Html,
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSelection {
    Single(char),
    /// Printable ASCII plus space
    All,
    /// Inclusive, ends in either order
    Range(char, char),
    Space,
}

impl CharSelection {
    fn parse(text: &str) -> Option<Self> {
        let chars: Vec<char> = text.chars().collect();
        match chars.as_slice() {
            [' '] => None,
            [c] => Some(Self::Single(*c)),
            [a, '-', b] if is_printable(*a) && is_printable(*b) => Some(Self::Range(*a, *b)),
            _ if text == "all" => Some(Self::All),
            _ if text == "space" => Some(Self::Space),
            _ => None,
        }
    }

    pub fn chars(&self) -> Vec<char> {
        match *self {
            Self::Single(c) => vec![c],
            Self::All => std::iter::once(' ').chain(FIRST_PRINTABLE..=LAST_PRINTABLE).collect(),
            Self::Range(a, b) => (a.min(b)..=a.max(b)).collect(),
            Self::Space => vec![' '],
        }
    }
}

fn is_printable(c: char) -> bool {
    (FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStep {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Chars,
    Add(CharSelection),
    Remove(CharSelection),
    Res(ResolutionStep),
    Console,
    Render,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        match line {
            "exit" => return Ok(Self::Exit),
            "chars" => return Ok(Self::Chars),
            "console" => return Ok(Self::Console),
            "render" => return Ok(Self::Render),
            "res up" => return Ok(Self::Res(ResolutionStep::Up)),
            "res down" => return Ok(Self::Res(ResolutionStep::Down)),
            _ => {}
        }
        if let Some(rest) = line.strip_prefix("add ") {
            return CharSelection::parse(rest).map(Self::Add).ok_or(CommandError::AddFormat);
        }
        if let Some(rest) = line.strip_prefix("remove ") {
            return CharSelection::parse(rest).map(Self::Remove).ok_or(CommandError::RemoveFormat);
        }
        Err(CommandError::Unknown)
    }
}

/// Everything a shell session can change between renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    charset: BTreeSet<char>,
    chars_per_row: u32,
    min_chars_per_row: u32,
    max_chars_per_row: u32,
    output_mode: OutputMode,
}

impl ShellState {
    /// Resolution bounds follow from the padded image size; `chars_per_row`
    /// is clamped into them.
    pub fn new(width: u32, height: u32, chars_per_row: u32, charset: impl IntoIterator<Item = char>) -> Self {
        let min_chars_per_row = (width / height.max(1)).max(1);
        let max_chars_per_row = (width / MIN_PIXELS_PER_CHAR).max(min_chars_per_row);
        Self {
            charset: charset.into_iter().collect(),
            chars_per_row: chars_per_row.min(max_chars_per_row).max(min_chars_per_row),
            min_chars_per_row,
            max_chars_per_row,
            output_mode: OutputMode::default(),
        }
    }

    pub fn charset(&self) -> Vec<char> {
        self.charset.iter().copied().collect()
    }

    pub fn chars_per_row(&self) -> u32 {
        self.chars_per_row
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min_chars_per_row, self.max_chars_per_row)
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn add(&mut self, selection: CharSelection) {
        self.charset.extend(selection.chars());
    }

    pub fn remove(&mut self, selection: CharSelection) {
        for ch in selection.chars() {
            self.charset.remove(&ch);
        }
    }

    /// Double or halve the characters per row; out-of-bounds steps leave it unchanged.
    pub fn step_resolution(&mut self, step: ResolutionStep) -> std::result::Result<u32, CommandError> {
        let next = match step {
            ResolutionStep::Up => self.chars_per_row.checked_mul(2),
            ResolutionStep::Down => Some(self.chars_per_row / 2),
        };
        match next {
            Some(n) if (self.min_chars_per_row..=self.max_chars_per_row).contains(&n) => {
                self.chars_per_row = n;
                Ok(n)
            }
            _ => Err(CommandError::ResolutionBounds),
        }
    }
}

pub struct Shell<R> {
    image: PaddedImage,
    converter: Converter<R>,
    state: ShellState,
    html_file: PathBuf,
    font_family: String,
}

impl<R: GlyphRasterizer> Shell<R> {
    pub fn new(image: PaddedImage, converter: Converter<R>, config: &Config) -> Self {
        let state = ShellState::new(
            image.width(),
            image.height(),
            config.chars_per_row,
            config.charset.chars(),
        );
        Self {
            image,
            converter,
            state,
            html_file: config.html_file.clone(),
            font_family: config.font_family.clone(),
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    pub fn render(&mut self) -> Result<AsciiGrid> {
        self.converter.convert(&self.image, self.state.chars_per_row, &self.state.charset())
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        match command {
            Command::Exit => return Ok(false),
            Command::Chars => {
                for ch in &self.state.charset {
                    write!(out, "{} ", ch)?;
                }
                writeln!(out)?;
            }
            Command::Add(selection) => self.state.add(selection),
            Command::Remove(selection) => self.state.remove(selection),
            Command::Res(step) => match self.state.step_resolution(step) {
                Ok(n) => writeln!(out, "Width set to {}", n)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Console => self.state.set_output_mode(OutputMode::Console),
            Command::Render => {
                let written = self.render().and_then(|grid| match self.state.output_mode {
                    OutputMode::Console => ConsoleOutput::new(&mut *out).output(&grid),
                    OutputMode::Html => {
                        HtmlOutput::new(&self.html_file, &self.font_family).output(&grid)
                    }
                });
                if let Err(e) = written {
                    log::warn!("render failed: {}", e);
                    writeln!(out, "{}", e)?;
                }
            }
        }
        Ok(true)
    }

    /// Read commands until `exit` or end of input.
    pub fn run<I: BufRead, W: Write>(&mut self, input: I, mut out: W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            let line = line.trim_end_matches('\r');

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    log::debug!("rejected command {:?}: {}", line, e);
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };
            if !self.execute(command, &mut out)? {
                return Ok(());
            }
        }
    }
}
