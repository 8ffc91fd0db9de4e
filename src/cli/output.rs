//! Colored terminal output for the CLI.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing status lines.
///
/// Informational output goes to stdout and is silenced by `--quiet`; warnings
/// and errors go to stderr and are always shown.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color = if std::env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Self {
            verbose,
            quiet,
            color,
        }
    }

    fn write_styled(
        &self,
        stream: &mut StandardStream,
        prefix: &str,
        color: Option<Color>,
        bold: bool,
        message: &str,
    ) -> std::io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.color)
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(self.color)
    }

    /// Detail line, shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if self.quiet || !self.verbose {
            return Ok(());
        }
        self.write_styled(&mut self.stdout(), "  ", Some(Color::Cyan), false, message)
    }

    /// Success line.
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_styled(&mut self.stdout(), "✓ ", Some(Color::Green), true, message)
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.write_styled(&mut self.stderr(), "warning: ", Some(Color::Yellow), true, message)
    }

    /// Error line on stderr.
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.write_styled(&mut self.stderr(), "error: ", Some(Color::Red), true, message)
    }

    /// Section header.
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = self.stdout();
        writeln!(stream)?;
        self.write_styled(&mut stream, "", None, true, title)
    }

    /// Indented line.
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout(), "    {message}")
    }
}
