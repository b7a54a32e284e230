/*!
Where help, version, and error output goes. [`Console`] is the real process
streams; [`Capture`] keeps everything in memory, which is mostly useful for
tests.
*/

use std::{
    fmt::Display,
    io::{self, IsTerminal as _},
    process,
};

use colored::Colorize as _;

use crate::app::ColorChoice;

/// A pair of output streams, plus whether error output should be colored.
pub trait Sink {
    /// The stream for help and version output
    fn out(&mut self) -> &mut dyn io::Write;

    /// The stream for errors
    fn err(&mut self) -> &mut dyn io::Write;

    fn colorize(&self) -> bool;
}

/// The process's standard output and standard error.
#[derive(Debug)]
pub struct Console {
    out: io::Stdout,
    err: io::Stderr,
    colorize: bool,
}

impl Console {
    #[must_use]
    pub fn new(color: ColorChoice) -> Self {
        let err = io::stderr();

        let colorize = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => err.is_terminal(),
        };

        if colorize {
            colored::control::set_override(true);
        }

        Self {
            out: io::stdout(),
            err,
            colorize,
        }
    }
}

impl Sink for Console {
    fn out(&mut self) -> &mut dyn io::Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn io::Write {
        &mut self.err
    }

    fn colorize(&self) -> bool {
        self.colorize
    }
}

/// A sink that buffers both streams in memory. Never colorizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub out: Vec<u8>,
    pub err: Vec<u8>,
}

impl Capture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the output stream, lossily decoded
    #[must_use]
    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Everything written to the error stream, lossily decoded
    #[must_use]
    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

impl Sink for Capture {
    fn out(&mut self) -> &mut dyn io::Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn io::Write {
        &mut self.err
    }

    fn colorize(&self) -> bool {
        false
    }
}

/**
Write an error message, followed by a hint about `--help`:

```text
error: illegal option: `--bogus`
For more information try `--help`
```
*/
pub fn write_error(
    out: &mut (impl io::Write + ?Sized),
    colorize: bool,
    message: impl Display,
) -> io::Result<()> {
    match colorize {
        true => write!(out, "{} ", "error:".red().bold())?,
        false => write!(out, "error: ")?,
    }

    writeln!(out, "{message}")?;
    writeln!(out, "For more information try `--help`")
}

/// Report an application-level error on stderr and exit with `status`. This
/// is for errors the program finds in its own arguments after parsing, so
/// that they look the same as parse errors.
pub fn exit_with_error(status: u8, message: impl Display) -> ! {
    let mut console = Console::new(ColorChoice::Auto);
    let colorize = console.colorize();

    // Nothing useful can be done if stderr is gone
    let _ = write_error(console.err(), colorize, message);
    let _ = console.err().flush();

    process::exit(status.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_error() {
        let mut capture = Capture::new();
        let colorize = capture.colorize();
        write_error(capture.err(), colorize, "missing arguments").unwrap();

        assert_eq!(
            capture.err_text(),
            "error: missing arguments\nFor more information try `--help`\n"
        );
        assert!(capture.out.is_empty());
    }

    #[test]
    fn colored_error_label() {
        colored::control::set_override(true);

        let mut out = Vec::new();
        write_error(&mut out, true, "missing arguments").unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("\x1b["));
        assert!(out.contains("error:"));
        assert!(out.ends_with(" missing arguments\nFor more information try `--help`\n"));
    }
}
