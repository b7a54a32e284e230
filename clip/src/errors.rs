/*!
Errors for everything that can go wrong while registering parameters or
parsing the command line, plus [`Exit`], the outcome of a parse that didn't
simply succeed.
 */

use std::fmt;

use lazy_format::lazy_format;

/// The option spelling that was found on the command line, exactly as we
/// found it (minus any value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `--long`
    Long(String),

    /// `-s`; not necessarily valid UTF-8 if it came out of a cluster
    Short(u8),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Tag::Long(ref long) => write!(f, "--{long}"),
            Tag::Short(short) if short.is_ascii() => write!(f, "-{}", char::from(short)),
            Tag::Short(short) => write!(f, "-\\x{short:02x}"),
        }
    }
}

/// The thing that failed to accept a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Option(Tag),
    Positional(String),
}

fn invalid_value<'a>(subject: &'a Subject, value: &'a str) -> impl fmt::Display + 'a {
    lazy_format! {
        match (subject) {
            Subject::Option(tag) => "{tag}={value}",
            Subject::Positional(name) => "{name}",
        }
    }
}

/**
Errors that occur while parsing the command line. The first error aborts the
parse; anything matched before it stays matched.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An option that no parameter answers to
    #[error("illegal option: `{option}`")]
    UnknownOption { option: Tag },

    /// A required value was absent at the end of the command line
    #[error("missing value for `{option}`")]
    MissingValue { option: Tag },

    /// A value failed to parse into its parameter's type
    #[error("invalid value for `{}`", invalid_value(.subject, .value))]
    InvalidValue { subject: Subject, value: String },

    /// Positionals were left over at the end of the command line
    #[error("missing arguments")]
    MissingArguments { names: Vec<String> },

    /// A bare argument with no positional left to receive it
    #[error("unexpected token: `{token}`")]
    UnexpectedToken { token: String },

    /// A parameter turned out to be a different kind than expected. This
    /// indicates a bug, either in the caller or in `clip` itself.
    #[error("internal error: `{name}` is not {expected}")]
    InternalInvariant { name: String, expected: String },

    /// A lookup for a parameter that was never registered
    #[error("internal error: `{name}` was never registered")]
    Unregistered { name: String },
}

impl Error {
    /// The process exit status for this error
    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Error::InternalInvariant { .. } | Error::Unregistered { .. } => 2,
            _ => 1,
        }
    }
}

/**
Errors that occur while registering a parameter. These are programmer errors
rather than user errors; when [`add`][crate::registry::Registry::add] returns
one, the registry is left exactly as it was.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error("a parameter named `{name}` is already registered")]
    DuplicateName { name: String },

    #[error("`{name}` can't use `--{longname}`, it already belongs to `{existing}`")]
    DuplicateLongname {
        name: String,
        longname: String,
        existing: String,
    },

    #[error("`{name}` can't use `-{shortname}`, it already belongs to `{existing}`")]
    DuplicateShortname {
        name: String,
        shortname: char,
        existing: String,
    },

    #[error("`{name}` has an invalid longname `{longname}`")]
    InvalidLongname { name: String, longname: String },

    #[error("`{name}` has an invalid shortname `{shortname}`")]
    InvalidShortname { name: String, shortname: char },

    #[error("can't register `{name}` after parsing has begun")]
    AfterParse { name: String },
}

/// Why help text is being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpRequest {
    /// `--help` or `-h` was given
    Explicit,

    /// There were no arguments at all, and nothing requires one
    NoArguments,
}

/**
The outcome of a parse that didn't simply succeed. Each variant means the
program should print something and stop; [`status`][Exit::status] is the
process exit status to stop with.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Help(HelpRequest),
    Version,
    Error(Error),
}

impl Exit {
    #[must_use]
    pub fn status(&self) -> u8 {
        match self {
            Exit::Help(HelpRequest::Explicit) | Exit::Version => 0,
            Exit::Help(HelpRequest::NoArguments) => 1,
            Exit::Error(error) => error.status(),
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Exit::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Error> for Exit {
    fn from(error: Error) -> Self {
        Exit::Error(error)
    }
}
