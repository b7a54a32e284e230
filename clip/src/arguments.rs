use std::ffi::{OsStr, OsString};

/// Helper type for loading arguments from the environment. Usually
/// [`Parser::parse`][crate::Parser::parse] does this for you.
///
/// This type exists to be an owned container for the arguments retrieved
/// from [`std::env`], which the parser can then borrow from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedArguments {
    arguments: Vec<OsString>,
}

impl LoadedArguments {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            arguments: std::env::args_os().collect(),
        }
    }

    /// Load a full command line, including the program name.
    pub fn new(arguments: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self {
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// The program name, if the command line had one
    #[must_use]
    pub fn argv0(&self) -> Option<&OsStr> {
        self.arguments.first().map(OsString::as_os_str)
    }

    /// Every argument after the program name, as raw bytes
    pub fn args(&self) -> impl Iterator<Item = &[u8]> + Clone {
        self.arguments
            .get(1..)
            .unwrap_or(&[])
            .iter()
            .map(|arg| arg.as_encoded_bytes())
    }
}
