/*!
Metadata about the program being parsed for: its name, a short description,
its author and version, and how error output should be colored.
*/

/// Whether error output should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color only if stderr is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/**
Application metadata, shown in help and version output.

```
use clip::App;

let app = App::new("timer")
    .about("Countdown timer.")
    .version("0.1.0");

assert_eq!(app.name(), "timer");
assert_eq!(app.version_text(), "0.1.0");
assert_eq!(app.author_text(), "");
```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    name: String,
    about: String,
    author: String,
    version: String,
    color: ColorChoice,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: String::new(),
            author: String::new(),
            version: String::new(),
            color: ColorChoice::Auto,
        }
    }

    #[must_use]
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the version. A non-empty version adds `--version`/`-V`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn about_text(&self) -> &str {
        &self.about
    }

    #[inline]
    #[must_use]
    pub fn author_text(&self) -> &str {
        &self.author
    }

    #[inline]
    #[must_use]
    pub fn version_text(&self) -> &str {
        &self.version
    }

    #[inline]
    #[must_use]
    pub fn color_choice(&self) -> ColorChoice {
        self.color
    }
}
