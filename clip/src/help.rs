/*!
Help, usage, and version text.

```text
timer 0.1.0
Countdown timer.

USAGE:
	timer [FLAGS] [OPTIONS] <ARGS>

FLAGS:
	-v, --verbose   Use verbose output.
	-h, --help      Print this message.

OPTIONS:
	-n, --repeat <INT>      Number of times to repeat.

ARGS:
	<DELAY>         Seconds to wait.

```
*/

use std::{
    fmt::Display,
    io,
};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator as _;
use lazy_format::lazy_format;

use crate::{
    app::App,
    parameter::{AnyNamed, AnyPositional, Flag, Naming},
    registry::Registry,
};

const FLAG_WIDTH: usize = 16;
const OPTION_WIDTH: usize = 24;
const ARG_WIDTH: usize = 16;

/// `{name} {version}`. The space is there even if the version is empty.
pub fn version_line(app: &App) -> impl Display + '_ {
    let name = app.name();
    let version = app.version_text();

    lazy_format!("{name} {version}")
}

/// The one-line synopsis: the program name, then a placeholder for each kind
/// of parameter that exists.
pub fn usage<'a>(app: &'a App, registry: &'a Registry) -> impl Display + 'a {
    let flags = registry.flags().next().is_some().then_some("[FLAGS]");
    let options = registry.options().next().is_some().then_some("[OPTIONS]");
    let args = registry.positionals().next().is_some().then_some("<ARGS>");

    [Some(app.name()), flags, options, args]
        .into_iter()
        .flatten()
        .join_with(' ')
}

pub fn print_version(out: &mut (impl io::Write + ?Sized), app: &App) -> io::Result<()> {
    writeln!(out, "{}", version_line(app))
}

pub fn print_help(
    out: &mut (impl io::Write + ?Sized),
    app: &App,
    registry: &Registry,
) -> io::Result<()> {
    writeln!(out, "{}", version_line(app))?;

    for line in [app.author_text(), app.about_text()] {
        if !line.is_empty() {
            writeln!(out, "{line}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "USAGE: ")?;
    writeln!(out, "\t{}", usage(app, registry))?;
    writeln!(out)?;

    maybe_section(out, "FLAGS", registry.flags(), |out, flag| {
        print_flag(out, flag)
    })?;

    maybe_section(out, "OPTIONS", registry.options(), |out, option| {
        print_option(out, option)
    })?;

    maybe_section(out, "ARGS", registry.positionals(), |out, positional| {
        print_positional(out, positional)
    })
}

fn tags(naming: &Naming) -> impl Display + '_ {
    let long = naming.longname();

    lazy_format!(match (naming.shortname()) {
        Some(short) => "-{short}, --{long}",
        None => "    --{long}",
    })
}

fn placeholder(metavar: &str, optional: bool) -> impl Display + '_ {
    lazy_format!(match (optional) {
        true => "[{metavar}]",
        false => "<{metavar}>",
    })
}

fn print_flag(out: &mut (impl io::Write + ?Sized), flag: &Flag) -> io::Result<()> {
    describe(out, tags(flag.naming()), FLAG_WIDTH, flag.identity().help())
}

fn print_option(out: &mut (impl io::Write + ?Sized), option: &AnyNamed) -> io::Result<()> {
    let tags = tags(option.naming());
    let placeholder = placeholder(option.metavar(), option.is_optional());

    describe(
        out,
        lazy_format!("{tags} {placeholder}"),
        OPTION_WIDTH,
        option.identity().help(),
    )
}

fn print_positional(
    out: &mut (impl io::Write + ?Sized),
    positional: &AnyPositional,
) -> io::Result<()> {
    describe(
        out,
        placeholder(positional.metavar(), positional.is_optional()),
        ARG_WIDTH,
        positional.identity().help(),
    )
}

/// Write a section: the `header`, then each item indented by a tab, then a
/// blank line. Nothing is written if there are no items.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter().peekable();

    if items.peek().is_none() {
        return Ok(());
    }

    writeln!(out, "{header}:")?;

    {
        let mut out = IndentWriter::new("\t", &mut *out);
        items.try_for_each(|item| body(&mut out, item))?;
    }

    writeln!(out)
}

/// Describe an item by printing it padded out to `width`, followed by its
/// help. An item too wide for its column gets a line to itself, and the help
/// goes on the next line at the column.
fn describe(
    out: &mut (impl io::Write + ?Sized),
    item: impl Display,
    width: usize,
    help: &str,
) -> io::Result<()> {
    let item = item.to_string();

    match item.len() < width {
        true => writeln!(out, "{item:width$}{help}"),
        false => writeln!(out, "{item}\n{:width$}{help}", ""),
    }
}
