/*!
The [`Parser`]: registers parameters, installs the automatic `--help` and
`--version` flags, and scans the command line in a single pass.
*/

use std::{
    io, iter, process,
};

use clip_parser::{Arg, ArgAccess, ArgumentsParser, Origin, Visitor};

use crate::{
    app::App,
    arguments::LoadedArguments,
    errors::{Error, Exit, HelpRequest, RegistrationError, Subject, Tag},
    help,
    parameter::{AnyNamed, Flag, Kind, NamedValue, Parameter, PositionalValue, Scalar},
    registry::Registry,
    sink::{Console, Sink, write_error},
};

/**
A command line parser for one application.

```
use clip::{App, Flag, NamedValue, Parser, PositionalValue};

let mut parser = Parser::new(App::new("timer"));

parser
    .add(Flag::new("verbose").shortname('v'))?
    .add(NamedValue::<i64>::new("repeat").shortname('n').value(1))?
    .add(PositionalValue::<f64>::new("delay"))?;

let args: [&[u8]; 4] = [b"-vn", b"3", b"--verbose", b"1.5"];
parser.try_parse_from(args).unwrap();

assert_eq!(parser.get_flag("verbose")?.count(), 2);
assert_eq!(*parser.get_named::<i64>("repeat")?.get(), 3);
assert_eq!(*parser.get_positional::<f64>("delay")?.get(), 1.5);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
#[derive(Debug, Clone)]
pub struct Parser {
    app: App,
    registry: Registry,
}

impl Parser {
    #[must_use]
    pub fn new(app: App) -> Self {
        Self {
            app,
            registry: Registry::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a parameter. See [`Registry::add`].
    pub fn add(&mut self, parameter: impl Kind) -> Result<&mut Self, RegistrationError> {
        self.registry.add(parameter)?;
        Ok(self)
    }

    pub fn get<P: Kind>(&self, name: &str) -> Result<&P, Error> {
        self.registry.get(name)
    }

    pub fn get_flag(&self, name: &str) -> Result<&Flag, Error> {
        self.registry.get_flag(name)
    }

    pub fn get_named<T: Scalar>(&self, name: &str) -> Result<&NamedValue<T>, Error> {
        self.registry.get_named(name)
    }

    pub fn get_positional<T: Scalar>(&self, name: &str) -> Result<&PositionalValue<T>, Error> {
        self.registry.get_positional(name)
    }

    /// Register `--help`, and `--version` if there's a version to print.
    /// An automatic flag that collides with an existing parameter is skipped.
    fn install_autoflags(&mut self) {
        let help = Flag::new("help")
            .shortname('h')
            .help("Print this message.");

        let version = (!self.app.version_text().is_empty()).then(|| {
            Flag::new("version")
                .shortname('V')
                .help("Print version information.")
        });

        for flag in iter::once(help).chain(version) {
            let name = flag.name().to_owned();

            match self.registry.add(flag) {
                Ok(_) => log::debug!("installed automatic flag `--{name}`"),
                Err(error) => log::warn!("skipping automatic flag `--{name}`: {error}"),
            }
        }
    }

    /**
    Parse a command line, excluding the program name. Every matched
    parameter is updated in place.

    Returns an [`Exit`] if the program should stop instead of continuing:
    because help or version output was requested, or because of an error.
    Anything matched before that point stays matched. Once parsing has
    begun, no more parameters may be registered.
    */
    pub fn try_parse_from<'arg, I>(&mut self, args: I) -> Result<(), Exit>
    where
        I: IntoIterator<Item = &'arg [u8]>,
    {
        if !self.registry.is_sealed() {
            self.install_autoflags();
            self.registry.seal();
        }

        let mut parser = ArgumentsParser::new(args);

        if parser.is_empty() && self.registry.autohelp() {
            log::debug!("no arguments given, printing help");
            return Err(Exit::Help(HelpRequest::NoArguments));
        }

        let mut cursor = 0;

        while let Some(result) = parser.next_arg(Scan {
            registry: &mut self.registry,
            cursor: &mut cursor,
        }) {
            result?;
        }

        // Every positional slot has to be reached, optional or not
        let missing: Vec<String> = self
            .registry
            .positionals()
            .skip(cursor)
            .map(|positional| positional.identity().name().to_owned())
            .collect();

        if !missing.is_empty() {
            return Err(Error::MissingArguments { names: missing }.into());
        }

        log::debug!("parsed {cursor} positional argument slots");
        Ok(())
    }

    /**
    Write whatever an [`Exit`] calls for: help or version text to the output
    stream, or an error to the error stream. Returns the exit status.
    */
    pub fn report(&self, exit: &Exit, sink: &mut impl Sink) -> io::Result<u8> {
        match exit {
            Exit::Help(_) => {
                help::print_help(sink.out(), &self.app, &self.registry)?;
                sink.out().flush()?;
            }
            Exit::Version => {
                help::print_version(sink.out(), &self.app)?;
                sink.out().flush()?;
            }
            Exit::Error(error) => {
                let colorize = sink.colorize();
                write_error(sink.err(), colorize, error)?;
                sink.err().flush()?;
            }
        }

        Ok(exit.status())
    }

    /**
    Parse the process's command line. If parsing can't simply continue, its
    outcome is reported on the console and the process exits.
    */
    pub fn parse(&mut self) {
        let arguments = LoadedArguments::from_env();
        self.parse_args(&arguments)
    }

    /// Like [`parse`][Parser::parse], but with arguments that were already
    /// loaded.
    pub fn parse_args(&mut self, arguments: &LoadedArguments) {
        if let Err(exit) = self.try_parse_from(arguments.args()) {
            let mut console = Console::new(self.app.color_choice());

            let status = self
                .report(&exit, &mut console)
                .unwrap_or_else(|_| exit.status());

            process::exit(status.into())
        }
    }
}

/// The option-capable parameter an option on the command line matched.
enum Matched<'a> {
    Flag,
    Named(&'a mut AnyNamed),
}

/// A visitor for a single argument. `cursor` is the next positional to fill.
struct Scan<'a> {
    registry: &'a mut Registry,
    cursor: &'a mut usize,
}

impl<'a> Scan<'a> {
    /// Count a match for the option at `index`, and check if it's one of the
    /// automatic flags.
    fn matched(self, index: Option<usize>, tag: &Tag) -> Result<Matched<'a>, Exit> {
        let Some(index) = index else {
            return Err(Error::UnknownOption {
                option: tag.clone(),
            }
            .into());
        };

        let Self { registry, .. } = self;
        let parameter = registry.slot_mut(index);

        if parameter.naming().is_none() {
            return Err(Error::InternalInvariant {
                name: parameter.name().to_owned(),
                expected: "an `Option`".to_owned(),
            }
            .into());
        }

        if let Some(naming) = parameter.naming_mut() {
            naming.matched();
            log::trace!("matched `{tag}` (count {})", naming.count());
        }

        let intercepted = match parameter.name() {
            "help" => Some(Exit::Help(HelpRequest::Explicit)),
            "version" => Some(Exit::Version),
            _ => None,
        };

        if let Some(exit) = intercepted {
            return Err(exit);
        }

        Ok(match parameter {
            Parameter::Named(named) => Matched::Named(named),
            Parameter::Flag(_) | Parameter::Positional(_) => Matched::Flag,
        })
    }
}

/// Get a value for the option `tag` from `arg`.
///
/// A lookahead candidate that doesn't parse is left in place for an optional
/// option, so that it gets parsed as an argument of its own.
fn take_value<'arg>(
    named: &mut AnyNamed,
    tag: Tag,
    mut arg: impl ArgAccess<'arg>,
) -> Result<(), Exit> {
    let Some((candidate, origin)) = arg.peek() else {
        return match named.is_optional() {
            true => Ok(()),
            false => Err(Error::MissingValue { option: tag }.into()),
        };
    };

    if named.parse(candidate) {
        log::trace!("`{tag}` took {candidate:?}");
        arg.take();
        return Ok(());
    }

    match (origin, named.is_optional()) {
        (Origin::Lookahead, true) => {
            log::trace!("`{tag}` left {candidate:?} in place");
            Ok(())
        }
        _ => Err(Error::InvalidValue {
            subject: Subject::Option(tag),
            value: candidate.to_string(),
        }
        .into()),
    }
}

impl<'arg> Visitor<'arg> for Scan<'_> {
    type Value = Result<(), Exit>;

    fn visit_positional(self, argument: Arg<'arg>) -> Self::Value {
        loop {
            let cursor = *self.cursor;

            let Some(positional) = self.registry.positional_mut(cursor) else {
                return Err(Error::UnexpectedToken {
                    token: argument.to_string(),
                }
                .into());
            };

            *self.cursor += 1;

            if positional.parse(argument) {
                log::trace!("`{}` took {argument:?}", positional.identity().name());
                return Ok(());
            }

            if !positional.is_optional() {
                return Err(Error::InvalidValue {
                    subject: Subject::Positional(positional.identity().name().to_owned()),
                    value: argument.to_string(),
                }
                .into());
            }

            log::trace!(
                "skipping optional `{}` for {argument:?}",
                positional.identity().name()
            );
        }
    }

    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value {
        let tag = Tag::Long(option.to_string());
        let index = option.as_str().and_then(|long| self.registry.lookup_long(long));

        match self.matched(index, &tag)? {
            // Flags ignore an inline value
            Matched::Flag => Ok(()),
            Matched::Named(named) => match named.parse(argument) {
                true => Ok(()),
                false => Err(Error::InvalidValue {
                    subject: Subject::Option(tag),
                    value: argument.to_string(),
                }
                .into()),
            },
        }
    }

    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Self::Value {
        let tag = Tag::Long(option.to_string());
        let index = option.as_str().and_then(|long| self.registry.lookup_long(long));

        match self.matched(index, &tag)? {
            Matched::Flag => Ok(()),
            Matched::Named(named) => take_value(named, tag, arg),
        }
    }

    fn visit_short(self, option: u8, arg: impl ArgAccess<'arg>) -> Self::Value {
        let tag = Tag::Short(option);
        let index = self.registry.lookup_short(option);

        match self.matched(index, &tag)? {
            Matched::Flag => Ok(()),
            Matched::Named(named) => take_value(named, tag, arg),
        }
    }
}
