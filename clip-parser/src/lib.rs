#![no_std]

/*!
Splits a command line into positionals and options, one argument at a time,
without knowing anything about the options themselves.

Whether an option takes a value is only known to the caller. So instead of
guessing, the tokenizer hands every option to a [`Visitor`] along with an
[`ArgAccess`], which offers a single value candidate tagged with its
[`Origin`]: the rest of a short cluster, or the next argument. The visitor
takes the candidate or leaves it alone. A lookahead candidate that is left
alone is tokenized again as an argument of its own. After a `--`, everything
is a positional.
*/

#[cfg(test)]
extern crate std;

mod cluster;

use ::core::fmt::{self, Debug, Display, Write};

use cluster::Cluster;

/**
A single, raw argument passed in from the command line.

This type is used in two ways: to indicate long command line options, and to
indicate arguments themselves. For instance, given
`--repeat 3 --message=done 1.5`, `repeat`, `3`, `message`, `done`, and
`1.5` would all be passed as [`Arg`] values to the relevant functions.

An [`Arg`] internally is just a byte slice, since that's what the OS gives us.
[`Arg::as_str`] gets at the text, if it is valid UTF-8.
*/
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Arg<'arg>(&'arg [u8]);

impl<'arg> Arg<'arg> {
    #[inline]
    #[must_use]
    pub const fn new(bytes: &'arg [u8]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &'arg [u8] {
        self.0
    }

    /// The argument as a `str`, or `None` if it isn't valid UTF-8
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&'arg str> {
        ::core::str::from_utf8(self.0).ok()
    }
}

/// Debug-print an arg as a quoted string. Bytes that aren't valid UTF-8 are
/// written as `\xNN` escapes.
impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;

        self.0.utf8_chunks().try_for_each(|chunk| {
            write!(f, "{}", chunk.valid().escape_debug())?;
            chunk
                .invalid()
                .iter()
                .try_for_each(|byte| write!(f, "\\x{byte:02x}"))
        })?;

        f.write_char('"')
    }
}

/// Print an arg for humans. Invalid UTF-8 is replaced with U+FFFD.
impl Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.utf8_chunks().try_for_each(|chunk| {
            f.write_str(chunk.valid())?;

            match chunk.invalid() {
                b"" => Ok(()),
                _ => f.write_char(char::REPLACEMENT_CHARACTER),
            }
        })
    }
}

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter.
    fn visit_positional(self, argument: Arg<'arg>) -> Self::Value;

    /// A long option given as `--option=argument`, with a non-empty
    /// argument
    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A single short option or flag out of a cluster, such as the `o` in
    /// `-vo`
    fn visit_short(self, option: u8, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/// Where the value candidate offered by an [`ArgAccess`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The rest of a short option cluster, as in `-ovalue` or `-o=value`
    Inline,

    /// The next command line argument, as in `-o value` or `--option value`
    Lookahead,
}

/**
[`ArgAccess`] allows a visitor to decide if a given option takes a value,
based on the identity of the flag or option.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? Similarly, `-ab foo` could be `-a b`, `foo`; or `-a`, `-b foo`; or
`-a`, `-b`, `foo`. The [`ArgumentsParser`] can't independently classify a given
argument, so instead, a visitor can inspect the candidate via this trait only
for options that need one, and the `ArgumentsParser` takes care of the logic
of actually determining where that argument comes from.

A candidate that is peeked but never taken stays where it was. For a
[`Lookahead`][Origin::Lookahead] candidate, that means it will be parsed as
the next argument in its own right.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Look at the value candidate without consuming it. Returns [`None`] if
    all of the command line arguments have been exhausted.

    An inline candidate has had a single leading `=` removed, so `-o=value`
    and `-ovalue` both offer `value`.
    */
    fn peek(&mut self) -> Option<(Arg<'arg>, Origin)>;

    /**
    Consume the value candidate. This should only be called by options that
    need it; flags should simply ignore it, to ensure that the next command
    line argument can correctly be parsed independently.
    */
    fn take(self) -> Option<Arg<'arg>>;
}

#[derive(Debug, Clone)]
enum State<'arg> {
    Ready,
    PositionalOnly,
    ShortInProgress(Cluster<'arg>),
}

/**
An `ArgumentsParser` is the main entry point into `clip_parser`. It parses
arguments in each call to `next_arg`, sending those arguments to the given
[`Visitor`]. It handles distinguishing flags, options, and positionals; logic
related to how options get their argument values, and the `--` terminator.

[clip-parser][crate] operates entirely on borrowed data, because we assume
that command-line arguments can be loaded early on in `main` and then handled
in a borrowed form for the rest of the program. The ubiquitous `'arg` lifetime
refers to this borrowed command line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State<'arg>,
    peeked: Option<&'arg [u8]>,
    args: I,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of byte slices, where
    each byte slice is a single argument received from the command line. This
    list should *exclude* the name of the program, which is commonly passed as
    the first argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            peeked: None,
            args: args.into_iter(),
        }
    }

    /// True if there is nothing left to parse.
    #[inline]
    pub fn is_empty(&mut self) -> bool {
        !matches!(self.state, State::ShortInProgress(_)) && self.peek_raw().is_none()
    }

    /// True once a `--` has been parsed.
    #[inline]
    #[must_use]
    pub fn positional_only(&self) -> bool {
        matches!(self.state, State::PositionalOnly)
    }

    #[inline]
    fn next_raw(&mut self) -> Option<&'arg [u8]> {
        self.peeked.take().or_else(|| self.args.next())
    }

    #[inline]
    fn peek_raw(&mut self) -> Option<&'arg [u8]> {
        if self.peeked.is_none() {
            self.peeked = self.args.next();
        }

        self.peeked
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        debug_assert!(!matches!(self.state, State::ShortInProgress(_)));

        self.state = State::PositionalOnly;
        self.next_raw()
            .map(Arg)
            .map(|arg| visitor.visit_positional(arg))
    }

    /// Put `self` into a `Ready` state, then return a StandardArgAccess
    #[inline]
    fn standard_arg(&mut self) -> StandardArgAccess<'_, 'arg, I> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::Ready;
        StandardArgAccess { parent: self }
    }

    /// Put `self` into a `ShortInProgress` state, then return a ShortArgAccess.
    #[inline]
    fn short_arg(&mut self, rest: Cluster<'arg>) -> ShortArgAccess<'_, 'arg> {
        debug_assert!(!matches!(self.state, State::PositionalOnly));

        self.state = State::ShortInProgress(rest);
        ShortArgAccess {
            short: rest.bytes(),
            state: &mut self.state,
        }
    }

    /// Handle getting the argument for a `-s` short option. If there is
    /// remaining content in the cluster, it's the candidate for the argument;
    /// otherwise, the next argument in the input args is the candidate.
    #[inline]
    fn handle_short_argument<V>(&mut self, cluster: Cluster<'arg>, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let option = cluster.option();

        match Cluster::new(cluster.rest()) {
            None => visitor.visit_short(option, self.standard_arg()),
            Some(rest) => visitor.visit_short(option, self.short_arg(rest)),
        }
    }

    /// Handle a `--option` or `--option=value`. An empty inline value counts
    /// as no value at all, so `--option=` looks ahead just like `--option`.
    #[inline]
    fn handle_long_argument<V>(&mut self, option: &'arg [u8], visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let (option, argument) = split_once(option, b'=').unwrap_or((option, &[][..]));

        match argument {
            b"" => visitor.visit_long(Arg(option), self.standard_arg()),
            argument => visitor.visit_long_option(Arg(option), Arg(argument)),
        }
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Ready => match self.next_raw()? {
                b"--" => self.positional_only_arg(visitor),
                [b'-', b'-', option @ ..] => Some(self.handle_long_argument(option, visitor)),
                [b'-', short @ ..] => Some(match Cluster::new(short) {
                    None => visitor.visit_positional(Arg(b"-")),
                    Some(cluster) => self.handle_short_argument(cluster, visitor),
                }),
                positional => Some(visitor.visit_positional(Arg(positional))),
            },
            State::PositionalOnly => self.positional_only_arg(visitor),
            State::ShortInProgress(short) => Some(self.handle_short_argument(short, visitor)),
        }
    }
}

/// ArgAccess implementation that offers the next argument from the list.
/// The next argument is offered verbatim, even if it looks like an option or
/// is a `--`.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    fn peek(&mut self) -> Option<(Arg<'arg>, Origin)> {
        self.parent
            .peek_raw()
            .map(|arg| (Arg(arg), Origin::Lookahead))
    }

    fn take(self) -> Option<Arg<'arg>> {
        self.parent.next_raw().map(Arg)
    }
}

/// ArgAccess implementation that offers the remainder of a short cluster.
/// Handles things like `-ovalue` and `-o=value`, which are equivalent to
/// `-o value`.
struct ShortArgAccess<'a, 'arg> {
    short: &'arg [u8],
    state: &'a mut State<'arg>,
}

impl<'arg> ShortArgAccess<'_, 'arg> {
    #[inline]
    fn value(&self) -> &'arg [u8] {
        self.short.strip_prefix(b"=").unwrap_or(self.short)
    }
}

impl<'arg> ArgAccess<'arg> for ShortArgAccess<'_, 'arg> {
    fn peek(&mut self) -> Option<(Arg<'arg>, Origin)> {
        Some((Arg(self.value()), Origin::Inline))
    }

    fn take(self) -> Option<Arg<'arg>> {
        debug_assert!(
            matches!(*self.state, State::ShortInProgress(rest) if rest.bytes() == self.short)
        );

        *self.state = State::Ready;
        Some(Arg(self.value()))
    }
}

fn split_once(input: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    memchr::memchr(delimiter, input).map(|i| (&input[..i], &input[i + 1..]))
}

#[cfg(test)]
mod tests {
    use std::{format, string::String, vec, vec::Vec};

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Positional(String),
        LongOption(String, String),
        Long(String, Option<(String, Origin)>),
        Short(char, Option<(String, Origin)>),
    }

    /// Records every visit. Options whose name is in `takes` consume their
    /// candidate; every other option only peeks at it.
    struct Recorder<'a> {
        takes: &'a [&'a str],
        events: &'a mut Vec<Event>,
    }

    fn text(arg: Arg<'_>) -> String {
        format!("{arg}")
    }

    impl<'arg> Visitor<'arg> for Recorder<'_> {
        type Value = ();

        fn visit_positional(self, argument: Arg<'arg>) {
            self.events.push(Event::Positional(text(argument)));
        }

        fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) {
            self.events
                .push(Event::LongOption(text(option), text(argument)));
        }

        fn visit_long(self, option: Arg<'arg>, mut arg: impl ArgAccess<'arg>) {
            let name = text(option);
            let value = match self.takes.contains(&name.as_str()) {
                true => arg.peek().map(|(_, origin)| origin).and_then(|origin| {
                    arg.take().map(|value| (text(value), origin))
                }),
                false => None,
            };
            self.events.push(Event::Long(name, value));
        }

        fn visit_short(self, option: u8, mut arg: impl ArgAccess<'arg>) {
            let name = String::from(char::from(option));
            let value = match self.takes.contains(&name.as_str()) {
                true => arg.peek().map(|(_, origin)| origin).and_then(|origin| {
                    arg.take().map(|value| (text(value), origin))
                }),
                false => None,
            };
            self.events.push(Event::Short(char::from(option), value));
        }
    }

    fn run(args: &[&str], takes: &[&str]) -> Vec<Event> {
        let mut events = Vec::new();
        let mut parser = ArgumentsParser::new(args.iter().map(|arg| arg.as_bytes()));

        while let Some(()) = parser.next_arg(Recorder {
            takes,
            events: &mut events,
        }) {}

        events
    }

    fn owned(value: &str, origin: Origin) -> Option<(String, Origin)> {
        Some((String::from(value), origin))
    }

    #[test]
    fn long_options() {
        assert_eq!(
            run(&["--num=5", "--num", "5", "--flag"], &["num"]),
            vec![
                Event::LongOption("num".into(), "5".into()),
                Event::Long("num".into(), owned("5", Origin::Lookahead)),
                Event::Long("flag".into(), None),
            ]
        );
    }

    #[test]
    fn long_option_splits_on_first_equals() {
        assert_eq!(
            run(&["--key=a=b", "--key=="], &[]),
            vec![
                Event::LongOption("key".into(), "a=b".into()),
                Event::LongOption("key".into(), "=".into()),
            ]
        );
    }

    #[test]
    fn empty_inline_value_looks_ahead() {
        assert_eq!(
            run(&["--name=", "bob", "--name="], &["name"]),
            vec![
                Event::Long("name".into(), owned("bob", Origin::Lookahead)),
                Event::Long("name".into(), None),
            ]
        );
    }

    #[test]
    fn short_cluster_ends_at_value() {
        assert_eq!(
            run(&["-abcx"], &["c"]),
            vec![
                Event::Short('a', None),
                Event::Short('b', None),
                Event::Short('c', owned("x", Origin::Inline)),
            ]
        );
    }

    #[test]
    fn short_inline_equals_is_stripped() {
        assert_eq!(
            run(&["-n=5", "-n==5"], &["n"]),
            vec![
                Event::Short('n', owned("5", Origin::Inline)),
                Event::Short('n', owned("=5", Origin::Inline)),
            ]
        );
    }

    #[test]
    fn short_value_falls_back_to_lookahead() {
        assert_eq!(
            run(&["-vn", "5", "rest"], &["n"]),
            vec![
                Event::Short('v', None),
                Event::Short('n', owned("5", Origin::Lookahead)),
                Event::Positional("rest".into()),
            ]
        );
    }

    #[test]
    fn untaken_lookahead_is_parsed_again() {
        assert_eq!(
            run(&["--flag", "value"], &[]),
            vec![
                Event::Long("flag".into(), None),
                Event::Positional("value".into()),
            ]
        );
    }

    #[test]
    fn lookahead_takes_terminator_verbatim() {
        assert_eq!(
            run(&["--message", "--", "-x"], &["message"]),
            vec![
                Event::Long("message".into(), owned("--", Origin::Lookahead)),
                Event::Short('x', None),
            ]
        );
    }

    #[test]
    fn terminator_makes_everything_positional() {
        assert_eq!(
            run(&["-a", "--", "-x", "--", "--long"], &[]),
            vec![
                Event::Short('a', None),
                Event::Positional("-x".into()),
                Event::Positional("--".into()),
                Event::Positional("--long".into()),
            ]
        );
    }

    #[test]
    fn lone_dash_is_positional() {
        assert_eq!(run(&["-"], &[]), vec![Event::Positional("-".into())]);
    }

    #[test]
    fn is_empty() {
        let args: [&[u8]; 0] = [];
        assert!(ArgumentsParser::new(args.iter().copied()).is_empty());

        let args: [&[u8]; 1] = [b"x"];
        let mut parser = ArgumentsParser::new(args.iter().copied());
        assert!(!parser.is_empty());
        assert!(!parser.positional_only());
    }

    #[test]
    fn display_replaces_invalid_utf8() {
        let arg = Arg::new(b"ab\xffc");
        assert_eq!(format!("{arg}"), "ab\u{fffd}c");
        assert_eq!(arg.as_str(), None);
        assert_eq!(format!("{arg:?}"), "\"ab\\xffc\"");
        assert_eq!(format!("{:?}", Arg::new(b"say \"hi\"")), "\"say \\\"hi\\\"\"");
    }
}
