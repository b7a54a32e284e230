/*!
The parameter model.

Every parameter is built out of up to three capabilities:

- [`Identity`]: a fixed name and some help text. All parameters have this.
- [`Naming`]: a `--longname`, an optional `-s` shortname, and a count of how
  many times the parameter appeared on the command line.
- [`Value`]: a typed slot, a metavariable for usage messages, and whether the
  value may be omitted.

The three concrete kinds combine them: a [`Flag`] is named but has no value, a
[`NamedValue`] is named and has a value, and a [`PositionalValue`] has a
value but no name on the command line. Once registered, parameters are stored
type-erased as a [`Parameter`], and get narrowed back to their concrete kind
through the [`Kind`] trait.
*/

use std::{fmt, str::FromStr};

use clip_parser::Arg;

/// The identity shared by every parameter: a fixed name and its help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    help: String,
}

impl Identity {
    fn new(name: String) -> Self {
        Self {
            name,
            help: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }
}

/// The option capability: how a parameter is spelled on the command line, and
/// how many times it appeared there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    longname: String,
    shortname: Option<char>,
    count: u32,
}

impl Naming {
    fn new(name: &str) -> Self {
        Self {
            longname: name.to_owned(),
            shortname: None,
            count: 0,
        }
    }

    /// The `--longname`, without the leading dashes
    #[inline]
    #[must_use]
    pub fn longname(&self) -> &str {
        &self.longname
    }

    /// The `-s` shortname, without the leading dash
    #[inline]
    #[must_use]
    pub fn shortname(&self) -> Option<char> {
        self.shortname
    }

    /// How many times this parameter was matched on the command line
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub(crate) fn matched(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

/// Check that `longname` matches `[A-Za-z0-9][A-Za-z0-9-]*`.
#[must_use]
pub fn is_valid_longname(longname: &str) -> bool {
    let mut bytes = longname.bytes();

    bytes.next().is_some_and(|b| b.is_ascii_alphanumeric())
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Shortnames must be a single ASCII letter or digit.
#[inline]
#[must_use]
pub fn is_valid_shortname(shortname: char) -> bool {
    shortname.is_ascii_alphanumeric()
}

/// The closed set of types a [`Value`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Integer,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Float => "float",
            ValueKind::Integer => "integer",
            ValueKind::Text => "text",
        })
    }
}

mod sealed {
    pub trait Sealed {}
}

/**
A type that can live in a [`Value`] slot. This is implemented for exactly
[`f64`], [`i64`], and [`String`], each with its own parse strategy:

- Numbers must consume the entire token; `12abc` is not a number.
- Text must be non-empty, and is otherwise taken verbatim.
*/
pub trait Scalar: sealed::Sealed + Clone + Default + fmt::Debug + 'static {
    const KIND: ValueKind;

    /// Parse a command line token, or return `None` if it isn't valid
    fn parse_token(token: &str) -> Option<Self>;

    #[doc(hidden)]
    fn wrap_named(named: NamedValue<Self>) -> AnyNamed;

    #[doc(hidden)]
    fn narrow_named(named: &AnyNamed) -> Option<&NamedValue<Self>>;

    #[doc(hidden)]
    fn wrap_positional(positional: PositionalValue<Self>) -> AnyPositional;

    #[doc(hidden)]
    fn narrow_positional(positional: &AnyPositional) -> Option<&PositionalValue<Self>>;
}

#[inline]
fn parse_number<T: FromStr>(token: &str) -> Option<T> {
    token.parse().ok()
}

#[inline]
fn parse_text(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| token.to_owned())
}

macro_rules! scalars {
    ($($type:ty => $variant:ident with $parse:path,)*) => {
        $(
            impl sealed::Sealed for $type {}

            impl Scalar for $type {
                const KIND: ValueKind = ValueKind::$variant;

                #[inline]
                fn parse_token(token: &str) -> Option<Self> {
                    $parse(token)
                }

                fn wrap_named(named: NamedValue<Self>) -> AnyNamed {
                    AnyNamed::$variant(named)
                }

                fn narrow_named(named: &AnyNamed) -> Option<&NamedValue<Self>> {
                    match named {
                        AnyNamed::$variant(named) => Some(named),
                        _ => None,
                    }
                }

                fn wrap_positional(positional: PositionalValue<Self>) -> AnyPositional {
                    AnyPositional::$variant(positional)
                }

                fn narrow_positional(
                    positional: &AnyPositional,
                ) -> Option<&PositionalValue<Self>> {
                    match positional {
                        AnyPositional::$variant(positional) => Some(positional),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalars! {
    f64 => Float with parse_number,
    i64 => Integer with parse_number,
    String => Text with parse_text,
}

/// The value capability: a typed slot plus the metadata needed to describe
/// it in a usage message.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<T> {
    current: T,
    metavar: String,
    optional: bool,
}

impl<T: Scalar> Value<T> {
    fn new(name: &str) -> Self {
        Self {
            current: T::default(),
            metavar: name.to_ascii_uppercase(),
            optional: false,
        }
    }

    /// The current value: the default, or whatever was last parsed
    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        &self.current
    }

    #[inline]
    #[must_use]
    pub fn metavar(&self) -> &str {
        &self.metavar
    }

    #[inline]
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        T::KIND
    }

    /// Try to parse `token` into this slot. On failure the slot is left
    /// unchanged and this returns false.
    pub fn parse(&mut self, token: &str) -> bool {
        match T::parse_token(token) {
            Some(value) => {
                self.current = value;
                true
            }
            None => false,
        }
    }
}

/// A named parameter without a value, such as `--verbose`. Its only state is
/// the number of times it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    identity: Identity,
    naming: Naming,
}

impl Flag {
    pub fn new(name: impl Into<String>) -> Self {
        let identity = Identity::new(name.into());
        let naming = Naming::new(identity.name());

        Self { identity, naming }
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.identity.help = help.into();
        self
    }

    /// Set the `--longname`. It is checked when the flag is registered.
    #[must_use]
    pub fn longname(mut self, longname: impl Into<String>) -> Self {
        self.naming.longname = longname.into();
        self
    }

    /// Set the `-s` shortname. It is checked when the flag is registered.
    #[must_use]
    pub fn shortname(mut self, shortname: char) -> Self {
        self.naming.shortname = Some(shortname);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[inline]
    #[must_use]
    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.naming.count()
    }
}

/// A named parameter with a value, such as `--repeat 3` or `-n3`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue<T> {
    identity: Identity,
    naming: Naming,
    value: Value<T>,
}

impl<T: Scalar> NamedValue<T> {
    pub fn new(name: impl Into<String>) -> Self {
        let identity = Identity::new(name.into());
        let naming = Naming::new(identity.name());
        let value = Value::new(identity.name());

        Self {
            identity,
            naming,
            value,
        }
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.identity.help = help.into();
        self
    }

    /// Set the `--longname`. It is checked when the option is registered.
    #[must_use]
    pub fn longname(mut self, longname: impl Into<String>) -> Self {
        self.naming.longname = longname.into();
        self
    }

    /// Set the `-s` shortname. It is checked when the option is registered.
    #[must_use]
    pub fn shortname(mut self, shortname: char) -> Self {
        self.naming.shortname = Some(shortname);
        self
    }

    #[must_use]
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.value.metavar = metavar.into();
        self
    }

    /// An optional option may appear without a value, as long as it is the
    /// last argument or the next argument doesn't parse as a value.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.value.optional = optional;
        self
    }

    /// Set the default value
    #[must_use]
    pub fn value(mut self, value: impl Into<T>) -> Self {
        self.value.current = value.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[inline]
    #[must_use]
    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> &Value<T> {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.naming.count()
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        self.value.get()
    }
}

/// A parameter identified by its position among the bare arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalValue<T> {
    identity: Identity,
    value: Value<T>,
}

impl<T: Scalar> PositionalValue<T> {
    pub fn new(name: impl Into<String>) -> Self {
        let identity = Identity::new(name.into());
        let value = Value::new(identity.name());

        Self { identity, value }
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.identity.help = help.into();
        self
    }

    #[must_use]
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.value.metavar = metavar.into();
        self
    }

    /// An optional positional is skipped over by an argument that doesn't
    /// parse into it, which then goes to the next positional instead.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.value.optional = optional;
        self
    }

    /// Set the default value
    #[must_use]
    pub fn value(mut self, value: impl Into<T>) -> Self {
        self.value.current = value.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    #[inline]
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> &Value<T> {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> &T {
        self.value.get()
    }
}

macro_rules! each_scalar {
    ($value:expr, $bind:ident => $body:expr) => {
        match $value {
            Self::Float($bind) => $body,
            Self::Integer($bind) => $body,
            Self::Text($bind) => $body,
        }
    };
}

/// A [`NamedValue`] of any [`Scalar`] type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyNamed {
    Float(NamedValue<f64>),
    Integer(NamedValue<i64>),
    Text(NamedValue<String>),
}

impl AnyNamed {
    #[must_use]
    pub fn identity(&self) -> &Identity {
        each_scalar!(self, named => &named.identity)
    }

    #[must_use]
    pub fn naming(&self) -> &Naming {
        each_scalar!(self, named => &named.naming)
    }

    pub(crate) fn naming_mut(&mut self) -> &mut Naming {
        each_scalar!(self, named => &mut named.naming)
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        each_scalar!(self, named => named.value.kind())
    }

    #[must_use]
    pub fn metavar(&self) -> &str {
        each_scalar!(self, named => named.value.metavar())
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        each_scalar!(self, named => named.value.is_optional())
    }

    /// Parse a raw argument into the slot. Arguments that aren't UTF-8 never
    /// parse.
    pub fn parse(&mut self, argument: Arg<'_>) -> bool {
        let Some(token) = argument.as_str() else {
            return false;
        };

        each_scalar!(self, named => named.value.parse(token))
    }
}

/// A [`PositionalValue`] of any [`Scalar`] type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyPositional {
    Float(PositionalValue<f64>),
    Integer(PositionalValue<i64>),
    Text(PositionalValue<String>),
}

impl AnyPositional {
    #[must_use]
    pub fn identity(&self) -> &Identity {
        each_scalar!(self, positional => &positional.identity)
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        each_scalar!(self, positional => positional.value.kind())
    }

    #[must_use]
    pub fn metavar(&self) -> &str {
        each_scalar!(self, positional => positional.value.metavar())
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        each_scalar!(self, positional => positional.value.is_optional())
    }

    /// Parse a raw argument into the slot. Arguments that aren't UTF-8 never
    /// parse.
    pub fn parse(&mut self, argument: Arg<'_>) -> bool {
        let Some(token) = argument.as_str() else {
            return false;
        };

        each_scalar!(self, positional => positional.value.parse(token))
    }
}

/// A registered parameter of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Flag(Flag),
    Named(AnyNamed),
    Positional(AnyPositional),
}

impl Parameter {
    #[must_use]
    pub fn identity(&self) -> &Identity {
        match self {
            Parameter::Flag(flag) => flag.identity(),
            Parameter::Named(named) => named.identity(),
            Parameter::Positional(positional) => positional.identity(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity().name()
    }

    /// The option capability, if this kind of parameter has one
    #[must_use]
    pub fn naming(&self) -> Option<&Naming> {
        match self {
            Parameter::Flag(flag) => Some(flag.naming()),
            Parameter::Named(named) => Some(named.naming()),
            Parameter::Positional(_) => None,
        }
    }

    pub(crate) fn naming_mut(&mut self) -> Option<&mut Naming> {
        match self {
            Parameter::Flag(flag) => Some(&mut flag.naming),
            Parameter::Named(named) => Some(named.naming_mut()),
            Parameter::Positional(_) => None,
        }
    }

    /// How this parameter's kind is spelled in error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Parameter::Flag(_) => Flag::describe(),
            Parameter::Named(named) => format!("an `Option<{}>`", named.kind()),
            Parameter::Positional(positional) => format!("a `Positional<{}>`", positional.kind()),
        }
    }
}

/**
A concrete parameter kind that can be stored in, and narrowed back out of,
a [`Registry`][crate::registry::Registry].
*/
pub trait Kind: Sized {
    /// How this kind is spelled in error messages, for instance as a `Flag`
    fn describe() -> String;

    fn into_parameter(self) -> Parameter;

    fn narrow(parameter: &Parameter) -> Option<&Self>;
}

impl Kind for Flag {
    fn describe() -> String {
        "a `Flag`".to_owned()
    }

    fn into_parameter(self) -> Parameter {
        Parameter::Flag(self)
    }

    fn narrow(parameter: &Parameter) -> Option<&Self> {
        match parameter {
            Parameter::Flag(flag) => Some(flag),
            _ => None,
        }
    }
}

impl<T: Scalar> Kind for NamedValue<T> {
    fn describe() -> String {
        format!("an `Option<{}>`", T::KIND)
    }

    fn into_parameter(self) -> Parameter {
        Parameter::Named(T::wrap_named(self))
    }

    fn narrow(parameter: &Parameter) -> Option<&Self> {
        match parameter {
            Parameter::Named(named) => T::narrow_named(named),
            _ => None,
        }
    }
}

impl<T: Scalar> Kind for PositionalValue<T> {
    fn describe() -> String {
        format!("a `Positional<{}>`", T::KIND)
    }

    fn into_parameter(self) -> Parameter {
        Parameter::Positional(T::wrap_positional(self))
    }

    fn narrow(parameter: &Parameter) -> Option<&Self> {
        match parameter {
            Parameter::Positional(positional) => T::narrow_positional(positional),
            _ => None,
        }
    }
}
