/*!
A declarative command line arguments parser. Describe your flags, options,
and positionals up front, register them with a [`Parser`], then parse the
command line in a single pass and read the results back by name.

```
use clip::{App, Flag, NamedValue, Parser};

let mut parser = Parser::new(App::new("demo").version("0.1.0"));

parser
    .add(Flag::new("verbose").shortname('v').help("Use verbose output."))?
    .add(
        NamedValue::<String>::new("message")
            .shortname('m')
            .value("Time's up!"),
    )?;

let args: [&[u8]; 2] = [b"-vv", b"--message=done"];
parser.try_parse_from(args).unwrap();

assert_eq!(parser.get_flag("verbose")?.count(), 2);
assert_eq!(parser.get_named::<String>("message")?.get(), "done");
# Ok::<(), Box<dyn std::error::Error>>(())
```

The grammar is fixed:

- `--name` and `--name=value` for long options
- `-c`, `-cvalue`, and `-c=value` for short options, which can be clustered
  as in `-abc`
- everything else is a positional, filled in registration order
- after `--`, everything is a positional

[`Parser::parse`] handles `--help` and `--version` for you, and exits the
process on error. [`Parser::try_parse_from`] instead returns an [`Exit`],
which [`Parser::report`] can print to any [`Sink`].
*/

pub mod app;
pub mod arguments;
pub mod errors;
pub mod help;
pub mod parameter;
pub mod parser;
pub mod registry;
pub mod sink;

pub use clip_parser::Arg;

pub use app::{App, ColorChoice};
pub use errors::{Error, Exit, HelpRequest, RegistrationError};
pub use parameter::{Flag, NamedValue, PositionalValue, Scalar, ValueKind};
pub use parser::Parser;
pub use registry::Registry;
pub use sink::{Capture, Console, Sink, exit_with_error};
