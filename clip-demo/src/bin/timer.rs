use std::{thread, time::Duration};

use clip::{App, Flag, NamedValue, Parser, PositionalValue, exit_with_error};

#[derive(Debug, thiserror::Error)]
enum Invalid {
    #[error("delay must be greater than 0")]
    Delay,

    #[error("repeat must be greater than 0")]
    Repeat,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut parser = Parser::new(
        App::new("timer")
            .about("My awesome timer app. Parsed by clip!")
            .author("Zakhary Kaplan <zakharykaplan@gmail.com>")
            .version("0.1.0"),
    );

    parser
        .add(
            NamedValue::<i64>::new("repeat")
                .shortname('n')
                .metavar("INT")
                .help("Number of times to repeat the delay.")
                .value(1),
        )?
        .add(
            NamedValue::<String>::new("message")
                .shortname('m')
                .metavar("STRING")
                .help("Message to print after each delay.")
                .value("Time's up!"),
        )?
        .add(PositionalValue::<f64>::new("delay").help("Desired delay length (in seconds)."))?
        .add(Flag::new("verbose").shortname('v').help("Set verbosity level."))?;

    parser.parse();

    let delay = *parser.get_positional::<f64>("delay")?.get();
    let repeat = *parser.get_named::<i64>("repeat")?.get();
    let message = parser.get_named::<String>("message")?.get();
    let verbose = parser.get_flag("verbose")?.count();
    log::debug!("delay {delay}s, repeat {repeat}, verbosity {verbose}");

    let duration = match Duration::try_from_secs_f64(delay) {
        Ok(duration) => duration,
        Err(_) => exit_with_error(1, Invalid::Delay),
    };

    if repeat < 0 {
        exit_with_error(1, Invalid::Repeat);
    }

    log::debug!("sleeping for {duration:?} per timer");

    if verbose > 0 {
        println!("Setting {repeat} timers for {delay} seconds.");
    }

    for i in 0..repeat {
        if verbose >= 2 {
            println!("Starting timer: {i}/{repeat}...");
        }

        thread::sleep(duration);
        println!("{message}");
    }

    Ok(())
}
